//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// temporal invariants, ownership). Infrastructure concerns belong elsewhere.
/// Every variant is a terminal, caller-visible outcome: no retry, and the
/// failed operation performs no partial mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed input-shape validation (e.g. blank title).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced event does not exist.
    #[error("event not found")]
    NotFound,

    /// The acting identity does not own the event.
    #[error("you do not have permission to access this event")]
    NotOwner,

    /// Another event already occupies this time for the same owner.
    #[error("another event is already scheduled at this time")]
    DuplicateTime,

    /// The candidate time is not strictly in the future.
    #[error("the event time must be in the future")]
    PastTime,

    /// The existing event being edited or deleted has already passed.
    #[error("the event has already occurred")]
    AlreadyOccurred,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Stable machine-readable code, used by the HTTP layer for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::NotFound => "not_found",
            DomainError::NotOwner => "not_owner",
            DomainError::DuplicateTime => "duplicate_time",
            DomainError::PastTime => "past_time",
            DomainError::AlreadyOccurred => "already_occurred",
        }
    }
}
