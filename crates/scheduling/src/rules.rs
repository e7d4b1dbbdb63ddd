//! Conflict and temporal-validity rule engine.
//!
//! Pure decision logic: given an intended mutation and the relevant current
//! state, allow it or reject it with a single `DomainError`. The evaluation
//! order inside each function is fixed and determines which error is surfaced
//! when several conditions hold at once.
//!
//! "Past" is inclusive of exactly-now: an event becomes immutable at the
//! instant it starts (`time <= now`), not strictly afterwards.

use chrono::{DateTime, Utc};

use agendum_core::{DomainError, DomainResult};

use crate::event::{Event, EventDraft};

/// Validate creating `candidate` against the owner's existing events.
///
/// Duplicate-time is checked before past-time: when both conditions hold the
/// caller sees `DuplicateTime`. Uniqueness is scoped per owner, so `existing`
/// must contain only the acting owner's events.
pub fn validate_create(
    candidate: &EventDraft,
    existing: &[Event],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if existing.iter().any(|e| e.time == candidate.time) {
        return Err(DomainError::DuplicateTime);
    }
    if candidate.time <= now {
        return Err(DomainError::PastTime);
    }
    Ok(())
}

/// Validate replacing `existing`'s mutable fields with `candidate`.
///
/// Order is fixed: the edited event must not have occurred yet, the new time
/// must itself be in the future, and the new time must not collide with any
/// *other* event of the same owner. `siblings` may include the event being
/// edited; it is excluded by id.
pub fn validate_update(
    existing: &Event,
    candidate: &EventDraft,
    siblings: &[Event],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if existing.time <= now {
        return Err(DomainError::AlreadyOccurred);
    }
    if candidate.time <= now {
        return Err(DomainError::PastTime);
    }
    if siblings
        .iter()
        .any(|e| e.id != existing.id && e.time == candidate.time)
    {
        return Err(DomainError::DuplicateTime);
    }
    Ok(())
}

/// Validate deleting `existing`: history cannot be removed.
pub fn validate_delete(existing: &Event, now: DateTime<Utc>) -> DomainResult<()> {
    if existing.time <= now {
        return Err(DomainError::AlreadyOccurred);
    }
    Ok(())
}
