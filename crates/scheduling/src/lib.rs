//! Scheduling domain module.
//!
//! This crate contains the conflict and temporal-validity rules for calendar
//! events, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod event;
pub mod ownership;
pub mod rules;

pub use event::{Event, EventDraft};
pub use ownership::ensure_owner;
pub use rules::{validate_create, validate_delete, validate_update};
