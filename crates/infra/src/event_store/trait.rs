use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use agendum_core::{EventId, UserId};
use agendum_scheduling::Event;

/// An event ready to be persisted (not yet assigned an id).
///
/// The store assigns the `EventId` during `create`; `owner_id` is fixed from
/// the acting identity by the orchestrator and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub owner_id: UserId,
    pub title: String,
    pub location: String,
    pub time: DateTime<Utc>,
}

/// Event store operation error.
///
/// These are **infrastructure** outcomes (storage failures, constraint
/// violations) as opposed to domain rejections. The orchestrator translates
/// `UniqueViolation` back into the domain's duplicate-time rejection: the
/// database constraint is the authoritative close of the check-then-act race.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The referenced event id does not exist.
    #[error("event not found")]
    NotFound,

    /// The `(owner_id, time)` uniqueness constraint rejected the write.
    #[error("an event for this owner already exists at this time")]
    UniqueViolation,

    /// Underlying storage failure (connection, query, lock).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence abstraction for event records.
///
/// ## Required invariant
///
/// Implementations must make the `(owner_id, time)` uniqueness check atomic
/// with `create` and `update` (unique index, or check under a write lock).
/// Two concurrent writes for the same pair must not both succeed; the loser
/// gets `UniqueViolation`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a new record, assigning its id.
    async fn create(&self, new: NewEvent) -> Result<Event, EventStoreError>;

    /// Fetch a single record by id.
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventStoreError>;

    /// Fetch the zero-or-one record for an owner at an exact instant.
    async fn find_by_owner_and_time(
        &self,
        owner_id: UserId,
        time: DateTime<Utc>,
    ) -> Result<Option<Event>, EventStoreError>;

    /// All records for an owner, ordered by time ascending.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>, EventStoreError>;

    /// Persist the mutable fields of an existing record.
    async fn update(&self, event: &Event) -> Result<Event, EventStoreError>;

    /// Remove a record.
    async fn delete(&self, id: EventId) -> Result<(), EventStoreError>;
}

#[async_trait]
impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    async fn create(&self, new: NewEvent) -> Result<Event, EventStoreError> {
        (**self).create(new).await
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventStoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_owner_and_time(
        &self,
        owner_id: UserId,
        time: DateTime<Utc>,
    ) -> Result<Option<Event>, EventStoreError> {
        (**self).find_by_owner_and_time(owner_id, time).await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>, EventStoreError> {
        (**self).list_by_owner(owner_id).await
    }

    async fn update(&self, event: &Event) -> Result<Event, EventStoreError> {
        (**self).update(event).await
    }

    async fn delete(&self, id: EventId) -> Result<(), EventStoreError> {
        (**self).delete(id).await
    }
}
