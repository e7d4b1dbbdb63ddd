//! Event mutation orchestrator.
//!
//! Composes the ownership guard and the scheduling rules with the store,
//! the clock and the task dispatcher. Validation strictly precedes any write;
//! a rejection leaves the store untouched.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use agendum_core::{Clock, DomainError, EventId, UserId};
use agendum_scheduling::{Event, EventDraft, ensure_owner, rules};

use crate::event_store::{EventStore, EventStoreError, NewEvent};
use crate::jobs::{DispatchError, Job, ShareEventMail, TaskDispatcher};

/// Events per listing page.
pub const PER_PAGE: usize = 20;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A terminal domain rejection (validation, ownership, temporal rule).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Infrastructure failure underneath the operation.
    #[error("storage error: {0}")]
    Store(String),
}

impl From<EventStoreError> for ServiceError {
    fn from(err: EventStoreError) -> Self {
        match err {
            EventStoreError::NotFound => ServiceError::Domain(DomainError::NotFound),
            // The store's unique index is the authoritative duplicate check:
            // a constraint hit after the rule engine passed means we lost a
            // same-instant race, and the caller sees the same rejection.
            EventStoreError::UniqueViolation => ServiceError::Domain(DomainError::DuplicateTime),
            EventStoreError::Storage(msg) => ServiceError::Store(msg),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// Orchestrates the event CRUD + share operations.
///
/// All dependencies are injected; with an in-memory store and a fixed clock
/// the whole service runs deterministically in tests.
pub struct EventService {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    dispatcher: Arc<dyn TaskDispatcher>,
}

impl EventService {
    pub fn new(
        store: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
        dispatcher: Arc<dyn TaskDispatcher>,
    ) -> Self {
        Self {
            store,
            clock,
            dispatcher,
        }
    }

    /// List the acting user's events, time-ascending, paginated (1-based).
    pub async fn list(&self, acting: UserId, page: usize) -> Result<Page<Event>, ServiceError> {
        let all = self.store.list_by_owner(acting).await?;
        let total = all.len();
        let page = page.max(1);
        // The page number is caller-controlled; the offset must not overflow.
        let offset = page.saturating_sub(1).saturating_mul(PER_PAGE);
        let items = all.into_iter().skip(offset).take(PER_PAGE).collect();

        Ok(Page {
            items,
            page,
            per_page: PER_PAGE,
            total,
        })
    }

    /// Fetch one event; only its owner may see it.
    pub async fn show(&self, event_id: EventId, acting: UserId) -> Result<Event, ServiceError> {
        let event = self.fetch(event_id).await?;
        ensure_owner(&event, acting)?;
        Ok(event)
    }

    /// Create an event owned by the acting user.
    pub async fn create(&self, acting: UserId, draft: EventDraft) -> Result<Event, ServiceError> {
        let existing = self.store.list_by_owner(acting).await?;
        rules::validate_create(&draft, &existing, self.clock.now())?;

        let event = self
            .store
            .create(NewEvent {
                owner_id: acting,
                title: draft.title().to_string(),
                location: draft.location().to_string(),
                time: draft.time,
            })
            .await?;
        Ok(event)
    }

    /// Update an owned, still-future event.
    pub async fn update(
        &self,
        event_id: EventId,
        acting: UserId,
        draft: EventDraft,
    ) -> Result<Event, ServiceError> {
        let mut event = self.fetch(event_id).await?;
        ensure_owner(&event, acting)?;

        let siblings = self.store.list_by_owner(acting).await?;
        rules::validate_update(&event, &draft, &siblings, self.clock.now())?;

        event.merge(&draft);
        let updated = self.store.update(&event).await?;
        Ok(updated)
    }

    /// Delete an owned, still-future event.
    pub async fn delete(&self, event_id: EventId, acting: UserId) -> Result<(), ServiceError> {
        let event = self.fetch(event_id).await?;
        ensure_owner(&event, acting)?;
        rules::validate_delete(&event, self.clock.now())?;

        self.store.delete(event_id).await?;
        Ok(())
    }

    /// Share an owned event by email.
    ///
    /// No temporal rule applies: past events are shareable. Delivery is
    /// fire-and-forget; an enqueue failure is logged, never surfaced.
    pub async fn share(
        &self,
        event_id: EventId,
        acting: UserId,
        recipient_email: String,
    ) -> Result<Event, ServiceError> {
        let event = self.fetch(event_id).await?;
        ensure_owner(&event, acting)?;

        let mail = ShareEventMail {
            recipient_email,
            event: event.clone(),
        };
        match Job::share_event_mail(&mail) {
            Ok(job) => {
                if let Err(DispatchError::QueueClosed) = self.dispatcher.dispatch(job) {
                    warn!(event_id = %event.id, "share mail not enqueued: queue closed");
                }
            }
            Err(e) => warn!(event_id = %event.id, error = %e, "share mail payload not serializable"),
        }

        Ok(event)
    }

    async fn fetch(&self, event_id: EventId) -> Result<Event, ServiceError> {
        self.store
            .find_by_id(event_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotFound))
    }
}
