//! Infrastructure layer: persistence, deferred jobs, and the mutation
//! orchestrator that wires them to the scheduling rules.

pub mod event_store;
pub mod jobs;
pub mod service;


pub use event_store::{EventStore, EventStoreError, InMemoryEventStore, NewEvent, PostgresEventStore};
pub use jobs::{Job, Mailer, QueueDispatcher, ShareEventMail, TaskDispatcher};
pub use service::{EventService, Page, ServiceError};
