//! Infrastructure wiring for the API process.

use std::sync::Arc;

use sqlx::PgPool;

use agendum_core::SystemClock;
use agendum_infra::event_store::{EventStore, InMemoryEventStore, PostgresEventStore};
use agendum_infra::jobs::{MailWorker, QueueDispatcher, TracingMailer};
use agendum_infra::service::EventService;

/// Shared service container handed to route handlers.
pub struct AppServices {
    pub events: EventService,
}

/// Wire the service against the in-memory store (dev/tests).
pub fn build_services() -> AppServices {
    with_store(Arc::new(InMemoryEventStore::new()))
}

/// Wire the service against Postgres, creating the schema if needed.
pub async fn build_postgres_services(pool: PgPool) -> anyhow::Result<AppServices> {
    let store = PostgresEventStore::new(pool);
    store.ensure_schema().await?;
    Ok(with_store(Arc::new(store)))
}

fn with_store(store: Arc<dyn EventStore>) -> AppServices {
    let (dispatcher, rx) = QueueDispatcher::new();

    // The worker runs for the life of the process; the queue closes (and the
    // task ends) when the last dispatcher handle is dropped.
    MailWorker::new(Arc::new(TracingMailer)).spawn(rx);

    AppServices {
        events: EventService::new(store, Arc::new(SystemClock), Arc::new(dispatcher)),
    }
}
