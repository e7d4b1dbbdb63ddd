//! Postgres-backed event store.
//!
//! The `(owner_id, time)` uniqueness invariant is enforced by a database
//! unique index, so it holds atomically with every write: when two concurrent
//! requests race past the rule engine's check, the second insert/update fails
//! with SQLSTATE 23505 and is surfaced as `UniqueViolation`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use agendum_core::{EventId, UserId};
use agendum_scheduling::Event;

use super::r#trait::{EventStore, EventStoreError, NewEvent};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed event store.
///
/// `PgPool` is internally reference-counted and thread-safe; the store can be
/// cloned and shared freely.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    location: String,
    time: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            location: row.location,
            time: row.time,
        }
    }
}

impl PostgresEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the events table and its uniqueness index if absent.
    pub async fn ensure_schema(&self) -> Result<(), EventStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL,
                title TEXT NOT NULL,
                location TEXT NOT NULL,
                time TIMESTAMPTZ NOT NULL,
                CONSTRAINT events_owner_time_unique UNIQUE (owner_id, time)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }
}

fn map_sqlx(err: sqlx::Error) -> EventStoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return EventStoreError::UniqueViolation;
        }
    }
    EventStoreError::Storage(err.to_string())
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn create(&self, new: NewEvent) -> Result<Event, EventStoreError> {
        let id = EventId::new();
        let row: EventRow = sqlx::query_as(
            r#"
            INSERT INTO events (id, owner_id, title, location, time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, title, location, time
            "#,
        )
        .bind(id.as_uuid())
        .bind(new.owner_id.as_uuid())
        .bind(&new.title)
        .bind(&new.location)
        .bind(new.time)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventStoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, owner_id, title, location, time FROM events WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_owner_and_time(
        &self,
        owner_id: UserId,
        time: DateTime<Utc>,
    ) -> Result<Option<Event>, EventStoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, owner_id, title, location, time FROM events WHERE owner_id = $1 AND time = $2",
        )
        .bind(owner_id.as_uuid())
        .bind(time)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>, EventStoreError> {
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT id, owner_id, title, location, time FROM events WHERE owner_id = $1 ORDER BY time ASC",
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, event: &Event) -> Result<Event, EventStoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            UPDATE events
            SET title = $2, location = $3, time = $4
            WHERE id = $1
            RETURNING id, owner_id, title, location, time
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.location)
        .bind(event.time)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Into::into).ok_or(EventStoreError::NotFound)
    }

    async fn delete(&self, id: EventId) -> Result<(), EventStoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(EventStoreError::NotFound);
        }
        Ok(())
    }
}
