use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use agendum_core::{EventId, UserId};
use agendum_scheduling::Event;

use super::r#trait::{EventStore, EventStoreError, NewEvent};

/// In-memory event store.
///
/// Intended for tests/dev. Uniqueness of `(owner_id, time)` is enforced under
/// the write lock, which gives the same effective atomicity the Postgres
/// backend gets from its unique index.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn occupied(
        events: &HashMap<EventId, Event>,
        owner_id: UserId,
        time: DateTime<Utc>,
        except: Option<EventId>,
    ) -> bool {
        events
            .values()
            .any(|e| e.owner_id == owner_id && e.time == time && Some(e.id) != except)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, new: NewEvent) -> Result<Event, EventStoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;

        if Self::occupied(&events, new.owner_id, new.time, None) {
            return Err(EventStoreError::UniqueViolation);
        }

        let event = Event {
            id: EventId::new(),
            owner_id: new.owner_id,
            title: new.title,
            location: new.location,
            time: new.time,
        };
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventStoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;
        Ok(events.get(&id).cloned())
    }

    async fn find_by_owner_and_time(
        &self,
        owner_id: UserId,
        time: DateTime<Utc>,
    ) -> Result<Option<Event>, EventStoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;
        Ok(events
            .values()
            .find(|e| e.owner_id == owner_id && e.time == time)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>, EventStoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;
        let mut owned: Vec<Event> = events
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|e| e.time);
        Ok(owned)
    }

    async fn update(&self, event: &Event) -> Result<Event, EventStoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;

        if !events.contains_key(&event.id) {
            return Err(EventStoreError::NotFound);
        }
        if Self::occupied(&events, event.owner_id, event.time, Some(event.id)) {
            return Err(EventStoreError::UniqueViolation);
        }

        events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn delete(&self, id: EventId) -> Result<(), EventStoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| EventStoreError::Storage("lock poisoned".to_string()))?;
        events
            .remove(&id)
            .map(|_| ())
            .ok_or(EventStoreError::NotFound)
    }
}
