use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agendum_core::{DomainError, DomainResult, Entity, EventId, UserId};

/// A single-owner, single-instant calendar event.
///
/// `id` is assigned by the store at creation; `id` and `owner_id` never change
/// afterwards. Updates only touch `title`, `location` and `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub title: String,
    pub location: String,
    pub time: DateTime<Utc>,
}

impl Entity for Event {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Event {
    /// Apply the mutable fields of a draft onto this record.
    ///
    /// `id` and `owner_id` are deliberately untouched.
    pub fn merge(&mut self, draft: &EventDraft) {
        self.title = draft.title.clone();
        self.location = draft.location.clone();
        self.time = draft.time;
    }
}

/// Validated input shape for a create or update.
///
/// Shape validation happens here, before a candidate ever reaches the rule
/// engine: the temporal rules only see drafts that are already well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    title: String,
    location: String,
    pub time: DateTime<Utc>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        time: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = title.into();
        let location = location.into();

        if title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if location.trim().is_empty() {
            return Err(DomainError::validation("location must not be empty"));
        }

        Ok(Self {
            title,
            location,
            time,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}
