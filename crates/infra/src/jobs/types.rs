//! Job types and payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use agendum_scheduling::Event;

/// Job kind for the share-event mail. The only job this system dispatches.
pub const SHARE_EVENT_MAIL: &str = "share_event_mail";

/// Unique job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload handed to the mail worker: who to tell about which event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEventMail {
    pub recipient_email: String,
    pub event: Event,
}

/// A queued background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Job kind for routing to a handler.
    pub kind: String,
    /// JSON payload (shape depends on `kind`).
    pub payload: serde_json::Value,
    /// Total delivery attempts allowed (first try included).
    pub max_attempts: u32,
}

impl Job {
    /// Build the share-event mail job with the delivery policy the share
    /// operation promises (at-least-once, up to 3 attempts).
    pub fn share_event_mail(payload: &ShareEventMail) -> serde_json::Result<Self> {
        Ok(Self {
            id: JobId::new(),
            kind: SHARE_EVENT_MAIL.to_string(),
            payload: serde_json::to_value(payload)?,
            max_attempts: 3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendum_core::{EventId, UserId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn share_job_carries_payload_and_policy() {
        let mail = ShareEventMail {
            recipient_email: "friend@example.com".into(),
            event: Event {
                id: EventId::new(),
                owner_id: UserId::new(),
                title: "Dinner".into(),
                location: "Downtown".into(),
                time: Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap(),
            },
        };

        let job = Job::share_event_mail(&mail).unwrap();
        assert_eq!(job.kind, SHARE_EVENT_MAIL);
        assert_eq!(job.max_attempts, 3);

        let decoded: ShareEventMail = serde_json::from_value(job.payload).unwrap();
        assert_eq!(decoded, mail);
    }
}
