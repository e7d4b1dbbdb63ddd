use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use agendum_scheduling::EventDraft;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub location: String,
    /// RFC3339 instant, e.g. `2026-06-01T18:30:00Z`.
    pub time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ShareEventRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

// -------------------------
// Mapping helpers
// -------------------------

impl EventRequest {
    /// Shape-validate into a draft; failures become 400 responses.
    pub fn into_draft(self) -> Result<EventDraft, axum::response::Response> {
        EventDraft::new(self.title, self.location, self.time)
            .map_err(errors::domain_error_to_response)
    }
}

/// Minimal recipient shape check. Deliverability is the mail collaborator's
/// problem.
pub fn validate_email(email: &str) -> Result<(), axum::response::Response> {
    let trimmed = email.trim();
    let well_formed = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if trimmed.is_empty() || !well_formed {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email must be a valid address",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_addresses() {
        assert!(validate_email("friend@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "   ", "no-at-sign", "@example.com", "user@nodot"] {
            assert!(validate_email(bad).is_err(), "accepted {bad:?}");
        }
    }
}
