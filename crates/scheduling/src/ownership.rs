//! Ownership guard: gates show, update, delete and share.

use agendum_core::{DomainError, DomainResult, UserId};

use crate::event::Event;

/// Check that `acting` owns `event`.
///
/// Pure equality on `owner_id`; no IO, no side effects. A store miss is a
/// separate `NotFound` outcome and must stay distinguishable from this denial.
pub fn ensure_owner(event: &Event, acting: UserId) -> DomainResult<()> {
    if event.owner_id != acting {
        return Err(DomainError::NotOwner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendum_core::EventId;
    use chrono::{TimeZone, Utc};

    fn event_owned_by(owner: UserId) -> Event {
        Event {
            id: EventId::new(),
            owner_id: owner,
            title: "Dinner".into(),
            location: "Downtown".into(),
            time: Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn owner_passes() {
        let owner = UserId::new();
        assert!(ensure_owner(&event_owned_by(owner), owner).is_ok());
    }

    #[test]
    fn other_user_is_denied() {
        let event = event_owned_by(UserId::new());
        assert_eq!(
            ensure_owner(&event, UserId::new()),
            Err(DomainError::NotOwner)
        );
    }
}
