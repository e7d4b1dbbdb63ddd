use agendum_core::UserId;

/// Authenticated identity for a request.
///
/// Derived from the bearer token by the auth middleware; the domain only ever
/// sees the `UserId` and compares it against event ownership.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    user_id: UserId,
}

impl CurrentUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
