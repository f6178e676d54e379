//! Authentication result types
//!
//! Defines the outcome returned to the request layer for every credential check.

/// Result of checking a username/password pair.
///
/// A denial never says whether the username or the password was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Allowed { username: String },
    Denied,
}

impl AuthOutcome {
    pub fn allowed(username: impl Into<String>) -> Self {
        AuthOutcome::Allowed {
            username: username.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthOutcome::Allowed { .. })
    }

    /// Identity of the matched peer, for propagation downstream.
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthOutcome::Allowed { username } => Some(username),
            AuthOutcome::Denied => None,
        }
    }
}
