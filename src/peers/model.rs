//! Peer model

use std::fmt;

/// A remote caller allowed to use the service.
///
/// Two peers are equal only when both the username and the stored secret match, so a
/// registry under plaintext policy is literally a set of valid credential pairs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Peer {
    username: String,
    secret: String,
}

impl Peer {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password or digest, depending on the active policy.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("username", &self.username)
            .field("secret", &"xxxx")
            .finish()
    }
}
