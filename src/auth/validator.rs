//! Allowed-peer authenticator
//!
//! Checks presented Basic-Auth credentials against the registry loaded at startup.
//! Under plaintext policy the check is exact pair membership; under a hashed policy the
//! peer is looked up by username and the password is checked against its digest.

use super::{AuthOutcome, Authenticator, audit};
use crate::encryptor::PasswordPolicy;
use crate::peers::{Peer, PeerRegistry};
use log::info;

#[derive(Debug)]
pub struct AllowedPeerAuthenticator {
    registry: PeerRegistry,
    policy: PasswordPolicy,
}

impl AllowedPeerAuthenticator {
    pub fn new(registry: PeerRegistry, policy: PasswordPolicy) -> Self {
        info!(
            "Constructed Authenticator with {} allowed peers (encryptor: {})",
            registry.len(),
            policy.name()
        );
        Self { registry, policy }
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    fn is_allowed(&self, username: &str, password: &str) -> bool {
        match &self.policy {
            PasswordPolicy::Plaintext => self.registry.contains(&Peer::new(username, password)),
            PasswordPolicy::Hashed(_) => self
                .registry
                .find_by_username(username)
                .any(|peer| self.policy.verify(password, peer.secret())),
        }
    }
}

impl Authenticator for AllowedPeerAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        let outcome = if self.is_allowed(username, password) {
            AuthOutcome::allowed(username)
        } else {
            AuthOutcome::Denied
        };
        audit::log_attempt(username, &outcome);
        outcome
    }
}
