//! Authentication system
//!
//! The single verification contract exposed to the request layer, the allowed-peer
//! implementation of it, and the caching decorator.

pub mod audit;
pub mod cache_policy;
pub mod caching;
pub mod results;
pub mod validator;

use std::sync::Arc;

pub use cache_policy::{CachePolicy, DEFAULT_MAXIMUM_SIZE};
pub use caching::{CacheStats, CachingAuthenticator};
pub use results::AuthOutcome;
pub use validator::AllowedPeerAuthenticator;

/// Decides whether a username/password pair may use the service.
///
/// Implementations are shared across request threads and never fail: anything that is
/// not a match is [`AuthOutcome::Denied`].
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome;
}

impl<A: Authenticator + ?Sized> Authenticator for Arc<A> {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        (**self).authenticate(username, password)
    }
}

impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        (**self).authenticate(username, password)
    }
}
