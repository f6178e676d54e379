//! Peer authentication
//!
//! Authenticates Basic-Auth callers against a static allow-list of peers loaded once
//! at startup from a properties file or from a pair of delimited strings. Stored
//! secrets may be plaintext or salted digests, and decisions may be cached.

pub mod auth;
pub mod config;
pub mod encryptor;
pub mod error;
pub mod peers;
pub mod utils;

pub use auth::{AuthOutcome, Authenticator};
pub use self::config::PeerAuthConfig;
pub use error::{ConfigurationError, Result};
pub use peers::{Peer, PeerRegistry};
