//! Error types
//!
//! Everything that can go wrong while turning configuration into an authenticator.
//! Authentication itself never fails; it only allows or denies.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for startup-time operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Fatal startup errors. None of these leave a partially usable authenticator behind.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("could not read allowed peers from {path}: {source}")]
    CredentialSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed properties on line {line}: {reason}")]
    MalformedProperties { line: usize, reason: String },

    #[error("no credential source configured: set credentialFile, or both users and passwords")]
    NoCredentialSource,

    #[error("inline credential source is missing {0}")]
    IncompleteInlineSource(&'static str),

    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("length of users ({users}) must match the length of the passwords ({passwords})")]
    LengthMismatch { users: usize, passwords: usize },

    #[error("usernames must not be empty")]
    EmptyUsername,

    #[error("can't have 2 identical usernames: {0}")]
    DuplicateUsername(String),

    #[error("no support for encryptor type {0:?} (expected none, basic or strong)")]
    UnknownEncryptor(String),

    #[error("a caching authenticator requires a cache policy")]
    MissingCachePolicy,

    #[error("invalid cache policy {spec:?}: {reason}")]
    InvalidCachePolicy { spec: String, reason: String },

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
