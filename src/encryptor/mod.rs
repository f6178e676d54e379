//! Password verification policies
//!
//! Stored secrets are either compared verbatim or checked as salted one-way digests.
//! Which one applies is a startup decision made through [`EncryptorKind`].

pub mod digest;
pub mod envelope;

use crate::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;

pub use digest::DigestPasswordEncryptor;
pub use envelope::{unwrap_encrypted, wrap_encrypted};

/// One-way password hashing.
pub trait PasswordEncryptor: Send + Sync {
    /// Short scheme name, used in log lines.
    fn name(&self) -> &'static str;

    /// Hashes `password` with a fresh salt.
    fn encrypt_password(&self, password: &str) -> String;

    /// True when `password` hashes to `stored`. Malformed `stored` values are false.
    fn check_password(&self, password: &str, stored: &str) -> bool;
}

/// Closed set of encryptor names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum EncryptorKind {
    #[default]
    None,
    Basic,
    Strong,
}

impl EncryptorKind {
    /// The hashing scheme for this kind; `None` means plaintext comparison.
    pub fn password_encryptor(self) -> Option<Box<dyn PasswordEncryptor>> {
        match self {
            EncryptorKind::None => None,
            EncryptorKind::Basic => Some(Box::new(DigestPasswordEncryptor::basic())),
            EncryptorKind::Strong => Some(Box::new(DigestPasswordEncryptor::strong())),
        }
    }
}

impl FromStr for EncryptorKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(EncryptorKind::None),
            "basic" => Ok(EncryptorKind::Basic),
            "strong" => Ok(EncryptorKind::Strong),
            _ => Err(ConfigurationError::UnknownEncryptor(s.to_string())),
        }
    }
}

impl TryFrom<String> for EncryptorKind {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EncryptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncryptorKind::None => write!(f, "none"),
            EncryptorKind::Basic => write!(f, "basic"),
            EncryptorKind::Strong => write!(f, "strong"),
        }
    }
}

/// How a presented password is checked against a stored secret.
pub enum PasswordPolicy {
    /// Exact equality.
    Plaintext,
    /// Salted digest check.
    Hashed(Box<dyn PasswordEncryptor>),
}

impl PasswordPolicy {
    pub fn verify(&self, candidate: &str, stored: &str) -> bool {
        match self {
            PasswordPolicy::Plaintext => candidate == stored,
            PasswordPolicy::Hashed(encryptor) => encryptor.check_password(candidate, stored),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PasswordPolicy::Plaintext => "none",
            PasswordPolicy::Hashed(encryptor) => encryptor.name(),
        }
    }
}

impl From<EncryptorKind> for PasswordPolicy {
    fn from(kind: EncryptorKind) -> Self {
        kind.password_encryptor()
            .map_or(PasswordPolicy::Plaintext, PasswordPolicy::Hashed)
    }
}

impl fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordPolicy").field(&self.name()).finish()
    }
}
