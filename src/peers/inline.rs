//! Inline peer source
//!
//! Two delimited strings where position `i` of `users` pairs with position `i` of
//! `passwords`. Handy when a deployment can only export one environment variable for
//! users and one for passwords.

use super::{Peer, PeerRegistry, PeerSource};
use crate::encryptor::unwrap_encrypted;
use crate::error::{ConfigurationError, Result};
use log::{debug, info};

pub const DEFAULT_DELIMITER: &str = ";";

#[derive(Debug, Clone)]
pub struct InlinePeerSource {
    users: String,
    passwords: String,
    delimiter: String,
}

impl InlinePeerSource {
    pub fn new(
        users: impl Into<String>,
        passwords: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            users: users.into(),
            passwords: passwords.into(),
            delimiter: delimiter.into(),
        }
    }

    pub fn with_default_delimiter(users: impl Into<String>, passwords: impl Into<String>) -> Self {
        Self::new(users, passwords, DEFAULT_DELIMITER)
    }

    /// Builds a source from optional parts, failing on whichever one is absent.
    pub fn from_parts(
        users: Option<&str>,
        passwords: Option<&str>,
        delimiter: Option<&str>,
    ) -> Result<Self> {
        let users = users.ok_or(ConfigurationError::IncompleteInlineSource("users"))?;
        let passwords = passwords.ok_or(ConfigurationError::IncompleteInlineSource("passwords"))?;
        let delimiter = delimiter.ok_or(ConfigurationError::IncompleteInlineSource("delimiter"))?;
        Ok(Self::new(users, passwords, delimiter))
    }
}

impl PeerSource for InlinePeerSource {
    fn into_registry(self) -> Result<PeerRegistry> {
        if self.delimiter.is_empty() {
            return Err(ConfigurationError::EmptyDelimiter);
        }

        let users = tokens(&self.users, &self.delimiter);
        let passwords = tokens(&self.passwords, &self.delimiter);
        if users.len() != passwords.len() {
            return Err(ConfigurationError::LengthMismatch {
                users: users.len(),
                passwords: passwords.len(),
            });
        }

        let mut registry = PeerRegistry::with_capacity(users.len());
        for (username, password) in users.into_iter().zip(passwords) {
            registry.insert(Peer::new(username, unwrap_encrypted(password)))?;
            debug!("Added peer {} with password xxxx", username);
        }

        info!("Loaded {} allowed peers from inline configuration", registry.len());
        Ok(registry)
    }
}

/// Splits on `delimiter`, dropping trailing empty tokens. Interior empty tokens stay,
/// so `"a;;b"` is three tokens while `"a;b;"` is two.
fn tokens<'a>(input: &'a str, delimiter: &str) -> Vec<&'a str> {
    if !input.contains(delimiter) {
        return vec![input];
    }
    let mut tokens: Vec<&str> = input.split(delimiter).collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    tokens
}
