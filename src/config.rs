//! Allowed-peer configuration
//!
//! Holds the settings that decide where peers come from, how their secrets are
//! compared, and whether decisions are cached, plus the factory methods that turn
//! those settings into an authenticator. Everything is resolved once at startup.
//!
//! Keys (file or `PEER_AUTH_*` environment variables):
//! `realm`, `credential_file`, `users`, `passwords`, `delimiter`, `encryptor`,
//! `cache_policy`.

use crate::auth::{AllowedPeerAuthenticator, Authenticator, CachePolicy, CachingAuthenticator};
use crate::encryptor::{EncryptorKind, PasswordPolicy};
use crate::error::{ConfigurationError, Result};
use crate::peers::{
    DEFAULT_DELIMITER, FlatFilePeerSource, InlinePeerSource, PeerRegistry, PeerSource,
};
use config::{Config, Environment, File};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const ENV_PREFIX: &str = "PEER_AUTH";
pub const DEFAULT_REALM: &str = "peers";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeerAuthConfig {
    /// Basic-Auth realm announced to callers that fail authentication.
    pub realm: String,

    /// Properties file of `user=password` lines. Wins over `users`/`passwords`.
    pub credential_file: Option<PathBuf>,

    /// Delimited usernames, paired by position with `passwords`.
    pub users: Option<String>,
    pub passwords: Option<String>,
    pub delimiter: String,

    /// `none` (plaintext), `basic` or `strong`.
    pub encryptor: EncryptorKind,

    /// e.g. `maximumSize=100, expireAfterAccess=10m`. Absent means no caching.
    pub cache_policy: Option<String>,
}

/// The one strategy selected to populate the registry.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    File(PathBuf),
    Inline(InlinePeerSource),
}

impl CredentialSource {
    pub fn load(self) -> Result<PeerRegistry> {
        match self {
            CredentialSource::File(path) => FlatFilePeerSource::open(path)?.into_registry(),
            CredentialSource::Inline(source) => source.into_registry(),
        }
    }
}

impl Default for PeerAuthConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            credential_file: None,
            users: None,
            passwords: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            encryptor: EncryptorKind::None,
            cache_policy: None,
        }
    }
}

impl PeerAuthConfig {
    /// Load from a config file (format picked by extension) with environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_settings(settings)
    }

    /// Load from `PEER_AUTH_*` environment variables only.
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let config: PeerAuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that can be checked without reading the credential source.
    pub fn validate(&self) -> Result<()> {
        self.credential_source()?;
        self.cache_policy()?;
        Ok(())
    }

    /// Picks the credential file if set, otherwise the inline strings.
    pub fn credential_source(&self) -> Result<CredentialSource> {
        if let Some(path) = &self.credential_file {
            return Ok(CredentialSource::File(path.clone()));
        }
        if self.users.is_none() && self.passwords.is_none() {
            return Err(ConfigurationError::NoCredentialSource);
        }
        if self.delimiter.is_empty() {
            return Err(ConfigurationError::EmptyDelimiter);
        }
        InlinePeerSource::from_parts(
            self.users.as_deref(),
            self.passwords.as_deref(),
            Some(self.delimiter.as_str()),
        )
        .map(CredentialSource::Inline)
    }

    pub fn cache_policy(&self) -> Result<Option<CachePolicy>> {
        self.cache_policy.as_deref().map(str::parse::<CachePolicy>).transpose()
    }

    /// Value for the `WWW-Authenticate` header of a rejected request.
    pub fn challenge(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }

    /// Builds the uncached authenticator from the selected source and encryptor.
    pub fn create_authenticator(&self) -> Result<AllowedPeerAuthenticator> {
        let registry = self.credential_source()?.load()?;
        Ok(AllowedPeerAuthenticator::new(
            registry,
            PasswordPolicy::from(self.encryptor),
        ))
    }

    /// Builds the authenticator wrapped in a cache. Requires `cache_policy`.
    pub fn create_caching_authenticator(
        &self,
    ) -> Result<CachingAuthenticator<AllowedPeerAuthenticator>> {
        let policy = self
            .cache_policy()?
            .ok_or(ConfigurationError::MissingCachePolicy)?;
        Ok(CachingAuthenticator::new(self.create_authenticator()?, &policy))
    }

    /// Cached when a policy is configured, direct otherwise.
    pub fn build(&self) -> Result<Arc<dyn Authenticator>> {
        if self.cache_policy.is_some() {
            Ok(Arc::new(self.create_caching_authenticator()?))
        } else {
            info!("No cache policy configured; authenticating every request directly");
            Ok(Arc::new(self.create_authenticator()?))
        }
    }
}
