//! Flat-file peer source
//!
//! Reads `user=password` pairs in properties format. Values wrapped in `ENC(...)` have
//! the wrapper stripped.
//!
//! Files are decoded as UTF-8 when they are valid UTF-8 and as ISO-8859-1 otherwise, so
//! Latin-1 files written for `java.util.Properties` load unchanged.

use super::{Peer, PeerRegistry, PeerSource, properties};
use crate::encryptor::unwrap_encrypted;
use crate::error::{ConfigurationError, Result};
use log::{error, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct FlatFilePeerSource<R> {
    origin: PathBuf,
    reader: R,
}

impl FlatFilePeerSource<File> {
    /// Opens `path`. A missing or unreadable file is a configuration error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = File::open(path).map_err(|source| {
            error!("Could not open allowed peers file {}: {}", path.display(), source);
            ConfigurationError::CredentialSource {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            origin: path.to_path_buf(),
            reader,
        })
    }
}

impl<R: Read> FlatFilePeerSource<R> {
    /// Wraps an already open stream. `origin` only appears in error messages.
    pub fn from_reader(origin: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            origin: origin.into(),
            reader,
        }
    }
}

impl<R: Read> PeerSource for FlatFilePeerSource<R> {
    fn into_registry(self) -> Result<PeerRegistry> {
        let Self { origin, mut reader } = self;

        let mut bytes = Vec::new();
        if let Err(source) = reader.read_to_end(&mut bytes) {
            error!("Could not load allowed peers from {}: {}", origin.display(), source);
            return Err(ConfigurationError::CredentialSource { path: origin, source });
        }
        drop(reader);

        let entries = properties::parse(&decode(bytes))?;
        let mut registry = PeerRegistry::with_capacity(entries.len());
        for (username, value) in entries {
            registry.insert(Peer::new(username, unwrap_encrypted(&value)))?;
        }

        info!(
            "Loaded {} allowed peers from {}",
            registry.len(),
            origin.display()
        );
        Ok(registry)
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|invalid| invalid.into_bytes().into_iter().map(char::from).collect())
}
