//! Allowed peers
//!
//! The peer model, the registry it lives in, and the two static sources a registry can
//! be populated from.

pub mod flat_file;
pub mod inline;
pub mod model;
pub mod properties;
pub mod registry;

use crate::error::Result;

pub use flat_file::FlatFilePeerSource;
pub use inline::{DEFAULT_DELIMITER, InlinePeerSource};
pub use model::Peer;
pub use registry::PeerRegistry;

/// A raw credential source, consumed exactly once to build a registry.
pub trait PeerSource {
    fn into_registry(self) -> Result<PeerRegistry>;
}
