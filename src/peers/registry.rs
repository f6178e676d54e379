//! Peer registry
//!
//! Insertion-ordered, duplicate-free set of allowed peers. Built once at startup and
//! read concurrently afterwards.

use super::Peer;
use crate::error::{ConfigurationError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    peers: Vec<Peer>,
    index: HashMap<String, usize>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peers: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Adds a peer, refusing an empty username or a second entry for one already present.
    pub fn insert(&mut self, peer: Peer) -> Result<()> {
        if peer.username().is_empty() {
            return Err(ConfigurationError::EmptyUsername);
        }
        if self.index.contains_key(peer.username()) {
            return Err(ConfigurationError::DuplicateUsername(
                peer.username().to_string(),
            ));
        }
        self.index
            .insert(peer.username().to_string(), self.peers.len());
        self.peers.push(peer);
        Ok(())
    }

    /// Exact (username, secret) pair membership.
    pub fn contains(&self, peer: &Peer) -> bool {
        self.find_by_username(peer.username())
            .any(|candidate| candidate == peer)
    }

    /// All peers with the given username. At most one, given the uniqueness invariant.
    pub fn find_by_username<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Peer> {
        self.index
            .get(username)
            .map(|&position| &self.peers[position])
            .into_iter()
    }

    /// Every peer, in the order it was loaded.
    pub fn find_all(&self) -> &[Peer] {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl<'a> IntoIterator for &'a PeerRegistry {
    type Item = &'a Peer;
    type IntoIter = std::slice::Iter<'a, Peer>;

    fn into_iter(self) -> Self::IntoIter {
        self.peers.iter()
    }
}
