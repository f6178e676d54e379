//! Caching authenticator
//!
//! Memoises decisions of a wrapped authenticator, keyed by the exact username/password
//! pair presented. Allowed and denied outcomes are cached alike. Concurrent misses on
//! the same key may both reach the wrapped authenticator.

use super::{AuthOutcome, Authenticator, CachePolicy, audit};
use log::info;
use moka::sync::Cache;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

type CredentialKey = (String, String);

/// Hit/miss counters since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct CachingAuthenticator<A> {
    inner: A,
    cache: Cache<CredentialKey, AuthOutcome>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<A: Authenticator> CachingAuthenticator<A> {
    pub fn new(inner: A, policy: &CachePolicy) -> Self {
        let mut builder = Cache::builder().max_capacity(policy.max_capacity());
        if let Some(capacity) = policy.initial_capacity {
            builder = builder.initial_capacity(capacity);
        }
        if let Some(idle) = policy.expire_after_access {
            builder = builder.time_to_idle(idle);
        }
        if let Some(ttl) = policy.expire_after_write {
            builder = builder.time_to_live(ttl);
        }

        info!("Caching authenticator decisions with policy {:?}", policy);
        Self {
            inner,
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Drops the cached decision for one credential pair.
    pub fn invalidate(&self, username: &str, password: &str) {
        self.cache
            .invalidate(&(username.to_string(), password.to_string()));
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Approximate number of cached decisions.
    pub fn size(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for CachingAuthenticator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingAuthenticator")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl<A: Authenticator> Authenticator for CachingAuthenticator<A> {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        let key = (username.to_string(), password.to_string());
        if let Some(outcome) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            audit::log_cache_hit(username, &outcome);
            return outcome;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = self.inner.authenticate(username, password);
        self.cache.insert(key, outcome.clone());
        outcome
    }
}
