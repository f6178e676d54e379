//! Audit logging
//!
//! One line per authentication attempt on the `peer_auth::audit` target. Only the
//! username and the decision are recorded.

use super::AuthOutcome;
use log::debug;

pub const AUDIT_TARGET: &str = "peer_auth::audit";

/// Log an authentication attempt
pub fn log_attempt(username: &str, outcome: &AuthOutcome) {
    if outcome.is_allowed() {
        debug!(target: AUDIT_TARGET, "{} authenticated and allowed to request service", username);
    } else {
        debug!(target: AUDIT_TARGET, "{} is not known in our list of allowed peers", username);
    }
}

/// Log a cached decision being reused
pub fn log_cache_hit(username: &str, outcome: &AuthOutcome) {
    debug!(
        target: AUDIT_TARGET,
        "{} served from cache (allowed: {})",
        username,
        outcome.is_allowed()
    );
}
