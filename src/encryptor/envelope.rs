//! `ENC(...)` markers
//!
//! Config authors wrap hashed secrets as `ENC(<hash>)` so they can tell them apart from
//! plaintext ones. Stripping the wrapper is purely textual.

use regex::Regex;
use std::sync::LazyLock;

static ENCRYPTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ENC\((.+)\)").expect("ENC pattern is valid"));

/// Returns the part inside the first `ENC(...)` found in `value`, or `value` untouched.
pub fn unwrap_encrypted(value: &str) -> &str {
    ENCRYPTED_PATTERN
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(value, |inner| inner.as_str())
}

/// Renders a hash the way it should be pasted into a credential source.
pub fn wrap_encrypted(hash: &str) -> String {
    format!("ENC({hash})")
}
