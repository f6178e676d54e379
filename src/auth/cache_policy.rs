//! Cache policy
//!
//! Parses cache specifications such as `maximumSize=100, expireAfterAccess=10m`.
//! Without `maximumSize` the cache is still bounded, at [`DEFAULT_MAXIMUM_SIZE`] entries.

use crate::error::ConfigurationError;
use std::str::FromStr;
use std::time::Duration;

/// Entry bound applied when the spec leaves out `maximumSize`.
pub const DEFAULT_MAXIMUM_SIZE: u64 = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub maximum_size: Option<u64>,
    pub expire_after_access: Option<Duration>,
    pub expire_after_write: Option<Duration>,
    pub initial_capacity: Option<usize>,
}

impl CachePolicy {
    /// The configured `maximumSize`, or the default bound.
    pub fn max_capacity(&self) -> u64 {
        self.maximum_size.unwrap_or(DEFAULT_MAXIMUM_SIZE)
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigurationError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ConfigurationError::InvalidCachePolicy {
            spec: spec.to_string(),
            reason,
        };

        let mut policy = CachePolicy::default();
        for option in spec.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = option
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| invalid(format!("option {option:?} has no value")))?;

            let duplicate = match key {
                "maximumSize" => policy
                    .maximum_size
                    .replace(parse_number(key, value).map_err(&invalid)?)
                    .is_some(),
                "initialCapacity" => policy
                    .initial_capacity
                    .replace(parse_number(key, value).map_err(&invalid)?)
                    .is_some(),
                "expireAfterAccess" => policy
                    .expire_after_access
                    .replace(parse_duration(key, value).map_err(&invalid)?)
                    .is_some(),
                "expireAfterWrite" => policy
                    .expire_after_write
                    .replace(parse_duration(key, value).map_err(&invalid)?)
                    .is_some(),
                other => return Err(invalid(format!("unknown option {other:?}"))),
            };
            if duplicate {
                return Err(invalid(format!("{key} was already set")));
            }
        }

        Ok(policy)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{key} expects a non-negative integer, got {value:?}"))
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, String> {
    humantime::parse_duration(value).map_err(|e| format!("{key} expects a duration: {e}"))
}
