//! Error handling
//!
//! Defines the configuration error type shared by every startup path.

pub mod types;

pub use types::*;
