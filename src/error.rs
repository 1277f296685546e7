//! Focus error types.
//!
//! Runtime update paths never fail: missing references are skipped and
//! invalid geometry clears the overlay. Only configuration can be rejected.

use thiserror::Error;

/// Errors produced while building or loading a focus configuration.
#[derive(Debug, Error)]
pub enum FocusError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The RON source could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
