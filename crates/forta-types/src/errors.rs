//! # Error Types
//!
//! Validation failures raised while building typed values from untyped input.

use thiserror::Error;

/// Errors raised when an input record violates a type invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string field was absent or empty.
    #[error("{field} must be non-empty string")]
    EmptyField { field: &'static str },

    /// A numeric field could not be parsed as decimal or `0x` hex.
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A numeric field holds a value outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    /// A hex string could not be decoded.
    #[error("invalid hex for {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },
}
