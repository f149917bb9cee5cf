//! Error types for the bloom filter

use forta_types::ValidationError;
use thiserror::Error;

/// Errors raised while building or decoding a bloom filter.
///
/// Queries against a filter whose payload decoded successfully fail only if
/// the hasher itself reports an error.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Bloom filter has no bitset payload")]
    MissingBitset,

    #[error("Malformed base64 bitset: {0}")]
    MalformedPayload(#[from] base64::DecodeError),

    #[error("Failed to hash key: {0}")]
    Hash(std::io::Error),

    #[error("Bitset payload too short: need {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
