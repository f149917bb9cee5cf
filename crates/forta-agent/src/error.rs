//! Error types for the agent SDK

use forta_bloom_filter::FilterError;
use forta_types::ValidationError;
use thiserror::Error;

/// Errors from parsing an event ABI declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("Malformed event declaration: {0}")]
    Malformed(String),

    #[error("Unsupported parameter type: {0}")]
    UnsupportedType(String),

    #[error("Anonymous events cannot be matched by topic")]
    Anonymous,
}

/// Errors from the Forta GraphQL API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL errors: {0}")]
    Graphql(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from JWT issuance and verification.
///
/// Policy failures (wrong algorithm, missing claims, expiry, signer mismatch)
/// are not errors; `verify_jwt` reports them as `Ok(false)`.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid signature: {0}")]
    Signature(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    Response(String),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {0} must contain a JSON object")]
    NotAnObject(String),

    #[error("jsonRpcUrl must begin with http(s)")]
    InvalidJsonRpcUrl,
}

/// Errors a handler may return.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Other(String),
}
