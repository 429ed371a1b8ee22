//! Error types used throughout the site server

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Veriprint
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VeriprintError {
    /// Upstream could not be reached (connect failure, timeout, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream answered, but not in the shape we expected.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Caller-supplied input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VeriprintError {
    /// Whether the error means the upstream dependency is unavailable or
    /// misbehaving, as opposed to a local problem.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Upstream { .. } | Self::MalformedResponse(_))
    }
}

/// Result type alias for Veriprint operations
pub type Result<T> = std::result::Result<T, VeriprintError>;
