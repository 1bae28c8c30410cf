//! Error types for the cfdns system
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for cfdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the cfdns system
#[derive(Error, Debug)]
pub enum Error {
    /// No zone with the given name exists in the account
    #[error("No zone with name '{0}' found")]
    ZoneNotFound(String),

    /// The zone exists but holds no record with the given name
    #[error("No dns record with name '{name}' found in zone '{zone}'")]
    RecordNotFound {
        /// Zone name that was searched
        zone: String,
        /// Record name that was searched for
        name: String,
    },

    /// Outbound payload failed sanitization
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request could not be built, sent, or its body read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote side answered with a non-success HTTP status
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// Provider reported a failure inside a well-formed response,
    /// or the response did not have the expected shape
    #[error("API error: {0}")]
    Api(String),

    /// External value discovery (public IP lookup) failed
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O errors (token file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create a "record not found" error
    pub fn record_not_found(zone: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RecordNotFound {
            zone: zone.into(),
            name: name.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a non-success status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for either not-found kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound(_) | Self::RecordNotFound { .. })
    }
}
