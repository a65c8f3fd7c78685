//! Error types for slide editor operations.
//!
//! The editor itself is total: stale ids, bad numeric input and unknown drop
//! payloads fall back to no-ops. Errors only surface at the edges where data
//! crosses in or out of the core (configuration files, JSON actions, state
//! inspection).

use thiserror::Error;

/// Result type for slide editor operations.
pub type SlideResult<T> = Result<T, SlideError>;

/// Errors that can occur at the edges of the slide editor.
#[derive(Debug, Error)]
pub enum SlideError {
    /// State or action serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration values are out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An action could not be decoded from its external representation.
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}
