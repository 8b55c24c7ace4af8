//! Error types for the storage layer
//!
//! A record that does not exist is not an error: lookups return `Ok(None)`.
//! Corrupt local data is not an error either (see [`crate::local::parse_or_empty`]).

use sparktest_client::ClientError;
use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur when using a store
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend was unreachable or answered with a non-2xx status
    #[error("Backend request failed: {0}")]
    Request(#[from] ClientError),

    /// Reading or writing the local medium failed
    #[error("Local storage error: {0}")]
    Medium(#[from] std::io::Error),

    /// A collection could not be encoded
    #[error("Failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A run referenced a definition that does not exist
    #[error("Definition not found: {0}")]
    DefinitionNotFound(String),

    /// The request is missing required fields
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The operation has no local equivalent
    #[error("{0} is not available without the backend")]
    Unavailable(String),

    /// Both the backend and the local fallback failed
    #[error("Backend failed ({remote}) and local fallback failed ({local})")]
    FallbackFailed {
        remote: Box<StorageError>,
        local: Box<StorageError>,
    },
}

impl StorageError {
    /// Whether the error is a request failure the hybrid store may recover from
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Whether the local medium itself failed, as opposed to answering
    pub fn is_local_failure(&self) -> bool {
        matches!(self, Self::Medium(_) | Self::Serialization(_))
    }
}
