//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when writing to an attribute store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the write.
    #[error("write rejected for {kind}/{id}/{key}: {reason}")]
    Rejected {
        kind: String,
        id: u64,
        key: String,
        reason: String,
    },

    /// Attribute keys must be non-empty.
    #[error("attribute key must not be empty")]
    EmptyKey,

    /// Snapshot serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend failure (connection, lock, ...).
    #[error("backend error: {0}")]
    Backend(String),
}
