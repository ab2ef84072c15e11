//! Error types for the store layer.

use kindsync_types::EntityId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity not found where one was required.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// An entity with this alias already exists.
    #[error("alias already in use: {0}")]
    AliasTaken(String),

    /// An entity with this identity already exists.
    #[error("identity already in use: {0}")]
    IdentityTaken(EntityId),

    /// IO error (snapshot file).
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
