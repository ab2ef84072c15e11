//! Error types for the synchronizer.

use kindsync_types::EntityId;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Preconditions checked before an upsert touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no acting user supplied")]
    MissingActor,

    #[error("instance of kind '{kind}' has an empty identifier")]
    EmptyIdentifier { kind: String },
}

/// Errors that can occur while reconciling or upserting.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mapping(#[from] kindsync_marshal::MappingError),

    #[error(transparent)]
    Schema(#[from] kindsync_schema::SchemaError),

    #[error("store error: {0}")]
    Store(#[from] kindsync_store::StoreError),

    /// The store has no entity where one was required.
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

impl SyncError {
    pub(crate) fn missing_identity(identity: EntityId) -> Self {
        Self::EntityNotFound(format!("identity {identity}"))
    }

    pub(crate) fn missing_alias(alias: &str) -> Self {
        Self::EntityNotFound(format!("alias '{alias}'"))
    }
}
