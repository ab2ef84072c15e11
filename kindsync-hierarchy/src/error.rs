//! Error types for hierarchy rebuilding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

#[derive(Debug, Error)]
pub enum HierarchyError {
    /// A directive names a parent that no persisted entity has as alias.
    #[error("'{entity_alias}' names '{referenced_alias}' as its parent, but no entity '{referenced_alias}' exists")]
    UnresolvedParent {
        entity_alias: String,
        referenced_alias: String,
    },

    /// Applying a parent link would close a loop (only when cycle checks are on).
    #[error("parent link would create a cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no artifact for entity '{0}'")]
    ArtifactMissing(String),

    #[error("invalid directive pattern: {0}")]
    InvalidPattern(#[from] regex_lite::Error),

    #[error("store error: {0}")]
    Store(#[from] kindsync_store::StoreError),
}
