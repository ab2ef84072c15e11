//! Error types for schema discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two leaf kinds resolved to the same alias.
    #[error("kind alias '{alias}' is declared by both '{first}' and '{second}'; kind aliases must be unique")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// A leaf kind declares children, which discovery would never visit.
    #[error("kind '{kind}' is a leaf but declares child '{child}'; mark it generic to make it a category")]
    LeafWithChildren { kind: String, child: String },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("manifest validation error: {0}")]
    ManifestInvalid(String),
}
