//! Core type definitions for kindsync.
//!
//! This crate defines the small, store-agnostic types shared by every
//! other kindsync crate:
//! - Entity identities (integer keys with a `0` "not yet created" sentinel)
//! - The acting user threaded through create/update operations
//! - Raw property-bag values and their emptiness/truthiness rules
//!
//! Kind descriptors, entities and typed instances live in `kindsync-model`.

mod actor;
mod ids;
mod raw;

pub use actor::Actor;
pub use ids::EntityId;
pub use raw::{is_empty_raw, is_falsy_raw, raw_to_text, RawValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid entity identity: {0}")]
    InvalidIdentity(String),
}
