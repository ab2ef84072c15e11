//! Schema discovery for kindsync.
//!
//! A schema is declared as a tree of [`KindNode`]s rooted at a base kind,
//! either in code or in a TOML [`KindManifest`]. The [`SchemaDiscoverer`]
//! walks that tree and produces one [`EntityKindDescriptor`] per leaf kind,
//! recursing through category nodes (the base itself, generic kinds, and
//! kinds in framework-generated namespaces).
//!
//! Views-mode discovery ([`SchemaDiscoverer::discover_views`]) derives the
//! kinds from the artifact files in a directory instead.
//!
//! [`EntityKindDescriptor`]: kindsync_model::EntityKindDescriptor

mod config;
mod discover;
mod error;
mod manifest;
mod node;

pub use config::SchemaConfig;
pub use discover::SchemaDiscoverer;
pub use error::{SchemaError, SchemaResult};
pub use manifest::KindManifest;
pub use node::KindNode;
