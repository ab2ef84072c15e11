//! Parent/child reconstruction for kindsync entities.
//!
//! Each entity's artifact may carry a directive naming its parent, either as a
//! header attribute (`<%@ Master MasterPageFile="~/Site.master" %>`) or as an
//! assignment (`Layout = "Site.cshtml";`). The [`HierarchyBuilder`] resolves
//! those names against the persisted entities and updates parent links that
//! differ. Entities without a directive, or naming the sentinel alias, are
//! left alone.

mod builder;
mod config;
mod directive;
mod error;
mod source;

pub use builder::{HierarchyBuilder, ParentLink, RebuildReport};
pub use config::{DirectiveMode, HierarchyConfig};
pub use directive::{normalize_reference, DirectiveParser};
pub use error::{HierarchyError, HierarchyResult};
pub use source::{ArtifactSource, FsArtifactSource, MemoryArtifactSource};
