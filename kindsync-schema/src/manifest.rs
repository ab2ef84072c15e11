//! Kind manifests (`kinds.toml`): a kind hierarchy declared in TOML.
//!
//! ```toml
//! [base]
//! name = "Page"
//!
//! [[base.children]]
//! name = "Home"
//! properties = [
//!     { field_name = "Title", declared_type = "text" },
//!     { field_name = "Hide In Menu", store_alias = "umbracoNaviHide", declared_type = "bool" },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{KindNode, SchemaError, SchemaResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindManifest {
    /// Root of the hierarchy; discovery starts below it.
    pub base: KindNode,
}

impl KindManifest {
    /// Parses and validates a manifest.
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates a manifest file.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that every node has a name and every property a field name.
    pub fn validate(&self) -> SchemaResult<()> {
        validate_node(&self.base)
    }
}

fn validate_node(node: &KindNode) -> SchemaResult<()> {
    if node.name.trim().is_empty() {
        return Err(SchemaError::ManifestInvalid("kind name is required".into()));
    }
    if node.alias.as_deref().is_some_and(|a| a.trim().is_empty()) {
        return Err(SchemaError::ManifestInvalid(format!(
            "kind '{}' has an empty alias",
            node.name
        )));
    }
    for property in &node.properties {
        if property.field_name.trim().is_empty() {
            return Err(SchemaError::ManifestInvalid(format!(
                "kind '{}' declares a property without a field name",
                node.name
            )));
        }
    }
    node.children.iter().try_for_each(validate_node)
}
