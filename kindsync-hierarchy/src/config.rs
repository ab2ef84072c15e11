use serde::{Deserialize, Serialize};

/// How the parent reference is written in an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveMode {
    /// `key="value"` attributes in the header that ends at the first `%>`.
    #[default]
    Attribute,
    /// A `Name = "value"` assignment anywhere in the text.
    Assignment,
}

/// Settings for [`HierarchyBuilder`](crate::HierarchyBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub mode: DirectiveMode,
    /// Attribute holding the parent reference (matched case-insensitively).
    pub attribute_key: String,
    /// Variable assigned the parent reference in assignment mode.
    pub assignment_name: String,
    /// Suffixes stripped from a reference before its last path segment is taken.
    pub suffixes: Vec<String>,
    /// Reference meaning "no parent".
    pub sentinel_alias: String,
    /// Extension of artifact files, without the dot.
    pub artifact_extension: String,
    /// Reject parent links that would make an entity its own ancestor.
    pub detect_cycles: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            mode: DirectiveMode::Attribute,
            attribute_key: "masterPageFile".to_string(),
            assignment_name: "Layout".to_string(),
            suffixes: vec![".master".to_string(), ".cshtml".to_string(), ".vbhtml".to_string()],
            sentinel_alias: "default".to_string(),
            artifact_extension: "master".to_string(),
            detect_cycles: false,
        }
    }
}

impl HierarchyConfig {
    /// Defaults for view files: assignment directives in `.cshtml` artifacts.
    pub fn views() -> Self {
        Self {
            mode: DirectiveMode::Assignment,
            artifact_extension: "cshtml".to_string(),
            ..Self::default()
        }
    }
}
