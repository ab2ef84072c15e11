use serde::{Deserialize, Serialize};

/// Settings that control which kinds discovery treats as leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Namespaces whose kinds are generated by the hosting framework and
    /// are never instantiated.
    pub generated_namespaces: Vec<String>,
    /// File extension of view artifacts (views-mode discovery).
    pub view_extension: String,
    /// Stem of the view-start file, which is never a kind.
    pub view_start: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            generated_namespaces: vec!["ASP".to_string()],
            view_extension: "cshtml".to_string(),
            view_start: "_ViewStart".to_string(),
        }
    }
}
