//! Declared kind hierarchy.

use kindsync_model::PropertyDescriptor;
use serde::{Deserialize, Serialize};

/// One node of a declared kind hierarchy.
///
/// Properties declared on a category node are inherited by every leaf
/// below it, ahead of the leaf's own properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindNode {
    /// Type name; also the alias unless `alias` overrides it.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Parametrized kinds are categories, never leaves.
    #[serde(default)]
    pub generic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub children: Vec<KindNode>,
}

impl KindNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            namespace: None,
            generic: false,
            description: None,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn generic(mut self) -> Self {
        self.generic = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_child(mut self, child: KindNode) -> Self {
        self.children.push(child);
        self
    }

    /// The alias this node's entity is stored under.
    pub fn resolved_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Name qualified with the namespace, for diagnostics.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
