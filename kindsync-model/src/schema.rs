use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Declared schema for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityKindDescriptor {
    /// Unique name within the kind-space; also the alias of the persisted entity.
    pub alias: String,
    /// Human-readable name (defaults to the alias).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties in declaration order. Load and save walk them in this order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityKindDescriptor {
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            name: alias.clone(),
            alias,
            description: None,
            properties: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
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

    /// Looks up a property by its field name.
    pub fn property(&self, field_name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.field_name == field_name)
    }

    /// Properties that are read from and written to the store (non-computed).
    pub fn stored_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.is_computed)
    }

    /// Properties whose values are supplied by the instance, not the store.
    pub fn computed_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_computed)
    }
}

/// One typed field of a kind and the store slot it maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub field_name: String,
    /// Empty in a manifest means "derive from the field name".
    #[serde(default)]
    pub store_alias: String,
    pub declared_type: DeclaredType,
    /// Skipped by the store read; the instance supplies the value itself.
    #[serde(default)]
    pub is_computed: bool,
}

impl PropertyDescriptor {
    /// A stored property whose alias is derived from the field name.
    pub fn new(field_name: impl Into<String>, declared_type: DeclaredType) -> Self {
        let field_name = field_name.into();
        Self {
            store_alias: derive_store_alias(&field_name),
            field_name,
            declared_type,
            is_computed: false,
        }
    }

    pub fn with_alias(mut self, store_alias: impl Into<String>) -> Self {
        self.store_alias = store_alias.into();
        self
    }

    pub fn computed(mut self) -> Self {
        self.is_computed = true;
        self
    }

    /// Shorthand for a boolean property.
    pub fn bool(field_name: &str) -> Self {
        Self::new(field_name, DeclaredType::Bool)
    }

    /// Shorthand for an integer property.
    pub fn int(field_name: &str) -> Self {
        Self::new(field_name, DeclaredType::Int)
    }

    /// Shorthand for a floating-point property.
    pub fn float(field_name: &str) -> Self {
        Self::new(field_name, DeclaredType::Float)
    }

    /// Shorthand for a text property.
    pub fn text(field_name: &str) -> Self {
        Self::new(field_name, DeclaredType::Text)
    }

    /// Shorthand for a date-time property.
    pub fn datetime(field_name: &str) -> Self {
        Self::new(field_name, DeclaredType::DateTime)
    }

    /// Shorthand for a nullable property wrapping `inner`.
    pub fn nullable(field_name: &str, inner: DeclaredType) -> Self {
        Self::new(field_name, DeclaredType::Nullable(Box::new(inner)))
    }

    /// Shorthand for a property of a named reference type.
    pub fn reference(field_name: &str, type_name: &str) -> Self {
        Self::new(field_name, DeclaredType::Reference(type_name.to_string()))
    }
}

/// Derives a store alias from a field name: spaces removed, first character
/// lower-cased (`"Page Title"` becomes `"pageTitle"`).
pub fn derive_store_alias(field_name: &str) -> String {
    let compact: String = field_name.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = compact.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Semantic type of a declared property.
///
/// The textual form (`bool`, `int`, `nullable<int>`, `ref:MediaLink`) is what
/// kind manifests use and what errors print.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeclaredType {
    Bool,
    Int,
    Float,
    Text,
    DateTime,
    Nullable(Box<DeclaredType>),
    /// A named non-primitive type, usually paired with a registered converter.
    Reference(String),
}

impl DeclaredType {
    pub fn nullable(inner: DeclaredType) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn reference(type_name: impl Into<String>) -> Self {
        Self::Reference(type_name.into())
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("text"),
            Self::DateTime => f.write_str("datetime"),
            Self::Nullable(inner) => write!(f, "nullable<{inner}>"),
            Self::Reference(name) => write!(f, "ref:{name}"),
        }
    }
}

impl FromStr for DeclaredType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s
            .strip_prefix("nullable<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Ok(Self::nullable(inner.parse()?));
        }
        if let Some(name) = s.strip_prefix("ref:") {
            let name = name.trim();
            if name.is_empty() {
                return Err(ModelError::UnknownType(s.to_string()));
            }
            return Ok(Self::Reference(name.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Int),
            "float" | "number" => Ok(Self::Float),
            "text" | "string" => Ok(Self::Text),
            "datetime" | "date_time" => Ok(Self::DateTime),
            _ => Err(ModelError::UnknownType(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeclaredType {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeclaredType> for String {
    fn from(value: DeclaredType) -> Self {
        value.to_string()
    }
}
