use kindsync_types::{raw_to_text, EntityId, RawValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A persisted record in the backing store.
///
/// Typed data flows in and out through `properties`, an untyped bag keyed by
/// store alias. A slot that exists but holds `null` is distinct from a slot
/// that does not exist at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub identity: EntityId,
    /// Alias of the kind this entity was created for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub alias: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityId>,
    pub unique_id: Uuid,
    pub created_at: i64,
    pub created_by: String,
}

impl Entity {
    /// A not-yet-persisted entity with the given alias and an empty bag.
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            identity: EntityId::NEW,
            kind: None,
            display_name: alias.clone(),
            alias,
            contact: None,
            credential: None,
            properties: BTreeMap::new(),
            parent: None,
            unique_id: Uuid::nil(),
            created_at: 0,
            created_by: String::new(),
        }
    }

    /// Adds an empty (`null`) slot unless one already exists.
    pub fn add_slot(&mut self, store_alias: impl Into<String>) {
        self.properties.entry(store_alias.into()).or_insert(RawValue::Null);
    }

    /// True when the bag has a slot for `store_alias`, whatever its value.
    pub fn has_slot(&self, store_alias: &str) -> bool {
        self.properties.contains_key(store_alias)
    }

    /// Raw value of a slot, `None` when the slot is absent.
    pub fn get_property(&self, store_alias: &str) -> Option<&RawValue> {
        self.properties.get(store_alias)
    }

    /// Writes a slot, creating it if needed. Returns the previous value.
    pub fn set_property(&mut self, store_alias: impl Into<String>, value: RawValue) -> Option<RawValue> {
        self.properties.insert(store_alias.into(), value)
    }

    /// Slot value rendered as text (`None` when the slot is absent).
    pub fn get_text(&self, store_alias: &str) -> Option<String> {
        self.get_property(store_alias).map(raw_to_text)
    }

    /// Extract a string slot without conversion.
    pub fn get_str(&self, store_alias: &str) -> Option<&str> {
        self.get_property(store_alias).and_then(|v| v.as_str())
    }

    pub fn is_new(&self) -> bool {
        self.identity.is_new()
    }
}
