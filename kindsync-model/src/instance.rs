use kindsync_types::EntityId;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Entity, EntityKindDescriptor, FieldValue, PropertyDescriptor};

/// An in-memory object of some entity kind.
///
/// The marshaler reads and writes fields by name through this trait, so a
/// kind can be backed by a hand-written struct or by the generic [`Instance`].
///
/// Only the field accessors and identity are required. The identifying
/// fields default to empty, and `compute` returns nothing unless a kind
/// overrides it.
pub trait TypedInstance {
    fn descriptor(&self) -> &EntityKindDescriptor;

    fn identity(&self) -> EntityId;

    fn set_identity(&mut self, identity: EntityId);

    /// Current value of a field, `None` when the instance has no such field.
    fn field(&self, field_name: &str) -> Option<FieldValue>;

    /// Assigns a field. Return `Err(message)` to reject the value.
    fn set_field(&mut self, field_name: &str, value: FieldValue) -> Result<(), String>;

    /// Login/name used as the alias of the entity this instance creates.
    fn identifier(&self) -> &str {
        ""
    }

    fn display_name(&self) -> &str {
        self.identifier()
    }

    /// Contact address (e-mail) mirrored onto the entity on every upsert.
    fn contact(&self) -> Option<&str> {
        None
    }

    fn credential(&self) -> Option<&str> {
        None
    }

    fn set_credential(&mut self, credential: Option<String>) {
        let _ = credential;
    }

    /// Called before a load to copy the entity's identifying fields.
    fn bind(&mut self, entity: &Entity) {
        self.set_identity(entity.identity);
    }

    /// Supplies the value of a computed property after the store read.
    /// `None` leaves the field untouched.
    fn compute(&self, property: &PropertyDescriptor, entity: &Entity) -> Option<FieldValue> {
        let _ = (property, entity);
        None
    }
}

/// A generic typed instance: a field map shaped by its kind descriptor.
#[derive(Debug, Clone)]
pub struct Instance {
    kind: Arc<EntityKindDescriptor>,
    identity: EntityId,
    pub identifier: String,
    pub display_name: String,
    pub contact: Option<String>,
    pub credential: Option<String>,
    pub created_at: i64,
    fields: BTreeMap<String, FieldValue>,
}

impl Instance {
    /// A new (identity 0) instance with every field at its type's default.
    pub fn new(kind: Arc<EntityKindDescriptor>) -> Self {
        let fields = kind
            .properties
            .iter()
            .map(|p| (p.field_name.clone(), FieldValue::default_for(&p.declared_type)))
            .collect();
        Self {
            kind,
            identity: EntityId::NEW,
            identifier: String::new(),
            display_name: String::new(),
            contact: None,
            credential: None,
            created_at: 0,
            fields,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Builder-style field assignment. Unknown field names are ignored.
    pub fn with_field(mut self, field_name: &str, value: impl Into<FieldValue>) -> Self {
        if let Some(slot) = self.fields.get_mut(field_name) {
            *slot = value.into();
        }
        self
    }

    pub fn kind(&self) -> &Arc<EntityKindDescriptor> {
        &self.kind
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldValue> {
        self.fields.get(field_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TypedInstance for Instance {
    fn descriptor(&self) -> &EntityKindDescriptor {
        &self.kind
    }

    fn identity(&self) -> EntityId {
        self.identity
    }

    fn set_identity(&mut self, identity: EntityId) {
        self.identity = identity;
    }

    fn field(&self, field_name: &str) -> Option<FieldValue> {
        self.fields.get(field_name).cloned()
    }

    fn set_field(&mut self, field_name: &str, value: FieldValue) -> Result<(), String> {
        match self.fields.get_mut(field_name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(format!("kind '{}' has no field '{}'", self.kind.alias, field_name)),
        }
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.identifier
        } else {
            &self.display_name
        }
    }

    fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    fn bind(&mut self, entity: &Entity) {
        self.identity = entity.identity;
        self.identifier = entity.alias.clone();
        self.display_name = entity.display_name.clone();
        self.contact = entity.contact.clone();
        self.created_at = entity.created_at;
    }
}
