//! Error types for the marshaling layer.

use kindsync_types::EntityId;
use thiserror::Error;

/// Result type for marshaling operations.
pub type MarshalResult<T> = Result<T, MappingError>;

/// A value could not be converted between its raw and typed forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConvertError(pub String);

impl ConvertError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur while loading or saving an instance.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The entity's bag has no slot for a declared, non-computed property.
    #[error("property {kind}.{property} has no slot '{store_alias}' in entity {entity}")]
    MissingSlot {
        kind: String,
        /// Field name, as in every other variant.
        property: String,
        store_alias: String,
        entity: EntityId,
    },

    /// A raw value could not be converted to (or from) the declared type.
    #[error("cannot convert property {kind}.{property} to {target} from value '{raw}': {reason}")]
    Conversion {
        kind: String,
        property: String,
        target: String,
        raw: String,
        reason: String,
    },

    /// The instance rejected a converted value.
    #[error("cannot set property {kind}.{property} to '{value}': {reason}")]
    Assign {
        kind: String,
        property: String,
        value: String,
        reason: String,
    },

    /// The entity carries no kind alias, so it cannot back a typed instance.
    #[error("entity {entity} ('{alias}') has no associated kind")]
    MissingKind { entity: EntityId, alias: String },

    /// The entity belongs to a different kind than the instance.
    #[error("entity {entity} is of kind '{found}', expected '{expected}'")]
    KindMismatch {
        entity: EntityId,
        expected: String,
        found: String,
    },
}

impl MappingError {
    /// The `kind.property` path the error refers to, if any.
    pub fn property_path(&self) -> Option<String> {
        match self {
            Self::MissingSlot { kind, property, .. }
            | Self::Conversion { kind, property, .. }
            | Self::Assign { kind, property, .. } => Some(format!("{kind}.{property}")),
            Self::MissingKind { .. } | Self::KindMismatch { .. } => None,
        }
    }
}
