//! Core model for kindsync.
//!
//! Defines the types every other kindsync crate is written against:
//! - [`Entity`]: the persisted record (identity, alias, raw property bag, parent link)
//! - [`EntityKindDescriptor`] / [`PropertyDescriptor`]: the declared schema of one kind
//! - [`DeclaredType`]: the semantic type of a declared property
//! - [`FieldValue`]: a typed field value on the in-memory side
//! - [`TypedInstance`]: the capability an in-memory object exposes to the marshaler
//! - [`Instance`]: a generic field-map implementation of `TypedInstance`

mod entity;
mod instance;
mod schema;
mod value;

pub use entity::Entity;
pub use instance::{Instance, TypedInstance};
pub use schema::{derive_store_alias, DeclaredType, EntityKindDescriptor, PropertyDescriptor};
pub use value::FieldValue;

/// Errors raised while building model types.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown declared type: {0}")]
    UnknownType(String),
}
