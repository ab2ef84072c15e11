//! Entity store layer for kindsync.
//!
//! The backing store is an external collaborator. This crate defines the
//! contract the engine needs from it ([`EntityStore`]) and ships one
//! implementation, [`MemoryStore`], used by tests and by the command-line
//! driver (which persists it as a JSON snapshot).
//!
//! # Contract
//!
//! - identities are assigned by the store on `create` and are never `0`
//! - `list_all` enumerates in a stable order (creation order for `MemoryStore`)
//! - "not found" is `Ok(None)`, never an error

mod error;
mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

use kindsync_model::{Entity, EntityKindDescriptor};
use kindsync_types::{Actor, EntityId};

/// Persistence operations the synchronizer and hierarchy builder rely on.
pub trait EntityStore {
    /// Creates an entity of `kind` under `alias`, with one empty slot per
    /// stored property. Returns the persisted entity with its identity.
    fn create(&mut self, kind: &EntityKindDescriptor, alias: &str, actor: &Actor) -> StoreResult<Entity>;

    fn find_by_identity(&self, identity: EntityId) -> StoreResult<Option<Entity>>;

    fn find_by_alias(&self, alias: &str) -> StoreResult<Option<Entity>>;

    /// Looks up an entity by contact address (case-insensitive).
    fn find_by_contact(&self, contact: &str) -> StoreResult<Option<Entity>>;

    fn list_all(&self) -> StoreResult<Vec<Entity>>;

    /// Persists an existing entity, replacing the stored copy.
    fn save(&mut self, entity: &Entity) -> StoreResult<()>;
}
