use kindsync_marshal::Marshaler;
use kindsync_model::{Entity, Instance};
use kindsync_store::EntityStore;
use kindsync_types::EntityId;

use crate::{KindRegistry, SyncResult};

/// Typed lookups over a store.
///
/// Each hit is materialized as an [`Instance`] of its registered kind and
/// populated through the marshaler. Entities whose kind is not registered
/// are skipped. Results keep store order.
pub struct TypedDirectory<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    kinds: &'a KindRegistry,
    marshaler: &'a Marshaler,
}

impl<'a, S: EntityStore + ?Sized> TypedDirectory<'a, S> {
    pub fn new(store: &'a S, kinds: &'a KindRegistry, marshaler: &'a Marshaler) -> Self {
        Self {
            store,
            kinds,
            marshaler,
        }
    }

    pub fn all(&self) -> SyncResult<Vec<Instance>> {
        self.collect(self.store.list_all()?.iter())
    }

    pub fn all_of_kind(&self, kind_alias: &str) -> SyncResult<Vec<Instance>> {
        let entities = self.store.list_all()?;
        self.collect(entities.iter().filter(|e| e.kind.as_deref() == Some(kind_alias)))
    }

    pub fn by_identity(&self, identity: EntityId) -> SyncResult<Option<Instance>> {
        match self.store.find_by_identity(identity)? {
            Some(entity) => self.materialize(&entity),
            None => Ok(None),
        }
    }

    /// Looks up by alias (the login name of identifier-keyed kinds).
    pub fn by_alias(&self, alias: &str) -> SyncResult<Option<Instance>> {
        match self.store.find_by_alias(alias)? {
            Some(entity) => self.materialize(&entity),
            None => Ok(None),
        }
    }

    pub fn by_contact(&self, contact: &str) -> SyncResult<Option<Instance>> {
        match self.store.find_by_contact(contact)? {
            Some(entity) => self.materialize(&entity),
            None => Ok(None),
        }
    }

    /// Case-insensitive substring match against the alias, or against the
    /// display name when `match_display_name` is set.
    pub fn by_name(&self, fragment: &str, match_display_name: bool) -> SyncResult<Vec<Instance>> {
        let needle = fragment.to_lowercase();
        let entities = self.store.list_all()?;
        self.collect(entities.iter().filter(|e| {
            let haystack = if match_display_name {
                &e.display_name
            } else {
                &e.alias
            };
            haystack.to_lowercase().contains(&needle)
        }))
    }

    fn collect<'e>(&self, entities: impl Iterator<Item = &'e Entity>) -> SyncResult<Vec<Instance>> {
        let mut out = Vec::new();
        for entity in entities {
            if let Some(instance) = self.materialize(entity)? {
                out.push(instance);
            }
        }
        Ok(out)
    }

    fn materialize(&self, entity: &Entity) -> SyncResult<Option<Instance>> {
        let Some(mut instance) = entity.kind.as_deref().and_then(|k| self.kinds.instantiate(k)) else {
            return Ok(None);
        };
        self.marshaler.populate(&mut instance, entity)?;
        Ok(Some(instance))
    }
}
