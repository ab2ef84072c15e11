//! Reconciles declared kinds against the store and upserts typed instances.

use kindsync_marshal::Marshaler;
use kindsync_model::{Entity, EntityKindDescriptor, TypedInstance};
use kindsync_schema::{KindNode, SchemaDiscoverer, SchemaError};
use kindsync_store::EntityStore;
use kindsync_types::{Actor, EntityId};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{SyncError, SyncResult, ValidationError};

/// One kind handled by a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledKind {
    pub alias: String,
    pub identity: EntityId,
}

/// Outcome of [`EntitySynchronizer::reconcile`], in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<ReconciledKind>,
    pub existing: Vec<ReconciledKind>,
}

impl ReconcileReport {
    /// Identity of the persisted entity for `alias`, whether it was created
    /// in this pass or already present.
    pub fn identity_of(&self, alias: &str) -> Option<EntityId> {
        self.created
            .iter()
            .chain(&self.existing)
            .find(|k| k.alias == alias)
            .map(|k| k.identity)
    }

    pub fn created_aliases(&self) -> Vec<&str> {
        self.created.iter().map(|k| k.alias.as_str()).collect()
    }

    pub fn existing_aliases(&self) -> Vec<&str> {
        self.existing.iter().map(|k| k.alias.as_str()).collect()
    }

    /// True when the pass created nothing.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Keeps the persisted entity set in line with the declared schema and
/// writes typed instances through the [`Marshaler`].
#[derive(Debug, Clone, Default)]
pub struct EntitySynchronizer {
    marshaler: Marshaler,
}

impl EntitySynchronizer {
    pub fn new(marshaler: Marshaler) -> Self {
        Self { marshaler }
    }

    pub fn marshaler(&self) -> &Marshaler {
        &self.marshaler
    }

    /// Creates a store entity for every kind that has none. Never updates or
    /// deletes. The persisted set is read once, before the first create.
    ///
    /// Kinds sharing an alias are rejected before the store is touched.
    pub fn reconcile<S>(&self, kinds: &[EntityKindDescriptor], store: &mut S, actor: &Actor) -> SyncResult<ReconcileReport>
    where
        S: EntityStore + ?Sized,
    {
        check_unique_aliases(kinds)?;

        let mut persisted: HashMap<String, EntityId> = store
            .list_all()?
            .into_iter()
            .map(|e| (e.alias, e.identity))
            .collect();

        let mut report = ReconcileReport::default();
        for kind in kinds {
            if let Some(identity) = persisted.get(&kind.alias) {
                debug!(alias = %kind.alias, identity = %identity, "Kind already persisted");
                report.existing.push(ReconciledKind {
                    alias: kind.alias.clone(),
                    identity: *identity,
                });
                continue;
            }

            let entity = store.create(kind, &kind.alias, actor)?;
            info!(alias = %kind.alias, identity = %entity.identity, actor = %actor, "Created entity for kind");
            persisted.insert(kind.alias.clone(), entity.identity);
            report.created.push(ReconciledKind {
                alias: kind.alias.clone(),
                identity: entity.identity,
            });
        }

        info!(
            created = report.created.len(),
            existing = report.existing.len(),
            "Reconcile pass complete"
        );
        Ok(report)
    }

    /// Discovers the kinds under `base` and reconciles them.
    ///
    /// Returns the discovered descriptors with the report so callers can
    /// register them for typed lookups.
    pub fn reconcile_schema<S>(
        &self,
        discoverer: &SchemaDiscoverer,
        base: &KindNode,
        store: &mut S,
        actor: &Actor,
    ) -> SyncResult<(Vec<EntityKindDescriptor>, ReconcileReport)>
    where
        S: EntityStore + ?Sized,
    {
        let kinds = discoverer.discover(base)?;
        let report = self.reconcile(&kinds, store, actor)?;
        Ok((kinds, report))
    }

    /// Creates or updates the store entity backing `instance`.
    ///
    /// A new instance (identity 0) gets an entity aliased by its identifier,
    /// and takes the canonical identity back from the store. The entity's
    /// display name and contact are then overwritten from the instance and
    /// every stored property is marshaled before the entity is persisted.
    pub fn upsert<I, S>(&self, instance: &mut I, store: &mut S, actor: Option<&Actor>) -> SyncResult<Entity>
    where
        I: TypedInstance + ?Sized,
        S: EntityStore + ?Sized,
    {
        let actor = actor.ok_or(ValidationError::MissingActor)?;
        if instance.identifier().trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier {
                kind: instance.descriptor().alias.clone(),
            }
            .into());
        }

        let mut entity = if instance.identity().is_new() {
            self.create_for(instance, store, actor)?
        } else {
            let identity = instance.identity();
            store
                .find_by_identity(identity)?
                .ok_or_else(|| SyncError::missing_identity(identity))?
        };

        entity.display_name = instance.display_name().to_string();
        entity.contact = instance.contact().map(str::to_string);

        let written = self.marshaler.save(instance, &mut entity)?;
        store.save(&entity)?;
        info!(
            alias = %entity.alias,
            identity = %entity.identity,
            written,
            actor = %actor,
            "Upserted instance"
        );
        Ok(entity)
    }

    fn create_for<I, S>(&self, instance: &mut I, store: &mut S, actor: &Actor) -> SyncResult<Entity>
    where
        I: TypedInstance + ?Sized,
        S: EntityStore + ?Sized,
    {
        let alias = instance.identifier().to_string();
        store.create(instance.descriptor(), &alias, actor)?;

        // Re-read so store-assigned fields come from the persisted copy.
        let mut entity = store
            .find_by_alias(&alias)?
            .ok_or_else(|| SyncError::missing_alias(&alias))?;

        instance.set_identity(entity.identity);
        match instance.credential() {
            Some(credential) => entity.credential = Some(credential.to_string()),
            None => instance.set_credential(entity.credential.clone()),
        }
        debug!(alias = %alias, identity = %entity.identity, "Created entity for instance");
        Ok(entity)
    }
}

fn check_unique_aliases(kinds: &[EntityKindDescriptor]) -> SyncResult<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for kind in kinds {
        if let Some(first) = seen.insert(&kind.alias, &kind.name) {
            return Err(SchemaError::DuplicateAlias {
                alias: kind.alias.clone(),
                first: first.to_string(),
                second: kind.name.clone(),
            }
            .into());
        }
    }
    Ok(())
}
