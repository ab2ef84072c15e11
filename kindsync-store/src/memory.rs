//! In-memory entity store with JSON snapshot persistence.

use kindsync_model::{Entity, EntityKindDescriptor};
use kindsync_types::{Actor, EntityId};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::{EntityStore, StoreError, StoreResult};

/// Entities held in creation order, with sequential identities from 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    next_identity: u64,
    entities: Vec<Entity>,
    /// Number of `save` calls, for callers that want to assert on writes.
    #[serde(skip)]
    saves: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_identity: 1,
            entities: Vec::new(),
            saves: 0,
        }
    }

    /// Restores a store from its JSON snapshot.
    pub fn from_json(text: &str) -> StoreResult<Self> {
        let store: Self = serde_json::from_str(text)?;
        store.check_consistency()?;
        Ok(store)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Opens a snapshot file, or starts empty when the file does not exist.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No store snapshot, starting empty");
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Writes the snapshot file.
    pub fn persist(&self, path: &Path) -> StoreResult<()> {
        std::fs::write(path, self.to_json()?).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Inserts an already-built entity, assigning an identity if it has none.
    /// Used to seed fixtures and imports.
    pub fn insert(&mut self, mut entity: Entity) -> StoreResult<EntityId> {
        if self.entities.iter().any(|e| e.alias == entity.alias) {
            return Err(StoreError::AliasTaken(entity.alias));
        }
        if !entity.identity.is_new() && self.entities.iter().any(|e| e.identity == entity.identity) {
            return Err(StoreError::IdentityTaken(entity.identity));
        }
        if entity.identity.is_new() {
            entity.identity = self.allocate();
        } else {
            self.next_identity = self.next_identity.max(entity.identity.as_raw() + 1);
        }
        let identity = entity.identity;
        self.entities.push(entity);
        Ok(identity)
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId::from_raw(self.next_identity);
        self.next_identity += 1;
        id
    }

    fn check_consistency(&self) -> StoreResult<()> {
        let mut identities = HashSet::new();
        let mut aliases = HashSet::new();
        for entity in &self.entities {
            if !identities.insert(entity.identity) {
                return Err(StoreError::InvalidData(format!(
                    "identity {} is used by more than one entity",
                    entity.identity
                )));
            }
            if !aliases.insert(entity.alias.as_str()) {
                return Err(StoreError::InvalidData(format!(
                    "alias '{}' is used by more than one entity",
                    entity.alias
                )));
            }
            if entity.identity.is_new() {
                return Err(StoreError::InvalidData(format!(
                    "entity '{}' has no identity",
                    entity.alias
                )));
            }
            if entity.identity.as_raw() >= self.next_identity {
                return Err(StoreError::InvalidData(format!(
                    "entity '{}' has identity {} beyond next identity {}",
                    entity.alias, entity.identity, self.next_identity
                )));
            }
        }
        Ok(())
    }
}

fn generate_credential() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl EntityStore for MemoryStore {
    fn create(&mut self, kind: &EntityKindDescriptor, alias: &str, actor: &Actor) -> StoreResult<Entity> {
        if self.entities.iter().any(|e| e.alias == alias) {
            return Err(StoreError::AliasTaken(alias.to_string()));
        }

        let mut entity = Entity::new(alias);
        entity.identity = self.allocate();
        entity.kind = Some(kind.alias.clone());
        entity.unique_id = Uuid::new_v4();
        entity.created_at = chrono::Utc::now().timestamp();
        entity.created_by = actor.name.clone();
        entity.credential = Some(generate_credential());
        for property in kind.stored_properties() {
            entity.add_slot(property.store_alias.clone());
        }

        debug!(alias = %alias, identity = %entity.identity, kind = %kind.alias, "Created entity");
        self.entities.push(entity.clone());
        Ok(entity)
    }

    fn find_by_identity(&self, identity: EntityId) -> StoreResult<Option<Entity>> {
        Ok(self.entities.iter().find(|e| e.identity == identity).cloned())
    }

    fn find_by_alias(&self, alias: &str) -> StoreResult<Option<Entity>> {
        Ok(self.entities.iter().find(|e| e.alias == alias).cloned())
    }

    fn find_by_contact(&self, contact: &str) -> StoreResult<Option<Entity>> {
        Ok(self
            .entities
            .iter()
            .find(|e| e.contact.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(contact)))
            .cloned())
    }

    fn list_all(&self) -> StoreResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }

    fn save(&mut self, entity: &Entity) -> StoreResult<()> {
        if self
            .entities
            .iter()
            .any(|e| e.alias == entity.alias && e.identity != entity.identity)
        {
            return Err(StoreError::AliasTaken(entity.alias.clone()));
        }
        let slot = self
            .entities
            .iter_mut()
            .find(|e| e.identity == entity.identity)
            .ok_or_else(|| StoreError::NotFound(entity.identity.to_string()))?;
        *slot = entity.clone();
        self.saves += 1;
        debug!(alias = %entity.alias, identity = %entity.identity, "Saved entity");
        Ok(())
    }
}
