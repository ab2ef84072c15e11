use kindsync_model::{EntityKindDescriptor, Instance};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Descriptors of the kinds the engine knows how to materialize, by alias.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<String, Arc<EntityKindDescriptor>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every descriptor, replacing earlier ones with the same alias.
    pub fn from_kinds(kinds: impl IntoIterator<Item = EntityKindDescriptor>) -> Self {
        let mut registry = Self::new();
        for kind in kinds {
            registry.register(kind);
        }
        registry
    }

    pub fn register(&mut self, kind: EntityKindDescriptor) -> Arc<EntityKindDescriptor> {
        let kind = Arc::new(kind);
        self.kinds.insert(kind.alias.clone(), Arc::clone(&kind));
        kind
    }

    pub fn get(&self, alias: &str) -> Option<&Arc<EntityKindDescriptor>> {
        self.kinds.get(alias)
    }

    /// A fresh instance of the named kind.
    pub fn instantiate(&self, alias: &str) -> Option<Instance> {
        self.get(alias).map(|kind| Instance::new(Arc::clone(kind)))
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
