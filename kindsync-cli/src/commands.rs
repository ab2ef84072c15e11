//! The work behind each subcommand. Every command loads the store snapshot,
//! runs one engine operation, and writes the snapshot back. Reconcile
//! commands write only on success.

use anyhow::{Context, Result};
use kindsync_hierarchy::{FsArtifactSource, HierarchyBuilder, RebuildReport};
use kindsync_schema::{KindManifest, SchemaDiscoverer};
use kindsync_store::{EntityStore, MemoryStore};
use kindsync_sync::{EntitySynchronizer, ReconcileReport};
use kindsync_types::{Actor, EntityId};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::EngineConfig;

/// Reconciles the kinds declared in a TOML manifest.
pub fn reconcile(manifest: &Path, store_path: &Path, config: &EngineConfig, actor: &Actor) -> Result<ReconcileReport> {
    let manifest = KindManifest::load(manifest)
        .with_context(|| format!("Failed to load kind manifest {}", manifest.display()))?;
    let discoverer = SchemaDiscoverer::new(config.schema.clone());
    let mut store = open_store(store_path)?;

    let (_, report) = EntitySynchronizer::default()
        .reconcile_schema(&discoverer, &manifest.base, &mut store, actor)
        .context("Reconcile failed")?;

    persist_store(&store, store_path)?;
    Ok(report)
}

/// Reconciles one kind per view file in `dir`.
pub fn views(dir: &Path, store_path: &Path, config: &EngineConfig, actor: &Actor) -> Result<ReconcileReport> {
    let kinds = SchemaDiscoverer::new(config.schema.clone())
        .discover_views(dir)
        .with_context(|| format!("Failed to discover views in {}", dir.display()))?;
    let mut store = open_store(store_path)?;

    let report = EntitySynchronizer::default()
        .reconcile(&kinds, &mut store, actor)
        .context("Views reconcile failed")?;

    persist_store(&store, store_path)?;
    Ok(report)
}

/// Rebuilds parent links from the artifacts in `artifacts`.
///
/// Links updated before a failing entity are kept: the snapshot is written
/// whether or not the pass completes.
pub fn rebuild(artifacts: &Path, store_path: &Path, config: &EngineConfig) -> Result<RebuildReport> {
    let builder = HierarchyBuilder::new(config.hierarchy.clone()).context("Invalid hierarchy settings")?;
    let source = FsArtifactSource::new(artifacts, config.hierarchy.artifact_extension.clone());
    let mut store = open_store(store_path)?;

    let outcome = builder.rebuild(&mut store, &source);
    if outcome.is_err() && store.save_count() > 0 {
        warn!(saved = store.save_count(), "Rebuild stopped early, keeping links already updated");
    }
    persist_store(&store, store_path)?;
    outcome.context("Hierarchy rebuild failed")
}

/// One line of `kindsync list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub identity: EntityId,
    pub alias: String,
    pub kind: Option<String>,
    pub parent: Option<String>,
}

impl fmt::Display for EntityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5}  {:<24} kind={:<16} parent={}",
            self.identity,
            self.alias,
            self.kind.as_deref().unwrap_or("-"),
            self.parent.as_deref().unwrap_or("-")
        )
    }
}

/// Lists the entities in a store snapshot, in store order.
pub fn list(store_path: &Path) -> Result<Vec<EntityRow>> {
    let store = open_store(store_path)?;
    let entities = store.list_all()?;
    let aliases: HashMap<EntityId, &str> = entities.iter().map(|e| (e.identity, e.alias.as_str())).collect();

    Ok(entities
        .iter()
        .map(|e| EntityRow {
            identity: e.identity,
            alias: e.alias.clone(),
            kind: e.kind.clone(),
            parent: e.parent.map(|p| {
                aliases
                    .get(&p)
                    .map_or_else(|| format!("#{p}"), |a| a.to_string())
            }),
        })
        .collect())
}

fn open_store(path: &Path) -> Result<MemoryStore> {
    let store = MemoryStore::open(path).with_context(|| format!("Failed to open store {}", path.display()))?;
    info!(path = %path.display(), entities = store.len(), "Opened store snapshot");
    Ok(store)
}

fn persist_store(store: &MemoryStore, path: &Path) -> Result<()> {
    store
        .persist(path)
        .with_context(|| format!("Failed to write store {}", path.display()))?;
    info!(path = %path.display(), entities = store.len(), "Wrote store snapshot");
    Ok(())
}
