//! Rebuilds parent links across the persisted entity set.

use kindsync_store::EntityStore;
use kindsync_types::EntityId;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{ArtifactSource, DirectiveParser, HierarchyConfig, HierarchyError, HierarchyResult};

/// A parent link set during a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    pub alias: String,
    pub parent_alias: String,
}

/// Outcome of [`HierarchyBuilder::rebuild`], in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub updated: Vec<ParentLink>,
    /// Entities whose directive already matched their parent.
    pub unchanged: Vec<String>,
    /// Entities with no directive, an empty one, or the sentinel.
    pub no_directive: Vec<String>,
}

pub struct HierarchyBuilder {
    config: HierarchyConfig,
    parser: DirectiveParser,
}

impl HierarchyBuilder {
    pub fn new(config: HierarchyConfig) -> HierarchyResult<Self> {
        let parser = DirectiveParser::new(&config)?;
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    pub fn parser(&self) -> &DirectiveParser {
        &self.parser
    }

    /// Reads every entity's artifact and points the entity at the parent its
    /// directive names, saving only entities whose parent changes.
    ///
    /// Links are never removed. Stops at the first unresolved reference;
    /// entities saved before it stay saved.
    pub fn rebuild<S, A>(&self, store: &mut S, source: &A) -> HierarchyResult<RebuildReport>
    where
        S: EntityStore + ?Sized,
        A: ArtifactSource + ?Sized,
    {
        let entities = store.list_all()?;
        let by_alias: HashMap<&str, EntityId> =
            entities.iter().map(|e| (e.alias.as_str(), e.identity)).collect();
        let aliases: HashMap<EntityId, &str> =
            entities.iter().map(|e| (e.identity, e.alias.as_str())).collect();
        let mut parents: HashMap<EntityId, EntityId> = entities
            .iter()
            .filter_map(|e| e.parent.map(|p| (e.identity, p)))
            .collect();

        let mut report = RebuildReport::default();
        for entity in &entities {
            let text = source.read_text(&entity.alias)?;
            let referenced = match self.parser.parent_alias(&text) {
                Some(alias) if !alias.is_empty() && alias != self.config.sentinel_alias => alias,
                _ => {
                    debug!(alias = %entity.alias, "No parent directive");
                    report.no_directive.push(entity.alias.clone());
                    continue;
                }
            };

            let parent = *by_alias
                .get(referenced.as_str())
                .ok_or_else(|| HierarchyError::UnresolvedParent {
                    entity_alias: entity.alias.clone(),
                    referenced_alias: referenced.clone(),
                })?;

            if entity.parent == Some(parent) {
                report.unchanged.push(entity.alias.clone());
                continue;
            }

            if self.config.detect_cycles {
                check_cycle(entity.identity, parent, &parents, &aliases)?;
            }

            let mut updated = entity.clone();
            updated.parent = Some(parent);
            store.save(&updated)?;
            parents.insert(entity.identity, parent);
            info!(alias = %entity.alias, parent = %referenced, "Updated parent link");
            report.updated.push(ParentLink {
                alias: entity.alias.clone(),
                parent_alias: referenced,
            });
        }

        info!(
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            no_directive = report.no_directive.len(),
            "Hierarchy rebuild complete"
        );
        Ok(report)
    }
}

/// Fails when `child` is reachable by walking up from `parent`.
fn check_cycle(
    child: EntityId,
    parent: EntityId,
    parents: &HashMap<EntityId, EntityId>,
    aliases: &HashMap<EntityId, &str>,
) -> HierarchyResult<()> {
    let name = |id: EntityId| aliases.get(&id).map_or_else(|| id.to_string(), |a| a.to_string());

    let mut path = vec![name(child)];
    let mut current = Some(parent);
    while let Some(id) = current {
        path.push(name(id));
        if id == child {
            return Err(HierarchyError::Cycle { path });
        }
        // guards against loops already in the store that don't involve `child`
        if path.len() > aliases.len() + 1 {
            break;
        }
        current = parents.get(&id).copied();
    }
    Ok(())
}
