use kindsync_model::{derive_store_alias, EntityKindDescriptor, PropertyDescriptor};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::{KindNode, SchemaConfig, SchemaError, SchemaResult};

/// Enumerates concrete kinds from a declared hierarchy or a views directory.
#[derive(Debug, Clone, Default)]
pub struct SchemaDiscoverer {
    config: SchemaConfig,
}

impl SchemaDiscoverer {
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Walks the sub-kinds of `base` and returns one descriptor per leaf kind,
    /// in declaration order.
    ///
    /// Fails on the first alias that two leaf kinds share, and on a leaf
    /// that declares children (only category nodes are recursed into).
    pub fn discover(&self, base: &KindNode) -> SchemaResult<Vec<EntityKindDescriptor>> {
        let mut walk = Walk {
            discoverer: self,
            base,
            seen: HashMap::new(),
            out: Vec::new(),
        };
        walk.visit_children(base, &base.properties)?;
        debug!(base = %base.name, kinds = walk.out.len(), "Discovered entity kinds");
        Ok(walk.out)
    }

    /// True when `node` is recursed into rather than turned into a kind.
    pub fn is_category(&self, node: &KindNode, base: &KindNode) -> bool {
        node.name == base.name || node.generic || self.is_generated(node)
    }

    fn is_generated(&self, node: &KindNode) -> bool {
        node.namespace
            .as_deref()
            .is_some_and(|ns| self.config.generated_namespaces.iter().any(|g| g == ns))
    }

    /// Derives kinds from the view files directly inside `dir`.
    ///
    /// Each file with the configured extension becomes one kind whose alias is
    /// the file stem with spaces removed. The view-start file is skipped.
    /// Files are visited in name order.
    pub fn discover_views(&self, dir: &Path) -> SchemaResult<Vec<EntityKindDescriptor>> {
        let io_err = |source: std::io::Error| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&self.config.view_extension));
            if path.is_file() && matches_ext {
                files.push(path);
            }
        }
        files.sort();

        let mut seen: HashMap<String, String> = HashMap::new();
        let mut out = Vec::new();
        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let alias: String = stem.chars().filter(|c| *c != ' ').collect();
            if alias.eq_ignore_ascii_case(&self.config.view_start) {
                continue;
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if let Some(first) = seen.insert(alias.clone(), file_name.clone()) {
                return Err(SchemaError::DuplicateAlias {
                    alias,
                    first,
                    second: file_name,
                });
            }
            out.push(EntityKindDescriptor::new(alias).with_name(stem));
        }

        debug!(dir = %dir.display(), kinds = out.len(), "Discovered view kinds");
        Ok(out)
    }
}

struct Walk<'a> {
    discoverer: &'a SchemaDiscoverer,
    base: &'a KindNode,
    /// alias -> qualified name of the kind that claimed it
    seen: HashMap<String, String>,
    out: Vec<EntityKindDescriptor>,
}

impl Walk<'_> {
    fn visit_children(&mut self, parent: &KindNode, inherited: &[PropertyDescriptor]) -> SchemaResult<()> {
        for child in &parent.children {
            let mut properties = inherited.to_vec();
            properties.extend(child.properties.iter().cloned());

            if self.discoverer.is_category(child, self.base) {
                self.visit_children(child, &properties)?;
            } else {
                self.add_leaf(child, properties)?;
            }
        }
        Ok(())
    }

    fn add_leaf(&mut self, node: &KindNode, properties: Vec<PropertyDescriptor>) -> SchemaResult<()> {
        if let Some(child) = node.children.first() {
            return Err(SchemaError::LeafWithChildren {
                kind: node.qualified_name(),
                child: child.name.clone(),
            });
        }
        let alias = node.resolved_alias().to_string();
        let qualified = node.qualified_name();
        if let Some(first) = self.seen.insert(alias.clone(), qualified.clone()) {
            return Err(SchemaError::DuplicateAlias {
                alias,
                first,
                second: qualified,
            });
        }

        let mut descriptor = EntityKindDescriptor::new(alias).with_name(node.name.clone());
        descriptor.description = node.description.clone();
        descriptor.properties = properties
            .into_iter()
            .map(|mut p| {
                if p.store_alias.is_empty() {
                    p.store_alias = derive_store_alias(&p.field_name);
                }
                p
            })
            .collect();
        self.out.push(descriptor);
        Ok(())
    }
}
