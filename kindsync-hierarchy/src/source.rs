use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{HierarchyError, HierarchyResult};

/// Supplies the artifact text for an entity, by alias.
pub trait ArtifactSource {
    fn read_text(&self, alias: &str) -> HierarchyResult<String>;
}

/// Reads `<root>/<alias>.<extension>`.
#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    root: PathBuf,
    extension: String,
}

impl FsArtifactSource {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, alias: &str) -> PathBuf {
        self.root.join(format!("{alias}.{}", self.extension))
    }
}

impl ArtifactSource for FsArtifactSource {
    fn read_text(&self, alias: &str) -> HierarchyResult<String> {
        let path = self.path_for(alias);
        std::fs::read_to_string(&path).map_err(|source| HierarchyError::Io { path, source })
    }
}

/// Artifact texts held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactSource {
    texts: HashMap<String, String>,
}

impl MemoryArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, alias: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(alias, text);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(alias.into(), text.into());
    }
}

impl ArtifactSource for MemoryArtifactSource {
    fn read_text(&self, alias: &str) -> HierarchyResult<String> {
        self.texts
            .get(alias)
            .cloned()
            .ok_or_else(|| HierarchyError::ArtifactMissing(alias.to_string()))
    }
}
