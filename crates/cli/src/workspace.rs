use crate::config::ProjectConfig;
use anyhow::{Context, Result};
use portmap_matcher::Matcher;
use portmap_protocol::{Assessment, SourceDeclaration};
use portmap_scanner::{SourceExtractor, TargetInventory};
use portmap_synth::{StubRenderer, StubSynthesizer};
use std::path::{Path, PathBuf};

/// Resolved locations plus configuration for one run.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub config: ProjectConfig,
}

impl Workspace {
    pub fn new(
        project_root: PathBuf,
        config: ProjectConfig,
        source_root: Option<PathBuf>,
        target_root: Option<PathBuf>,
    ) -> Self {
        let source_root = source_root.unwrap_or_else(|| config.source.root.clone());
        let target_root = target_root.unwrap_or_else(|| config.target.src_dir.clone());
        Self {
            source_root: resolve(&project_root, &source_root),
            target_root: resolve(&project_root, &target_root),
            project_root,
            config,
        }
    }

    pub fn project_path(&self, path: &Path) -> PathBuf {
        resolve(&self.project_root, path)
    }

    /// `path` relative to the project root when it lives inside it.
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }

    pub fn sources(&self) -> Result<Vec<SourceDeclaration>> {
        SourceExtractor::new(self.config.source.clone())
            .extract_tree(&self.source_root)
            .with_context(|| format!("Failed to scan source tree {}", self.source_root.display()))
    }

    /// A target tree that does not exist yet is an empty port.
    pub fn inventory(&self) -> Result<TargetInventory> {
        if !self.target_root.exists() {
            log::info!(
                "Target tree {} does not exist yet, nothing is ported",
                self.target_root.display()
            );
            return Ok(TargetInventory::default());
        }
        TargetInventory::scan(&self.target_root, &self.config.target)
            .with_context(|| format!("Failed to scan target tree {}", self.target_root.display()))
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.config.scoring.clone(), self.config.classify.clone())
    }

    pub fn assess(&self, sources: &[SourceDeclaration], inventory: &TargetInventory) -> Vec<Assessment> {
        self.matcher().assess(sources, inventory)
    }

    pub fn synthesizer(&self) -> StubSynthesizer {
        let renderer = StubRenderer::new(
            self.config.stubs.clone(),
            self.config.types.clone(),
            self.config.routing.root_namespace.clone(),
            self.config.classify.placeholder_marker.clone(),
        );
        StubSynthesizer::new(
            renderer,
            self.config.routing.clone(),
            self.config.target.extension.clone(),
        )
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn roots_resolve_against_project_root() {
        let ws = Workspace::new(PathBuf::from("/p"), ProjectConfig::default(), None, None);
        assert_eq!(ws.target_root, PathBuf::from("/p/src"));
        assert!(ws.source_root.starts_with("/p"));

        let ws = Workspace::new(
            PathBuf::from("/p"),
            ProjectConfig::default(),
            Some(PathBuf::from("/java")),
            Some(PathBuf::from("port")),
        );
        assert_eq!(ws.source_root, PathBuf::from("/java"));
        assert_eq!(ws.target_root, PathBuf::from("/p/port"));
    }

    #[test]
    fn display_path_is_project_relative() {
        let ws = Workspace::new(PathBuf::from("/p"), ProjectConfig::default(), None, None);
        assert_eq!(ws.display_path(Path::new("/p/src/a.cj")), Path::new("src/a.cj"));
        assert_eq!(ws.display_path(Path::new("/elsewhere/a.cj")), Path::new("/elsewhere/a.cj"));
    }
}
