use anyhow::{anyhow, Context, Result};
use portmap_mapper::{RoutingTable, TypeTable};
use portmap_matcher::{ClassifierRules, ScoringRules};
use portmap_report::ReportConfig;
use portmap_scanner::{SourceConfig, TargetConfig};
use portmap_synth::StubStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "portmap.toml";

/// Everything a run can be tuned with. Every section and field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub source: SourceConfig,
    pub target: TargetConfig,
    pub routing: RoutingTable,
    pub types: TypeTable,
    pub classify: ClassifierRules,
    pub scoring: ScoringRules,
    pub stubs: StubStyle,
    pub report: ReportConfig,
}

impl ProjectConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid portmap configuration")?;
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("In {}", path.display()))
    }

    /// An explicit path must exist; otherwise `portmap.toml` in the project
    /// root is used when present and the defaults when not.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = project_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("Loading {}", candidate.display());
            return Self::load(&candidate);
        }
        log::debug!("No {CONFIG_FILE_NAME} in {}, using defaults", project_root.display());
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.source.validate()?;
        self.target.validate()?;
        self.routing.validate()?;
        self.classify.validate()?;
        self.report.validate()?;
        if self.types.fallback.trim().is_empty() {
            return Err("types.fallback must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portmap_protocol::Status;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_file_means_defaults() {
        let config = ProjectConfig::from_toml("").unwrap();
        assert_eq!(config.source.root_package, "org.apache.commons.lang3");
        assert_eq!(config.target.extension, "cj");
        assert_eq!(config.routing.root_namespace, "commons_lang4cj");
        assert_eq!(config.scoring.group_tail, 20);
    }

    #[test]
    fn sections_override_defaults() {
        let config = ProjectConfig::from_toml(
            r#"
            [source]
            root = "vendor/lang3"

            [target]
            src_dir = "cj/src"

            [classify.overrides]
            StringUtils = "subset"

            [report]
            title = "Lang port"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.root, Path::new("vendor/lang3"));
        assert_eq!(config.target.src_dir, Path::new("cj/src"));
        assert_eq!(
            config.classify.overrides.get("StringUtils"),
            Some(&Status::Subset)
        );
        assert_eq!(config.report.title, "Lang port");
        assert_eq!(config.report.matrix_path, Path::new("doc/lang3_migration_matrix.md"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ProjectConfig::from_toml("[target]\nextention = \"cj\"\n").is_err());
        assert!(ProjectConfig::from_toml("[nope]\n").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ProjectConfig::from_toml("[report]\nend_marker = \"\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("markers"));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let config = ProjectConfig::discover(temp.path(), None).unwrap();
        assert_eq!(config.target.src_dir, Path::new("src"));

        fs::write(temp.path().join(CONFIG_FILE_NAME), "[target]\nextension = \"cjx\"\n").unwrap();
        let config = ProjectConfig::discover(temp.path(), None).unwrap();
        assert_eq!(config.target.extension, "cjx");

        assert!(ProjectConfig::discover(temp.path(), Some(&temp.path().join("missing.toml"))).is_err());
    }
}
