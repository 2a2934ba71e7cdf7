use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the source corpus is recognised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Source tree, relative to the project root unless absolute.
    pub root: PathBuf,

    /// Package whose sub-packages form the declaration groups.
    pub root_package: String,

    /// File extension of source files, without the dot.
    pub extension: String,

    /// File names skipped regardless of content (package metadata files).
    pub skip_file_names: Vec<String>,

    /// Path prefixes, relative to the source root, that are never scanned.
    pub exclude_paths: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("../commons-lang/src/main/java/org/apache/commons/lang3"),
            root_package: "org.apache.commons.lang3".to_string(),
            extension: "java".to_string(),
            skip_file_names: vec!["package-info.java".to_string()],
            exclude_paths: Vec::new(),
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_extension("source.extension", &self.extension)?;
        if self.root.as_os_str().is_empty() {
            return Err("source.root must not be empty".to_string());
        }
        if self.root_package.trim().is_empty() {
            return Err("source.root_package must not be empty".to_string());
        }
        Ok(())
    }
}

/// How the target corpus is recognised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Target source directory, relative to the project root unless absolute.
    pub src_dir: PathBuf,

    /// File extension of target files, without the dot.
    pub extension: String,

    /// Path prefixes, relative to the target root, that are never scanned.
    pub exclude_paths: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            extension: "cj".to_string(),
            exclude_paths: Vec::new(),
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_extension("target.extension", &self.extension)?;
        if self.src_dir.as_os_str().is_empty() {
            return Err("target.src_dir must not be empty".to_string());
        }
        Ok(())
    }
}

fn validate_extension(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.starts_with('.') {
        return Err(format!("{field} must not start with '.' (got {value:?})"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        assert!(SourceConfig::default().validate().is_ok());
        assert!(TargetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_extension_validation() {
        let mut config = TargetConfig::default();

        config.extension = ".cj".to_string();
        assert!(config.validate().is_err());

        config.extension = String::new();
        assert!(config.validate().is_err());

        config.extension = "cj".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_root_package_rejected() {
        let config = SourceConfig {
            root_package: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
