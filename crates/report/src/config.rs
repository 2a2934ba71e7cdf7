use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Full matrix document, rewritten on every run (relative to the project root).
    pub matrix_path: PathBuf,

    /// Hand-maintained document that hosts the generated gap section.
    pub gap_report_path: PathBuf,

    pub begin_marker: String,
    pub end_marker: String,

    /// Heading of the matrix document.
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            matrix_path: PathBuf::from("doc/lang3_migration_matrix.md"),
            gap_report_path: PathBuf::from("doc/migration_gap_report.md"),
            begin_marker: "<!-- AUTO-GENERATED:LANG3-GAPS:BEGIN -->".to_string(),
            end_marker: "<!-- AUTO-GENERATED:LANG3-GAPS:END -->".to_string(),
            title: "Apache Commons Lang3 migration matrix".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), String> {
        let begin = self.begin_marker.trim();
        let end = self.end_marker.trim();
        if begin.is_empty() || end.is_empty() {
            return Err("report markers must not be empty".to_string());
        }
        if begin.contains('\n') || end.contains('\n') {
            return Err("report markers must be single lines".to_string());
        }
        if begin.contains(end) || end.contains(begin) {
            return Err(format!(
                "report markers must not contain each other ({begin:?} / {end:?})"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ReportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_marker_validation() {
        let mut config = ReportConfig::default();

        config.end_marker = config.begin_marker.clone();
        assert!(config.validate().is_err());

        config.end_marker = "  ".to_string();
        assert!(config.validate().is_err());

        config.end_marker = "<!-- END -->\n".to_string();
        config.begin_marker = "<!-- BEGIN\n-->".to_string();
        assert!(config.validate().is_err());
    }
}
