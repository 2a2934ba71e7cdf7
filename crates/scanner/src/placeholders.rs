use crate::config::TargetConfig;
use crate::error::Result;
use crate::walk::{read_lossy, FileScanner};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One line of the target corpus still carrying the placeholder marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderHit {
    pub path: PathBuf,
    /// 1-indexed
    pub line_no: usize,
    pub line: String,
}

/// Every marker occurrence under `root`, in path then line order.
pub fn find_placeholders(
    root: &Path,
    config: &TargetConfig,
    marker: &str,
) -> Result<Vec<PlaceholderHit>> {
    let files = FileScanner::new(root, config.extension.as_str())
        .exclude_paths(&config.exclude_paths)
        .scan()?;

    let mut hits = Vec::new();
    for path in &files {
        let Some(text) = read_lossy(path) else {
            continue;
        };
        hits.extend(placeholder_lines(path, &text, marker));
    }
    log::info!("Found {} placeholder lines in {} files", hits.len(), files.len());
    Ok(hits)
}

pub fn placeholder_lines(path: &Path, text: &str, marker: &str) -> Vec<PlaceholderHit> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| line.contains(marker))
        .map(|(idx, line)| PlaceholderHit {
            path: path.to_path_buf(),
            line_no: idx + 1,
            line: line.trim().to_string(),
        })
        .collect()
}
