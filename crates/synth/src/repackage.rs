use crate::error::Result;
use once_cell::sync::Lazy;
use portmap_scanner::{read_lossy, FileScanner};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

static PACKAGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)package[ \t]+[A-Za-z0-9_.]+").expect("package line pattern")
});

#[derive(Debug, Clone, Default, Serialize)]
pub struct RepackageReport {
    /// Files whose package line was (or, in a dry run, would be) rewritten.
    pub updated: Vec<PathBuf>,
    pub unchanged: usize,
    pub failed: usize,
}

/// Package for a file in `rel_dir` (relative to the repackaged root).
pub fn package_for_dir(prefix: &str, rel_dir: &Path) -> String {
    let segments: Vec<String> = rel_dir
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}.{}", segments.join("."))
    }
}

/// Replace the first package declaration with `package`. `None` when the text
/// has no package line or already declares `package`.
pub fn rewrite_package_line(text: &str, package: &str) -> Option<String> {
    let caps = PACKAGE_LINE.captures(text)?;
    let whole = caps.get(0)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let replacement = format!("{indent}package {package}");
    if whole.as_str() == replacement {
        return None;
    }
    let mut out = String::with_capacity(text.len() + package.len());
    out.push_str(&text[..whole.start()]);
    out.push_str(&replacement);
    out.push_str(&text[whole.end()..]);
    Some(out)
}

/// Point every target file under `root` at `<prefix>.<relative directory>`.
/// Files that cannot be read or written are logged and counted, not fatal.
pub fn repackage_tree(
    root: &Path,
    prefix: &str,
    extension: &str,
    dry_run: bool,
) -> Result<RepackageReport> {
    let files = FileScanner::new(root, extension).scan()?;
    let mut report = RepackageReport::default();

    for path in files {
        let rel_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .unwrap_or_else(|| Path::new(""));
        let package = package_for_dir(prefix, rel_dir);

        let Some(text) = read_lossy(&path) else {
            report.failed += 1;
            continue;
        };
        let Some(rewritten) = rewrite_package_line(&text, &package) else {
            report.unchanged += 1;
            continue;
        };

        if !dry_run {
            if let Err(e) = fs::write(&path, rewritten) {
                log::warn!("Failed to update {}: {e}", path.display());
                report.failed += 1;
                continue;
            }
        }
        log::info!("Updating {}: {package}", path.display());
        report.updated.push(path);
    }

    Ok(report)
}
