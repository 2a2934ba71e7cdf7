use crate::error::{Result, ScanError};
use portmap_protocol::path_filters;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanner for finding files of one language in a directory tree
pub struct FileScanner {
    root: PathBuf,
    extension: String,
    skip_file_names: Vec<String>,
    exclude_paths: Vec<String>,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.into(),
            skip_file_names: Vec::new(),
            exclude_paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn skip_file_names(mut self, names: &[String]) -> Self {
        self.skip_file_names = names.to_vec();
        self
    }

    #[must_use]
    pub fn exclude_paths(mut self, prefixes: &[String]) -> Self {
        self.exclude_paths = prefixes.to_vec();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Matching files in lexicographic path order.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ScanError::InvalidRoot(self.root.clone()));
        }

        let mut files = Vec::new();
        for result in WalkDir::new(&self.root).follow_links(false) {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.has_extension(path) {
                        continue;
                    }

                    if self.is_skipped_name(path) {
                        log::debug!("Skipping metadata file {}", path.display());
                        continue;
                    }

                    if !self.is_allowed(path) {
                        log::debug!("Skipping excluded file {}", path.display());
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!(
            "Found {} .{} files under {}",
            files.len(),
            self.extension,
            self.root.display()
        );
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    fn is_skipped_name(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.skip_file_names.iter().any(|skip| skip == name))
    }

    fn is_allowed(&self, path: &Path) -> bool {
        if !path_filters::is_active(&self.exclude_paths) {
            return true;
        }
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };
        path_filters::path_allowed(&relative.to_string_lossy(), &self.exclude_paths)
    }
}

/// Read a file as text, replacing invalid UTF-8. Unreadable files yield `None`.
pub fn read_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log::debug!("Skipping unreadable file {}: {e}", path.display());
            None
        }
    }
}
