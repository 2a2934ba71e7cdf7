use crate::config::SourceConfig;
use crate::error::Result;
use crate::patterns;
use crate::walk::{read_lossy, FileScanner};
use portmap_protocol::{DeclKind, InterfaceSignature, MethodSignature, Param, SourceDeclaration};
use std::path::Path;

/// Extracts at most one public top-level declaration per source file.
pub struct SourceExtractor {
    config: SourceConfig,
}

impl SourceExtractor {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Walk `root` and extract every recognisable declaration, in path order.
    /// Files that cannot be read or do not look like a declaration are skipped.
    pub fn extract_tree(&self, root: &Path) -> Result<Vec<SourceDeclaration>> {
        let files = FileScanner::new(root, self.config.extension.as_str())
            .skip_file_names(&self.config.skip_file_names)
            .exclude_paths(&self.config.exclude_paths)
            .scan()?;

        let mut declarations = Vec::with_capacity(files.len());
        for path in &files {
            let Some(text) = read_lossy(path) else {
                continue;
            };
            if let Some(decl) = self.extract_text(path, &text) {
                declarations.push(decl);
            }
        }

        log::info!(
            "Extracted {} source declarations from {} files",
            declarations.len(),
            files.len()
        );
        Ok(declarations)
    }

    pub fn extract_text(&self, path: &Path, text: &str) -> Option<SourceDeclaration> {
        let Some(package) = patterns::source_package(text) else {
            log::debug!("No package line in {}", path.display());
            return None;
        };
        let Some((kind, name)) = patterns::source_public_declaration(text) else {
            log::debug!("No public top-level declaration in {}", path.display());
            return None;
        };

        let decl = SourceDeclaration::new(package, kind, name, &self.config.root_package, path);
        if kind == DeclKind::Interface {
            return Some(decl.with_signature(parse_interface_signature(text)));
        }
        Some(decl)
    }
}

/// Type parameters of the interface header and its single abstract method, if any.
pub fn parse_interface_signature(text: &str) -> InterfaceSignature {
    let type_params = patterns::interface_header(text)
        .and_then(|(_, raw)| raw)
        .map(parse_type_params)
        .unwrap_or_default();

    let method = patterns::abstract_method(text).map(|m| MethodSignature {
        name: m.name.to_string(),
        return_type: m.return_type.to_string(),
        params: parse_params(m.params),
    });

    InterfaceSignature {
        type_params,
        method,
    }
}

fn parse_type_params(raw: &str) -> Vec<String> {
    split_top_level(raw)
        .into_iter()
        .filter_map(|part| {
            let head = part.split_whitespace().next()?;
            let head = head.split("extends").next().unwrap_or(head);
            let head = head.split('&').next().unwrap_or(head).trim();
            (!head.is_empty()).then(|| head.to_string())
        })
        .collect()
}

fn parse_params(raw: &str) -> Vec<Param> {
    split_top_level(raw)
        .into_iter()
        .enumerate()
        .map(|(idx, part)| {
            let words: Vec<&str> = part
                .split_whitespace()
                .filter(|word| *word != "final" && !word.starts_with('@'))
                .collect();
            match words.split_last() {
                Some((name, ty)) if !ty.is_empty() => Param {
                    name: (*name).to_string(),
                    ty: ty.join(" "),
                },
                _ => Param {
                    name: format!("p{idx}"),
                    ty: String::new(),
                },
            }
        })
        .collect()
}

/// Split on commas that are not nested inside `<...>`. Blank parts are dropped.
fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
