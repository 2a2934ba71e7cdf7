use crate::config::TargetConfig;
use crate::error::Result;
use crate::patterns;
use crate::walk::{read_lossy, FileScanner};
use portmap_protocol::TargetDeclaration;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Every public declaration of the target corpus, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct TargetInventory {
    declarations: Vec<TargetDeclaration>,
    by_name: HashMap<String, Vec<usize>>,
    identities: HashSet<(String, String)>,
}

impl TargetInventory {
    pub fn scan(root: &Path, config: &TargetConfig) -> Result<Self> {
        let files = FileScanner::new(root, config.extension.as_str())
            .exclude_paths(&config.exclude_paths)
            .scan()?;

        let mut declarations = Vec::new();
        for path in &files {
            let Some(text) = read_lossy(path) else {
                continue;
            };
            declarations.extend(declarations_in(path, &text));
        }

        log::info!(
            "Inventoried {} target declarations from {} files",
            declarations.len(),
            files.len()
        );
        Ok(Self::from_declarations(declarations))
    }

    pub fn from_declarations(declarations: Vec<TargetDeclaration>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut identities = HashSet::new();
        for (idx, decl) in declarations.iter().enumerate() {
            by_name.entry(decl.name.clone()).or_default().push(idx);
            identities.insert((decl.package.clone(), decl.name.clone()));
        }
        Self {
            declarations,
            by_name,
            identities,
        }
    }

    /// Same-named declarations in discovery order.
    pub fn candidates(&self, name: &str) -> Vec<&TargetDeclaration> {
        self.by_name
            .get(name)
            .map(|idxs| idxs.iter().map(|&idx| &self.declarations[idx]).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, package: &str, name: &str) -> bool {
        self.identities
            .contains(&(package.to_string(), name.to_string()))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn declarations(&self) -> &[TargetDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// All public declarations of one target file; none when it has no package line.
pub fn declarations_in(path: &Path, text: &str) -> Vec<TargetDeclaration> {
    let Some(package) = patterns::target_package(text) else {
        log::debug!("No package line in {}", path.display());
        return Vec::new();
    };
    patterns::target_public_declarations(text)
        .map(|(kind, name)| TargetDeclaration {
            package: package.to_string(),
            kind,
            name: name.to_string(),
            origin: path.to_path_buf(),
        })
        .collect()
}
