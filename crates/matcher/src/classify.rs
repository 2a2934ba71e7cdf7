use portmap_protocol::{SourceDeclaration, Status, TargetDeclaration};
use portmap_scanner::read_lossy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Text that stub bodies carry until they are replaced by a real port.
pub const PLACEHOLDER_MARKER: &str = "is not implemented";

/// Names with no sensible equivalent in the target language.
pub const UNSUPPORTED_NAMES: &[&str] = &["ClassLoaderUtils", "ClassPathUtils", "SerializationUtils"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierRules {
    pub unsupported: BTreeSet<String>,
    pub placeholder_marker: String,
    /// Curated statuses applied after classification. The only source of
    /// [`Status::Subset`].
    pub overrides: BTreeMap<String, Status>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            unsupported: UNSUPPORTED_NAMES.iter().map(|n| (*n).to_string()).collect(),
            placeholder_marker: PLACEHOLDER_MARKER.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl ClassifierRules {
    pub fn validate(&self) -> Result<(), String> {
        if self.placeholder_marker.trim().is_empty() {
            return Err("classify.placeholder_marker must not be empty".to_string());
        }
        Ok(())
    }
}

pub struct Classifier {
    rules: ClassifierRules,
}

impl Classifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Status from the best match and the contents of its file.
    /// `contents == None` for a match means the file could not be read.
    pub fn classify_contents(
        &self,
        source: &SourceDeclaration,
        best: Option<&TargetDeclaration>,
        contents: Option<&str>,
    ) -> Status {
        if self.rules.unsupported.contains(&source.name) {
            return Status::Unsupported;
        }
        if best.is_none() {
            return Status::Planned;
        }
        match contents {
            Some(text) if !text.contains(&self.rules.placeholder_marker) => Status::Implemented,
            _ => Status::Planned,
        }
    }

    /// Like [`Classifier::classify_contents`], reading the matched file.
    pub fn classify(&self, source: &SourceDeclaration, best: Option<&TargetDeclaration>) -> Status {
        let contents = match best {
            Some(target) if !self.rules.unsupported.contains(&source.name) => {
                read_lossy(&target.origin)
            }
            _ => None,
        };
        self.classify_contents(source, best, contents.as_deref())
    }

    pub fn apply_override(&self, source: &SourceDeclaration, status: Status) -> Status {
        match self.rules.overrides.get(&source.name) {
            Some(&curated) if curated != status => {
                log::debug!("Override for {}: {status:?} -> {curated:?}", source.name);
                curated
            }
            _ => status,
        }
    }
}
