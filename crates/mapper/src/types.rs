use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source primitive and well-known reference types with their target names.
pub const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("void", "Unit"),
    ("boolean", "Bool"),
    ("byte", "Int8"),
    ("short", "Int16"),
    ("int", "Int32"),
    ("long", "Int64"),
    ("float", "Float32"),
    ("double", "Float64"),
    ("char", "Rune"),
    ("String", "String"),
];

/// Target type used for everything the table does not know.
pub const UNKNOWN_TYPE: &str = "Any";

/// Lossy source → target type mapping.
///
/// Generic arguments and array brackets are dropped before lookup, active type
/// parameters pass through, and anything else becomes [`UNKNOWN_TYPE`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeTable {
    pub entries: BTreeMap<String, String>,
    pub fallback: String,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self {
            entries: PRIMITIVE_TYPES
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            fallback: UNKNOWN_TYPE.to_string(),
        }
    }
}

impl TypeTable {
    pub fn map(&self, raw: &str, type_params: &[String]) -> String {
        let base = strip_decoration(raw);
        if type_params.iter().any(|param| param == base) {
            return base.to_string();
        }
        self.entries
            .get(base)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn strip_decoration(raw: &str) -> &str {
    let mut base = raw.trim();
    if let (Some(open), Some(_)) = (base.find('<'), base.rfind('>')) {
        // Everything from the first `<` on is generic arguments or array suffixes.
        base = &base[..open];
    }
    base.split("[]")
        .next()
        .unwrap_or(base)
        .trim_end_matches("...")
        .trim()
}
