//! # portmap protocol
//!
//! Declarations, signatures and migration statuses shared by every stage of the
//! pipeline:
//!
//! ```text
//! source tree ──> SourceDeclaration ─┐
//!                                    ├──> Assessment (best match + Status)
//! target tree ──> TargetDeclaration ─┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub mod path_filters;

/// Shape of a top-level source declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
}

impl DeclKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
        }
    }
}

/// Shape of a public target declaration. The target language adds value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Class,
    Interface,
    Enum,
    Struct,
}

impl TargetKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "struct" => Some(Self::Struct),
            _ => None,
        }
    }
}

/// A parameter of a captured abstract method. `ty` holds the raw source type
/// text and is empty when the parameter could not be split into type and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// The single abstract method of a functional interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
}

/// Interface header details. `method == None` means a marker interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSignature {
    pub type_params: Vec<String>,
    pub method: Option<MethodSignature>,
}

/// A public top-level declaration discovered in the source corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeclaration {
    pub package: String,
    pub kind: DeclKind,
    pub name: String,
    /// Package relative to the configured root package ("" for the root itself).
    pub group: String,
    pub origin: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<InterfaceSignature>,
}

impl SourceDeclaration {
    pub fn new(
        package: impl Into<String>,
        kind: DeclKind,
        name: impl Into<String>,
        root_package: &str,
        origin: impl Into<PathBuf>,
    ) -> Self {
        let package = package.into();
        let group = package_group(&package, root_package).to_string();
        Self {
            package,
            kind,
            name: name.into(),
            group,
            origin: origin.into(),
            signature: None,
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: InterfaceSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn fqcn(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// First dot-segment of the group, or "" for the root group.
    pub fn group_head(&self) -> &str {
        self.group.split('.').next().unwrap_or_default()
    }

    pub fn is_root_group(&self) -> bool {
        self.group.is_empty()
    }
}

/// Strip `root` from `package`. Packages outside the root are returned whole.
pub fn package_group<'a>(package: &'a str, root: &str) -> &'a str {
    if package == root {
        return "";
    }
    package
        .strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(package)
}

/// A public declaration discovered in the target corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetDeclaration {
    pub package: String,
    pub kind: TargetKind,
    pub name: String,
    pub origin: PathBuf,
}

impl TargetDeclaration {
    pub fn fqcn(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// Migration status of a source declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Implemented,
    Planned,
    Subset,
    Unsupported,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Implemented,
        Status::Planned,
        Status::Subset,
        Status::Unsupported,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Status::Implemented => "✅",
            Status::Planned => "🟡",
            Status::Subset => "⚠️",
            Status::Unsupported => "⛔",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Implemented => "implemented",
            Status::Planned => "planned",
            Status::Subset => "subset",
            Status::Unsupported => "unsupported",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Outcome of matching one source declaration against the target inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub source: SourceDeclaration,
    pub best: Option<TargetDeclaration>,
    pub status: Status,
}

/// Per-status totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub implemented: usize,
    pub planned: usize,
    pub subset: usize,
    pub unsupported: usize,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a Status>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.add(*status);
        }
        counts
    }

    pub fn add(&mut self, status: Status) {
        match status {
            Status::Implemented => self.implemented += 1,
            Status::Planned => self.planned += 1,
            Status::Subset => self.subset += 1,
            Status::Unsupported => self.unsupported += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Implemented => self.implemented,
            Status::Planned => self.planned,
            Status::Subset => self.subset,
            Status::Unsupported => self.unsupported,
        }
    }

    pub fn total(&self) -> usize {
        self.implemented + self.planned + self.subset + self.unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROOT: &str = "org.apache.commons.lang3";

    #[test]
    fn group_strips_root_prefix() {
        assert_eq!(package_group(ROOT, ROOT), "");
        assert_eq!(package_group("org.apache.commons.lang3.text", ROOT), "text");
        assert_eq!(
            package_group("org.apache.commons.lang3.concurrent.locks", ROOT),
            "concurrent.locks"
        );
    }

    #[test]
    fn group_keeps_foreign_packages_whole() {
        assert_eq!(package_group("com.example.util", ROOT), "com.example.util");
        // A sibling package that merely shares the prefix text is not under the root.
        assert_eq!(
            package_group("org.apache.commons.lang3x", ROOT),
            "org.apache.commons.lang3x"
        );
    }

    #[test]
    fn group_head_is_first_segment() {
        let decl = SourceDeclaration::new(
            "org.apache.commons.lang3.concurrent.locks",
            DeclKind::Class,
            "LockingVisitors",
            ROOT,
            "LockingVisitors.java",
        );
        assert_eq!(decl.group_head(), "concurrent");
        assert!(!decl.is_root_group());
        assert_eq!(
            decl.fqcn(),
            "org.apache.commons.lang3.concurrent.locks.LockingVisitors"
        );
    }

    #[test]
    fn status_labels_round_trip_through_parse() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.label()), Some(status));
        }
        assert_eq!(Status::parse(" Subset "), Some(Status::Subset));
        assert_eq!(Status::parse("done"), None);
    }

    #[test]
    fn counts_tally_every_status() {
        let statuses = [
            Status::Implemented,
            Status::Planned,
            Status::Planned,
            Status::Unsupported,
        ];
        let counts = StatusCounts::tally(&statuses);
        assert_eq!(counts.planned, 2);
        assert_eq!(counts.subset, 0);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(Status::Unsupported), 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let raw = serde_json::to_string(&Status::Unsupported).unwrap();
        assert_eq!(raw, "\"unsupported\"");
    }
}
