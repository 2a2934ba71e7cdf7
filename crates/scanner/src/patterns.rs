//! Line-oriented structural predicates.
//!
//! Each predicate recognises one declaration shape with a regular expression and
//! nothing more: bodies, expressions and nested types are never looked at.

use once_cell::sync::Lazy;
use portmap_protocol::{DeclKind, TargetKind};
use regex::Regex;

static SOURCE_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*package\s+([a-zA-Z0-9_.]+)\s*;").expect("source package pattern")
});

static SOURCE_PUBLIC_TOP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*public\s+(?:final\s+|abstract\s+)?(?:sealed\s+)?(?:non-sealed\s+)?(class|interface|enum)\s+([A-Za-z_][A-Za-z0-9_]*)\b",
    )
    .expect("source declaration pattern")
});

static SOURCE_INTERFACE_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*public\s+interface\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s*<([^>{}]*)>)?")
        .expect("interface header pattern")
});

static SOURCE_ABSTRACT_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?:public\s+)?([A-Za-z0-9_<>\[\].?]+)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)\s*;",
    )
    .expect("abstract method pattern")
});

static TARGET_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*package\s+([a-zA-Z0-9_.]+)\s*$").expect("target package pattern")
});

static TARGET_PUBLIC_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*public\s+(?:open\s+)?(?:abstract\s+)?(class|interface|enum|struct)\s+([A-Za-z_][A-Za-z0-9_]*)\b",
    )
    .expect("target declaration pattern")
});

/// Words that can sit in the return-type position of a `x y(...);` line
/// without it being an abstract method.
const NON_ABSTRACT_LEADERS: &[&str] = &["default", "static", "return", "throw", "new"];

/// First `package a.b.c;` line.
pub fn source_package(text: &str) -> Option<&str> {
    SOURCE_PACKAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First public top-level class, interface or enum header.
pub fn source_public_declaration(text: &str) -> Option<(DeclKind, &str)> {
    let caps = SOURCE_PUBLIC_TOP.captures(text)?;
    let kind = DeclKind::from_keyword(caps.get(1)?.as_str())?;
    Some((kind, caps.get(2)?.as_str()))
}

/// `public interface Name<...>`: the name and the raw text between the brackets.
pub fn interface_header(text: &str) -> Option<(&str, Option<&str>)> {
    let caps = SOURCE_INTERFACE_HEAD.captures(text)?;
    let name = caps.get(1)?.as_str();
    Some((name, caps.get(2).map(|m| m.as_str())))
}

/// Raw parts of an abstract method line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbstractMethod<'a> {
    pub return_type: &'a str,
    pub name: &'a str,
    pub params: &'a str,
}

/// First `ReturnType name(params);` line not led by a default/static modifier.
pub fn abstract_method(text: &str) -> Option<AbstractMethod<'_>> {
    SOURCE_ABSTRACT_METHOD.captures_iter(text).find_map(|caps| {
        let return_type = caps.get(1)?.as_str();
        if NON_ABSTRACT_LEADERS.contains(&return_type) {
            return None;
        }
        Some(AbstractMethod {
            return_type,
            name: caps.get(2)?.as_str(),
            params: caps.get(3)?.as_str().trim(),
        })
    })
}

/// First `package a.b.c` line of a target file.
pub fn target_package(text: &str) -> Option<&str> {
    TARGET_PACKAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Every public top-level declaration header of a target file.
pub fn target_public_declarations(text: &str) -> impl Iterator<Item = (TargetKind, &str)> {
    TARGET_PUBLIC_TYPE.captures_iter(text).filter_map(|caps| {
        let kind = TargetKind::from_keyword(caps.get(1)?.as_str())?;
        Some((kind, caps.get(2)?.as_str()))
    })
}
