use portmap_protocol::{DeclKind, SourceDeclaration};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sends a root-package declaration to a namespace when its name is listed in
/// `names`, ends with `suffix`, or, with `functional_interfaces`, when it is an
/// interface with a captured single abstract method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRule {
    pub namespace: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub functional_interfaces: bool,
}

impl RouteRule {
    fn by_suffix(suffix: &str, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            names: Vec::new(),
            suffix: Some(suffix.to_string()),
            functional_interfaces: false,
        }
    }

    fn by_names(names: &[&str], namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            names: names.iter().map(|n| (*n).to_string()).collect(),
            suffix: None,
            functional_interfaces: false,
        }
    }

    fn functional_interfaces(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            names: Vec::new(),
            suffix: None,
            functional_interfaces: true,
        }
    }

    pub fn matches(&self, decl: &SourceDeclaration) -> bool {
        let name = decl.name.as_str();
        self.names.iter().any(|candidate| candidate == name)
            || self
                .suffix
                .as_deref()
                .is_some_and(|suffix| name.ends_with(suffix))
            || (self.functional_interfaces && is_functional_interface(decl))
    }
}

fn is_functional_interface(decl: &SourceDeclaration) -> bool {
    decl.kind == DeclKind::Interface
        && decl
            .signature
            .as_ref()
            .is_some_and(|signature| signature.method.is_some())
}

/// Target package routing.
///
/// Declarations inside a sub-package keep their group under `root_namespace`.
/// Root-package declarations go through `rules` in order (first match wins) and
/// otherwise land in `default_namespace`. The rules are name heuristics and will
/// misroute names they were not written for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingTable {
    pub root_namespace: String,
    pub default_namespace: String,
    pub rules: Vec<RouteRule>,
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self {
            root_namespace: "commons_lang4cj".to_string(),
            default_namespace: "utils".to_string(),
            rules: vec![
                RouteRule::functional_interfaces("function"),
                RouteRule::by_suffix("Range", "range"),
                RouteRule::by_names(
                    &["SystemProperties", "RuntimeEnvironment", "ThreadUtils"],
                    "system",
                ),
                RouteRule::by_names(
                    &[
                        "JavaVersion",
                        "LocaleUtils",
                        "Conversion",
                        "Validate",
                        "Functions",
                    ],
                    "utils",
                ),
                RouteRule::by_names(
                    &["ClassLoaderUtils", "ClassPathUtils", "AnnotationUtils"],
                    "reflect",
                ),
                RouteRule::by_names(&["CachedRandomBits"], "random"),
                RouteRule::by_names(&["Streams"], "stream"),
            ],
        }
    }
}

impl RoutingTable {
    /// Namespace (relative to the root) for a declaration of the root package.
    pub fn root_group_namespace(&self, decl: &SourceDeclaration) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(decl))
            .map_or(self.default_namespace.as_str(), |rule| rule.namespace.as_str())
    }

    /// Group a declaration is routed to, relative to the root namespace.
    pub fn target_group<'a>(&'a self, decl: &'a SourceDeclaration) -> &'a str {
        if decl.is_root_group() {
            let namespace = self.root_group_namespace(decl);
            log::debug!("Routing root declaration {} to {namespace}", decl.name);
            namespace
        } else {
            &decl.group
        }
    }

    pub fn target_package(&self, decl: &SourceDeclaration) -> String {
        format!("{}.{}", self.root_namespace, self.target_group(decl))
    }

    /// Directory of `package` relative to the target source tree.
    pub fn relative_dir(&self, package: &str) -> PathBuf {
        let relative = package
            .strip_prefix(self.root_namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(package);
        relative.split('.').filter(|s| !s.is_empty()).collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.root_namespace.trim().is_empty() {
            return Err("routing.root_namespace must not be empty".to_string());
        }
        if self.default_namespace.trim().is_empty() {
            return Err("routing.default_namespace must not be empty".to_string());
        }
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.namespace.trim().is_empty() {
                return Err(format!("routing.rules[{idx}].namespace must not be empty"));
            }
            if rule.names.is_empty()
                && rule.suffix.as_deref().map_or(true, str::is_empty)
                && !rule.functional_interfaces
            {
                return Err(format!(
                    "routing.rules[{idx}] needs `names`, `suffix` or `functional_interfaces`"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portmap_protocol::{InterfaceSignature, MethodSignature};
    use pretty_assertions::assert_eq;

    const ROOT: &str = "org.apache.commons.lang3";

    fn decl(package: &str, name: &str) -> SourceDeclaration {
        SourceDeclaration::new(package, DeclKind::Class, name, ROOT, "X.java")
    }

    #[test]
    fn sub_package_keeps_its_group() {
        let table = RoutingTable::default();
        assert_eq!(
            table.target_package(&decl("org.apache.commons.lang3.concurrent.locks", "Lock")),
            "commons_lang4cj.concurrent.locks"
        );
    }

    #[test]
    fn root_names_follow_rules_in_order() {
        let table = RoutingTable::default();
        let cases = [
            ("IntegerRange", "commons_lang4cj.range"),
            ("ThreadUtils", "commons_lang4cj.system"),
            ("ClassPathUtils", "commons_lang4cj.reflect"),
            ("CachedRandomBits", "commons_lang4cj.random"),
            ("Streams", "commons_lang4cj.stream"),
            ("Validate", "commons_lang4cj.utils"),
            ("StringUtils", "commons_lang4cj.utils"),
        ];
        for (name, expected) in cases {
            assert_eq!(table.target_package(&decl(ROOT, name)), expected, "{name}");
        }
    }

    #[test]
    fn root_routing_always_lands_in_a_known_namespace() {
        let table = RoutingTable::default();
        let known: Vec<_> = table
            .rules
            .iter()
            .map(|r| r.namespace.as_str())
            .chain([table.default_namespace.as_str()])
            .collect();
        for name in ["Anything", "BitField", "Range", "X"] {
            assert!(known.contains(&table.root_group_namespace(&decl(ROOT, name))));
        }
    }

    fn interface(name: &str, method: Option<&str>) -> SourceDeclaration {
        SourceDeclaration::new(ROOT, DeclKind::Interface, name, ROOT, "X.java").with_signature(
            InterfaceSignature {
                type_params: vec!["T".to_string()],
                method: method.map(|m| MethodSignature {
                    name: m.to_string(),
                    return_type: "T".to_string(),
                    params: Vec::new(),
                }),
            },
        )
    }

    #[test]
    fn root_functional_interfaces_go_to_function_namespace() {
        let table = RoutingTable::default();
        assert_eq!(
            table.target_package(&interface("BinaryOperator", Some("apply"))),
            "commons_lang4cj.function"
        );
        // Marker interfaces and classes still follow the name rules.
        assert_eq!(
            table.target_package(&interface("Marker", None)),
            "commons_lang4cj.utils"
        );
        assert_eq!(
            table.target_package(&decl(ROOT, "BinaryOperator")),
            "commons_lang4cj.utils"
        );
    }

    #[test]
    fn relative_dir_strips_root_namespace() {
        let table = RoutingTable::default();
        assert_eq!(
            table.relative_dir("commons_lang4cj.concurrent.locks"),
            PathBuf::from("concurrent").join("locks")
        );
        assert_eq!(
            table.relative_dir("other.pkg"),
            PathBuf::from("other").join("pkg")
        );
    }

    #[test]
    fn rules_load_from_toml_in_order() {
        let raw = r#"
root_namespace = "port"
default_namespace = "misc"

[[rules]]
namespace = "time"
suffix = "Clock"

[[rules]]
namespace = "text"
names = ["WordUtils"]
"#;
        let table: RoutingTable = toml::from_str(raw).unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(table.target_package(&decl(ROOT, "StopClock")), "port.time");
        assert_eq!(table.target_package(&decl(ROOT, "WordUtils")), "port.text");
        assert_eq!(table.target_package(&decl(ROOT, "Other")), "port.misc");
    }

    #[test]
    fn rule_without_selector_is_invalid() {
        let mut table = RoutingTable::default();
        table.rules.push(RouteRule {
            namespace: "x".to_string(),
            names: Vec::new(),
            suffix: None,
            functional_interfaces: false,
        });
        assert!(table.validate().is_err());

        let last = table.rules.len() - 1;
        table.rules[last].functional_interfaces = true;
        assert!(table.validate().is_ok());
    }
}
