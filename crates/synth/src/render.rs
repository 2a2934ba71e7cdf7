use portmap_mapper::TypeTable;
use portmap_protocol::{DeclKind, InterfaceSignature, SourceDeclaration};
use serde::{Deserialize, Serialize};

/// Target-language names used in generated skeletons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubStyle {
    /// Packages ending with this suffix receive full functional-interface shapes.
    pub function_package_suffix: String,
    /// Classes whose name ends with this suffix become exception subclasses.
    pub exception_suffix: String,
    pub base_exception: String,
    pub not_implemented_exception: String,
    /// Package (relative to the root namespace) providing the exception types.
    pub exception_package: String,
    pub placeholder_variant: String,
}

impl Default for StubStyle {
    fn default() -> Self {
        Self {
            function_package_suffix: ".function".to_string(),
            exception_suffix: "Exception".to_string(),
            base_exception: "Exception".to_string(),
            not_implemented_exception: "NotImplementedException".to_string(),
            exception_package: "exception".to_string(),
            placeholder_variant: "UNKNOWN".to_string(),
        }
    }
}

/// Renders compilable skeletons that fail loudly when used.
#[derive(Debug, Clone)]
pub struct StubRenderer {
    style: StubStyle,
    types: TypeTable,
    root_namespace: String,
    marker: String,
}

impl StubRenderer {
    /// `marker` is embedded in every placeholder body so the classifier and the
    /// placeholder gate can find it again.
    pub fn new(
        style: StubStyle,
        types: TypeTable,
        root_namespace: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            style,
            types,
            root_namespace: root_namespace.into(),
            marker: marker.into(),
        }
    }

    pub fn render(&self, decl: &SourceDeclaration, package: &str) -> String {
        let mut lines = vec![format!("package {package}"), String::new()];

        match decl.kind {
            DeclKind::Interface if package.ends_with(&self.style.function_package_suffix) => {
                let signature = decl.signature.clone().unwrap_or_default();
                self.push_function_interface(&mut lines, &decl.name, &signature);
            }
            DeclKind::Interface => {
                lines.push(format!("public interface {} {{", decl.name));
                lines.push("}".to_string());
            }
            DeclKind::Enum => {
                lines.push(format!("public enum {} {{", decl.name));
                lines.push(format!("    | {}", self.style.placeholder_variant));
                lines.push("}".to_string());
            }
            DeclKind::Class if decl.name.ends_with(&self.style.exception_suffix) => {
                self.push_exception_import(&mut lines, package);
                lines.push(format!(
                    "public class {} <: {} {{",
                    decl.name, self.style.base_exception
                ));
                lines.push("    public init(message: String) {".to_string());
                lines.push("        super(message)".to_string());
                lines.push("    }".to_string());
                lines.push("}".to_string());
            }
            DeclKind::Class => {
                self.push_exception_import(&mut lines, package);
                lines.push(format!("public class {} {{", decl.name));
                lines.push("    public init() {".to_string());
                lines.push(format!(
                    "        throw {}(\"{} {}\")",
                    self.style.not_implemented_exception, decl.name, self.marker
                ));
                lines.push("    }".to_string());
                lines.push("}".to_string());
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn push_function_interface(
        &self,
        lines: &mut Vec<String>,
        name: &str,
        signature: &InterfaceSignature,
    ) {
        let generics = if signature.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", signature.type_params.join(", "))
        };
        lines.push(format!("public interface {name}{generics} {{"));
        if let Some(method) = &signature.method {
            let params = method
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, self.types.map(&p.ty, &signature.type_params)))
                .collect::<Vec<_>>()
                .join(", ");
            let ret = self.types.map(&method.return_type, &signature.type_params);
            lines.push(format!("    func {}({params}): {ret}", method.name));
        }
        lines.push("}".to_string());
    }

    fn push_exception_import(&self, lines: &mut Vec<String>, package: &str) {
        let exception_package = format!("{}.{}", self.root_namespace, self.style.exception_package);
        if package == exception_package {
            return;
        }
        lines.push(format!("import {exception_package}.*"));
        lines.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portmap_protocol::{MethodSignature, Param};
    use pretty_assertions::assert_eq;

    const ROOT: &str = "org.apache.commons.lang3";

    fn renderer() -> StubRenderer {
        StubRenderer::new(
            StubStyle::default(),
            TypeTable::default(),
            "commons_lang4cj",
            "is not implemented",
        )
    }

    fn decl(kind: DeclKind, name: &str) -> SourceDeclaration {
        SourceDeclaration::new(ROOT, kind, name, ROOT, "X.java")
    }

    #[test]
    fn binary_operator_renders_generic_method() {
        let signature = InterfaceSignature {
            type_params: vec!["T".to_string()],
            method: Some(MethodSignature {
                name: "apply".to_string(),
                return_type: "T".to_string(),
                params: vec![
                    Param {
                        name: "a".to_string(),
                        ty: "T".to_string(),
                    },
                    Param {
                        name: "b".to_string(),
                        ty: "T".to_string(),
                    },
                ],
            }),
        };
        let decl = decl(DeclKind::Interface, "BinaryOperator").with_signature(signature);

        let out = renderer().render(&decl, "commons_lang4cj.function");
        assert_eq!(
            out,
            "package commons_lang4cj.function\n\npublic interface BinaryOperator<T> {\n    func apply(a: T, b: T): T\n}\n"
        );
    }

    #[test]
    fn function_interface_maps_primitive_types() {
        let signature = InterfaceSignature {
            type_params: Vec::new(),
            method: Some(MethodSignature {
                name: "applyAsLong".to_string(),
                return_type: "long".to_string(),
                params: vec![Param {
                    name: "value".to_string(),
                    ty: "int[]".to_string(),
                }],
            }),
        };
        let decl = decl(DeclKind::Interface, "IntToLongFunction").with_signature(signature);
        let out = renderer().render(&decl, "commons_lang4cj.function");
        assert!(out.contains("    func applyAsLong(value: Int32): Int64\n"));
    }

    #[test]
    fn interface_outside_function_package_is_a_marker() {
        let signature = InterfaceSignature {
            type_params: vec!["T".to_string()],
            method: None,
        };
        let decl = decl(DeclKind::Interface, "Builder").with_signature(signature);
        let out = renderer().render(&decl, "commons_lang4cj.builder");
        assert_eq!(
            out,
            "package commons_lang4cj.builder\n\npublic interface Builder {\n}\n"
        );
    }

    #[test]
    fn enum_gets_one_placeholder_variant() {
        let out = renderer().render(&decl(DeclKind::Enum, "JavaVersion"), "commons_lang4cj.utils");
        assert_eq!(
            out,
            "package commons_lang4cj.utils\n\npublic enum JavaVersion {\n    | UNKNOWN\n}\n"
        );
    }

    #[test]
    fn exception_class_forwards_message() {
        let out = renderer().render(
            &decl(DeclKind::Class, "FooException"),
            "commons_lang4cj.utils",
        );
        assert_eq!(
            out,
            "package commons_lang4cj.utils\n\nimport commons_lang4cj.exception.*\n\npublic class FooException <: Exception {\n    public init(message: String) {\n        super(message)\n    }\n}\n"
        );
        assert!(!out.contains("is not implemented"));
    }

    #[test]
    fn plain_class_throws_with_marker() {
        let out = renderer().render(&decl(DeclKind::Class, "BitField"), "commons_lang4cj.utils");
        assert!(out.contains("import commons_lang4cj.exception.*\n"));
        assert!(out.contains(
            "        throw NotImplementedException(\"BitField is not implemented\")\n"
        ));
    }

    #[test]
    fn no_self_import_inside_exception_package() {
        let out = renderer().render(
            &decl(DeclKind::Class, "CloneFailedException"),
            "commons_lang4cj.exception",
        );
        assert!(!out.contains("import "));
    }
}
