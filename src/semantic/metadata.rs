//! Referenced-assembly metadata.
//!
//! A compilation sees external types only through `AssemblyReference`s:
//! declarative descriptions of the types and static methods an assembly
//! exports. The built-in catalog covers the WPF assemblies this crate's
//! rules care about; other assemblies can be described in JSON.

use serde::{Deserialize, Serialize};

use crate::syntax::names::join_name;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReference {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

impl TypeDefinition {
    pub fn full_name(&self) -> String {
        join_name(&self.namespace, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub variadic: bool,
}

impl AssemblyReference {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Every namespace that contains at least one type, with all parents.
    pub fn namespaces(&self) -> impl Iterator<Item = String> + '_ {
        self.types.iter().flat_map(|t| {
            let mut prefixes = Vec::new();
            let mut current = String::new();
            for segment in t.namespace.split('.').filter(|s| !s.is_empty()) {
                current = join_name(&current, segment);
                prefixes.push(current.clone());
            }
            prefixes
        })
    }
}

/// Built-in assembly catalog.
pub mod well_known {
    use super::*;

    pub const SYSTEM_RUNTIME: &str = "System.Runtime";
    pub const WINDOWS_BASE: &str = "WindowsBase";
    pub const PRESENTATION_FRAMEWORK: &str = "PresentationFramework";

    pub fn names() -> &'static [&'static str] {
        &[SYSTEM_RUNTIME, WINDOWS_BASE, PRESENTATION_FRAMEWORK]
    }

    pub fn by_name(name: &str) -> Option<AssemblyReference> {
        match name {
            SYSTEM_RUNTIME => Some(system_runtime()),
            WINDOWS_BASE => Some(windows_base()),
            PRESENTATION_FRAMEWORK => Some(presentation_framework()),
            _ => None,
        }
    }

    /// The default reference set of a WPF project.
    pub fn wpf_references() -> Vec<AssemblyReference> {
        names().iter().filter_map(|n| by_name(n)).collect()
    }

    fn param(name: &str, type_name: &str) -> ParameterDefinition {
        ParameterDefinition {
            name: name.to_string(),
            type_name: type_name.to_string(),
            optional: false,
            variadic: false,
        }
    }

    fn method(name: &str, parameters: Vec<ParameterDefinition>) -> MethodDefinition {
        MethodDefinition {
            name: name.to_string(),
            parameters,
        }
    }

    fn ty(namespace: &str, name: &str, methods: Vec<MethodDefinition>) -> TypeDefinition {
        TypeDefinition {
            namespace: namespace.to_string(),
            name: name.to_string(),
            methods,
        }
    }

    pub fn system_runtime() -> AssemblyReference {
        AssemblyReference {
            name: SYSTEM_RUNTIME.to_string(),
            types: vec![
                ty("System", "Object", vec![]),
                ty(
                    "System",
                    "String",
                    vec![
                        method("IsNullOrEmpty", vec![param("value", "string")]),
                        method(
                            "Concat",
                            vec![param("str0", "string"), param("str1", "string")],
                        ),
                        method(
                            "Format",
                            vec![
                                param("format", "string"),
                                ParameterDefinition {
                                    variadic: true,
                                    ..param("args", "object[]")
                                },
                            ],
                        ),
                    ],
                ),
                ty("System", "Type", vec![]),
                ty("System", "Int32", vec![]),
                ty("System", "Boolean", vec![]),
                ty("System", "Double", vec![]),
            ],
        }
    }

    pub fn windows_base() -> AssemblyReference {
        const NS: &str = "System.Windows";

        let name = || param("name", "string");
        let property_type = || param("propertyType", "System.Type");
        let owner_type = || param("ownerType", "System.Type");
        let metadata = || param("typeMetadata", "System.Windows.PropertyMetadata");
        let validate =
            || param("validateValueCallback", "System.Windows.ValidateValueCallback");
        let for_type = || param("forType", "System.Type");
        let dp = || param("dp", "System.Windows.DependencyProperty");

        AssemblyReference {
            name: WINDOWS_BASE.to_string(),
            types: vec![
                ty(
                    NS,
                    "DependencyObject",
                    vec![
                        method("GetValue", vec![dp()]),
                        method("SetValue", vec![dp(), param("value", "object")]),
                        method("ClearValue", vec![dp()]),
                        method("CoerceValue", vec![dp()]),
                    ],
                ),
                ty(
                    NS,
                    "DependencyProperty",
                    vec![
                        method("Register", vec![name(), property_type(), owner_type()]),
                        method(
                            "Register",
                            vec![name(), property_type(), owner_type(), metadata()],
                        ),
                        method(
                            "Register",
                            vec![name(), property_type(), owner_type(), metadata(), validate()],
                        ),
                        method(
                            "RegisterReadOnly",
                            vec![name(), property_type(), owner_type(), metadata()],
                        ),
                        method(
                            "RegisterReadOnly",
                            vec![name(), property_type(), owner_type(), metadata(), validate()],
                        ),
                        method("RegisterAttached", vec![name(), property_type(), owner_type()]),
                        method(
                            "RegisterAttached",
                            vec![name(), property_type(), owner_type(), metadata()],
                        ),
                        method(
                            "RegisterAttached",
                            vec![name(), property_type(), owner_type(), metadata(), validate()],
                        ),
                        method(
                            "RegisterAttachedReadOnly",
                            vec![name(), property_type(), owner_type(), metadata()],
                        ),
                        method(
                            "RegisterAttachedReadOnly",
                            vec![name(), property_type(), owner_type(), metadata(), validate()],
                        ),
                        method("AddOwner", vec![param("ownerType", "System.Type")]),
                        method("AddOwner", vec![param("ownerType", "System.Type"), metadata()]),
                        method("OverrideMetadata", vec![for_type(), metadata()]),
                    ],
                ),
                ty(NS, "DependencyPropertyKey", vec![]),
                ty(NS, "DependencyPropertyChangedEventArgs", vec![]),
                ty(NS, "PropertyMetadata", vec![]),
                ty(NS, "PropertyChangedCallback", vec![]),
                ty(NS, "CoerceValueCallback", vec![]),
                ty(NS, "ValidateValueCallback", vec![]),
            ],
        }
    }

    pub fn presentation_framework() -> AssemblyReference {
        AssemblyReference {
            name: PRESENTATION_FRAMEWORK.to_string(),
            types: vec![
                ty("System.Windows", "FrameworkElement", vec![]),
                ty("System.Windows", "FrameworkPropertyMetadata", vec![]),
                ty("System.Windows", "Window", vec![]),
                ty("System.Windows.Controls", "Control", vec![]),
                ty("System.Windows.Controls", "UserControl", vec![]),
            ],
        }
    }
}
