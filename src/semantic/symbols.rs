//! Symbol identities.
//!
//! Two symbols are the same only if they come from the same origin (source
//! or a named referenced assembly) and have the same full name. A source
//! type `MyApp.DependencyProperty` and the metadata type
//! `System.Windows.DependencyProperty` share a simple name but never compare
//! equal, and neither do two same-named types from different assemblies.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SymbolOrigin {
    /// Declared in the analyzed source unit.
    Source,
    /// Declared in the named referenced assembly.
    Metadata(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSymbol {
    pub origin: SymbolOrigin,
    /// Dotted full name; nested types continue the dotted path.
    pub full_name: String,
}

impl TypeSymbol {
    pub fn new(origin: SymbolOrigin, full_name: impl Into<String>) -> Self {
        Self {
            origin,
            full_name: full_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    /// `params T[]`: accepts any number of trailing arguments.
    pub variadic: bool,
}

impl Parameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            variadic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodSymbol {
    pub containing_type: TypeSymbol,
    pub name: String,
    /// Position among the same-named members of the containing type.
    pub ordinal: usize,
    pub parameters: Vec<Parameter>,
}

impl MethodSymbol {
    pub fn accepts_arity(&self, argument_count: usize) -> bool {
        let required = self
            .parameters
            .iter()
            .filter(|p| !p.optional && !p.variadic)
            .count();
        let variadic = self.parameters.iter().any(|p| p.variadic);
        argument_count >= required && (variadic || argument_count <= self.parameters.len())
    }

    pub fn first_parameter(&self) -> Option<&Parameter> {
        self.parameters.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSymbol {
    pub containing_type: TypeSymbol,
    pub name: String,
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Symbol {
    Namespace(String),
    Type(TypeSymbol),
    Method(MethodSymbol),
    Field(FieldSymbol),
}

impl Symbol {
    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match self {
            Symbol::Method(method) => Some(method),
            _ => None,
        }
    }
}
