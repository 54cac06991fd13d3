//! Symbol matcher: finds the invocations that bind to a target method.
//!
//! Matching is by symbol identity only. A call whose callee text looks like
//! `DependencyProperty.Register` but binds to any other type's method (or
//! binds to nothing) is not a call site.

use std::collections::HashSet;

use tracing::debug;
use tree_sitter::Node;

use crate::semantic::{CompilationModel, MethodSymbol, Symbol};
use crate::syntax::{TextSpan, descendants};

/// Every overload of a method on one resolved type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSymbolSet {
    methods: HashSet<MethodSymbol>,
}

impl TargetSymbolSet {
    /// Collect the overloads of `method_name` declared by the type with the
    /// full metadata name `type_name`. Empty when the type does not resolve.
    pub fn resolve(model: &CompilationModel<'_>, type_name: &str, method_name: &str) -> Self {
        let Some(ty) = model.resolve_type_by_name(type_name) else {
            return Self::default();
        };
        let methods = model
            .methods_of(&ty)
            .into_iter()
            .filter(|m| m.name == method_name)
            .collect();
        Self { methods }
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn contains(&self, method: &MethodSymbol) -> bool {
        self.methods.contains(method)
    }
}

/// One argument of a call site.
#[derive(Debug, Clone)]
pub struct CallArgument<'a> {
    /// The `argument` node, including any `name:` label.
    pub node: Node<'a>,
    /// The argument's expression.
    pub expression: Node<'a>,
    /// The `name` in `name: expr`.
    pub label: Option<String>,
}

/// An invocation bound to a target method.
#[derive(Debug, Clone)]
pub struct CallSite<'a> {
    pub invocation: Node<'a>,
    pub method: MethodSymbol,
    pub arguments: Vec<CallArgument<'a>>,
    pub span: TextSpan,
}

/// Find every invocation in the model's unit that binds to a member of
/// `targets`, in source order.
pub fn find_call_sites<'a>(
    model: &CompilationModel<'a>,
    targets: &TargetSymbolSet,
) -> Vec<CallSite<'a>> {
    let unit = model.unit();
    if targets.is_empty() {
        debug!(path = unit.path(), "target type not referenced, no call sites");
        return Vec::new();
    }

    descendants(unit.root())
        .filter(|node| node.kind() == "invocation_expression")
        .filter_map(|invocation| {
            let method = match model.resolve_symbol(invocation)? {
                Symbol::Method(method) => method,
                _ => return None,
            };
            if !targets.contains(&method) {
                return None;
            }
            Some(CallSite {
                invocation,
                method,
                arguments: call_arguments(model, invocation),
                span: unit.span_of(invocation),
            })
        })
        .collect()
}

fn call_arguments<'a>(model: &CompilationModel<'a>, invocation: Node<'a>) -> Vec<CallArgument<'a>> {
    let unit = model.unit();
    let Some(list) = invocation.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|c| c.kind() == "argument")
        .filter_map(|node| {
            let mut cursor = node.walk();
            let named: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
            let label = named
                .iter()
                .find(|c| c.kind() == "name_colon")
                .map(|c| {
                    let text = unit.node_text(*c).trim_end_matches(':').trim();
                    text.trim_start_matches('@').to_string()
                });
            let expression = named.into_iter().rev().find(|c| c.kind() != "name_colon")?;
            Some(CallArgument {
                node,
                expression,
                label,
            })
        })
        .collect()
}
