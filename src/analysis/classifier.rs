//! Pattern classifier: decides whether a call site's name argument is a
//! raw literal, an existing `nameof(...)`, or something else.

use tree_sitter::Node;

use super::matcher::{CallArgument, CallSite};
use crate::semantic::{CompilationModel, ConstantValue};
use crate::syntax::SourceUnit;

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentShape {
    /// A compile-time constant that is not a name reference.
    Literal(ConstantValue),
    /// `nameof(...)`.
    SymbolicNameReference,
    Other,
}

/// The argument bound to the method's first parameter: the one labelled
/// with its name, else the first positional argument.
pub fn name_argument<'s, 'a>(call_site: &'s CallSite<'a>) -> Option<&'s CallArgument<'a>> {
    let parameter = call_site.method.first_parameter()?;
    call_site
        .arguments
        .iter()
        .find(|a| a.label.as_deref() == Some(parameter.name.as_str()))
        .or_else(|| call_site.arguments.iter().find(|a| a.label.is_none()))
}

pub fn classify(model: &CompilationModel<'_>, call_site: &CallSite<'_>) -> ArgumentShape {
    let Some(argument) = name_argument(call_site) else {
        return ArgumentShape::Other;
    };
    if is_name_of_expression(model.unit(), argument.expression) {
        return ArgumentShape::SymbolicNameReference;
    }
    match model.get_constant_value(argument.expression) {
        Some(value) => ArgumentShape::Literal(value),
        None => ArgumentShape::Other,
    }
}

/// `nameof(x)`, possibly parenthesized. The callee must be a bare
/// identifier spelled exactly `nameof`.
pub fn is_name_of_expression(unit: &SourceUnit, node: Node<'_>) -> bool {
    let node = unparenthesize(node);
    if node.kind() != "invocation_expression" {
        return false;
    }
    node.child_by_field_name("function")
        .is_some_and(|f| f.kind() == "identifier" && unit.node_text(f) == "nameof")
}

fn unparenthesize(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let Some(inner) = node.named_children(&mut cursor).next() else {
            break;
        };
        node = inner;
    }
    node
}
