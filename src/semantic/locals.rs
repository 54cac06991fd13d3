//! Names declared inside member bodies: parameters, locals, local constants
//! and local functions.
//!
//! Lookup walks outward from a node and stops at the enclosing type
//! declaration; members of types are handled by the model.

use tree_sitter::Node;

use super::declarations::{
    declarator_initializer, declarator_names, has_modifier, is_type_declaration, named_children,
    variable_declarations,
};
use crate::syntax::SourceUnit;

/// A parameter or local variable visible at a node.
#[derive(Debug, Clone, Copy)]
pub struct LocalBinding<'t> {
    /// Declared type; `None` for implicitly typed lambda parameters.
    pub type_node: Option<Node<'t>>,
    /// Initializer of a `const` local.
    pub constant: Option<Node<'t>>,
}

/// Node kinds that introduce a parameter list.
const PARAMETER_OWNERS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "operator_declaration",
    "conversion_operator_declaration",
    "indexer_declaration",
    "local_function_statement",
    "lambda_expression",
    "anonymous_method_expression",
];

/// Statements whose own declaration scopes over their body.
const DECLARING_STATEMENTS: &[&str] = &["for_statement", "using_statement", "fixed_statement"];

fn ancestors_within_member<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    std::iter::successors(node.parent(), |n| n.parent())
        .take_while(|n| !is_type_declaration(*n) && n.kind() != "compilation_unit")
}

/// The innermost parameter or local named `name` in scope at `node`.
pub fn local_binding<'t>(unit: &SourceUnit, node: Node<'t>, name: &str) -> Option<LocalBinding<'t>> {
    for ancestor in ancestors_within_member(node) {
        if let Some(binding) = declared_in(unit, ancestor, name) {
            return Some(binding);
        }
        if PARAMETER_OWNERS.contains(&ancestor.kind()) {
            if let Some(binding) = parameter_named(unit, ancestor, name) {
                return Some(binding);
            }
        }
    }
    None
}

/// Whether a local function named `name` is visible at `node`.
pub fn has_local_function(unit: &SourceUnit, node: Node<'_>, name: &str) -> bool {
    ancestors_within_member(node).any(|ancestor| {
        named_children(ancestor).into_iter().any(|statement| {
            statement.kind() == "local_function_statement"
                && statement
                    .child_by_field_name("name")
                    .is_some_and(|n| unit.node_text(n).trim_start_matches('@') == name)
        })
    })
}

/// Locals declared directly in a block, `for`, `using` or `fixed`
/// statement, and the iteration variable of `foreach`.
fn declared_in<'t>(unit: &SourceUnit, scope: Node<'t>, name: &str) -> Option<LocalBinding<'t>> {
    if scope.kind() == "foreach_statement" {
        let left = scope.child_by_field_name("left")?;
        return (unit.node_text(left).trim_start_matches('@') == name).then(|| LocalBinding {
            type_node: scope.child_by_field_name("type"),
            constant: None,
        });
    }

    for child in named_children(scope) {
        let (declarations, is_const) = match child.kind() {
            "local_declaration_statement" => (
                variable_declarations(child),
                has_modifier(unit, child, "const"),
            ),
            "variable_declaration" if DECLARING_STATEMENTS.contains(&scope.kind()) => {
                (vec![child], false)
            }
            _ => continue,
        };
        for declaration in declarations {
            if !declarator_names(unit, declaration).iter().any(|n| n == name) {
                continue;
            }
            let constant = if is_const {
                named_children(declaration)
                    .into_iter()
                    .filter(|c| c.kind() == "variable_declarator")
                    .filter_map(|d| declarator_initializer(unit, d))
                    .find(|(declared, _)| declared == name)
                    .map(|(_, initializer)| initializer)
            } else {
                None
            };
            return Some(LocalBinding {
                type_node: declaration.child_by_field_name("type"),
                constant,
            });
        }
    }
    None
}

fn parameter_named<'t>(unit: &SourceUnit, owner: Node<'t>, name: &str) -> Option<LocalBinding<'t>> {
    let parameters = owner.child_by_field_name("parameters")?;
    // `x => ...`: a single implicitly typed parameter.
    if parameters.kind() == "identifier" {
        return (unit.node_text(parameters) == name).then_some(LocalBinding {
            type_node: None,
            constant: None,
        });
    }
    named_children(parameters)
        .into_iter()
        .filter(|p| p.kind() == "parameter")
        .find(|p| {
            p.child_by_field_name("name")
                .is_some_and(|n| unit.node_text(n).trim_start_matches('@') == name)
        })
        .map(|p| LocalBinding {
            type_node: p.child_by_field_name("type"),
            constant: None,
        })
}
