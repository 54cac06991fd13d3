//! Source declaration collection.
//!
//! One pass over the tree records every namespace and type the unit
//! declares, with the methods (for overload binding), `const` fields (for
//! constant folding), value members (for name hiding) and base types of
//! each type.

use std::collections::{BTreeSet, HashMap};

use tree_sitter::Node;

use super::symbols::{MethodSymbol, Parameter, SymbolOrigin, TypeSymbol};
use crate::syntax::{QualifiedName, SourceUnit, names::join_name};

pub(crate) const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
    "record_struct_declaration",
    "enum_declaration",
];

pub(crate) fn is_type_declaration(node: Node<'_>) -> bool {
    TYPE_DECLARATION_KINDS.contains(&node.kind())
}

/// The `name` of a namespace or type declaration, as a dotted name.
pub(crate) fn declared_name(unit: &SourceUnit, node: Node<'_>) -> Option<QualifiedName> {
    let name_node = node.child_by_field_name("name").or_else(|| {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "identifier" | "qualified_name"))
    })?;
    QualifiedName::parse(unit.node_text(name_node))
}

/// The member list of a namespace or type declaration.
pub(crate) fn declaration_body<'a>(node: Node<'a>) -> Option<Node<'a>> {
    node.child_by_field_name("body").or_else(|| {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "declaration_list" | "enum_member_declaration_list"))
    })
}

pub(crate) fn named_children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub(crate) fn has_modifier(unit: &SourceUnit, node: Node<'_>, modifier: &str) -> bool {
    children(node).into_iter().any(|c| {
        (c.kind() == "modifier" && unit.node_text(c) == modifier) || c.kind() == modifier
    })
}

/// A type declared in the analyzed unit.
#[derive(Debug, Clone)]
pub struct SourceType<'a> {
    pub symbol: TypeSymbol,
    pub node: Node<'a>,
    pub methods: Vec<MethodSymbol>,
    /// `const` field name -> initializer expression.
    pub constants: HashMap<String, Node<'a>>,
    /// Field, property and event names -> declared type, if written.
    pub values: HashMap<String, Option<Node<'a>>>,
    /// Entries of the base list, as written.
    pub bases: Vec<QualifiedName>,
}

#[derive(Debug, Default)]
pub struct SourceDeclarations<'a> {
    pub types: HashMap<String, SourceType<'a>>,
    pub namespaces: BTreeSet<String>,
}

impl<'a> SourceDeclarations<'a> {
    pub fn collect(unit: &'a SourceUnit) -> Self {
        let mut declarations = Self::default();
        declarations.collect_members(unit, unit.root(), "", None);
        declarations
    }

    fn add_namespace(&mut self, full_name: &str) {
        let mut current = String::new();
        for segment in full_name.split('.').filter(|s| !s.is_empty()) {
            current = join_name(&current, segment);
            self.namespaces.insert(current.clone());
        }
    }

    /// Collect the members of a compilation unit, namespace body or type body.
    fn collect_members(
        &mut self,
        unit: &'a SourceUnit,
        container: Node<'a>,
        namespace: &str,
        enclosing_type: Option<&str>,
    ) {
        let mut namespace = namespace.to_string();
        for child in named_children(container) {
            match child.kind() {
                "file_scoped_namespace_declaration" => {
                    // Members may follow the declaration as siblings or be
                    // nested inside it, depending on the grammar revision.
                    if let Some(name) = declared_name(unit, child) {
                        namespace = join_name(&namespace, &name.dotted());
                        self.add_namespace(&namespace);
                        self.collect_members(unit, child, &namespace, None);
                    }
                }
                "namespace_declaration" => {
                    let Some(name) = declared_name(unit, child) else {
                        continue;
                    };
                    let full = join_name(&namespace, &name.dotted());
                    self.add_namespace(&full);
                    if let Some(body) = declaration_body(child) {
                        self.collect_members(unit, body, &full, None);
                    }
                }
                _ if is_type_declaration(child) => {
                    self.collect_type(unit, child, &namespace, enclosing_type);
                }
                "declaration_list" => {
                    self.collect_members(unit, child, &namespace, enclosing_type);
                }
                _ => {}
            }
        }
    }

    fn collect_type(
        &mut self,
        unit: &'a SourceUnit,
        node: Node<'a>,
        namespace: &str,
        enclosing_type: Option<&str>,
    ) {
        let Some(name) = declared_name(unit, node) else {
            return;
        };
        let prefix = enclosing_type.unwrap_or(namespace);
        let full_name = join_name(prefix, name.last());
        let symbol = TypeSymbol::new(SymbolOrigin::Source, full_name.clone());

        let mut methods = Vec::new();
        let mut constants = HashMap::new();
        let mut values = HashMap::new();
        let body = declaration_body(node);

        for member in body.map(named_children).unwrap_or_default() {
            match member.kind() {
                "method_declaration" => {
                    if let Some(method) = method_symbol(unit, member, &symbol, &methods) {
                        methods.push(method);
                    }
                }
                "field_declaration" | "event_field_declaration" => {
                    if has_modifier(unit, member, "const") {
                        collect_constants(unit, member, &mut constants);
                    }
                    for declaration in variable_declarations(member) {
                        let ty = declaration.child_by_field_name("type");
                        for name in declarator_names(unit, declaration) {
                            values.entry(name).or_insert(ty);
                        }
                    }
                }
                "property_declaration" | "event_declaration" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        let name = unit.node_text(name).trim_start_matches('@').to_string();
                        values.entry(name).or_insert(member.child_by_field_name("type"));
                    }
                }
                _ => {}
            }
        }

        self.types.entry(full_name.clone()).or_insert(SourceType {
            symbol,
            node,
            methods,
            constants,
            values,
            bases: base_list(unit, node),
        });

        if let Some(body) = body {
            self.collect_members(unit, body, namespace, Some(&full_name));
        }
    }
}

fn method_symbol(
    unit: &SourceUnit,
    node: Node<'_>,
    containing_type: &TypeSymbol,
    existing: &[MethodSymbol],
) -> Option<MethodSymbol> {
    let name = node
        .child_by_field_name("name")
        .map(|n| unit.node_text(n).trim_start_matches('@').to_string())?;
    let parameters = node
        .child_by_field_name("parameters")
        .map(|list| {
            named_children(list)
                .into_iter()
                .filter(|p| p.kind() == "parameter")
                .map(|p| parameter(unit, p))
                .collect()
        })
        .unwrap_or_default();
    let ordinal = existing.iter().filter(|m| m.name == name).count();
    Some(MethodSymbol {
        containing_type: containing_type.clone(),
        name,
        ordinal,
        parameters,
    })
}

fn parameter(unit: &SourceUnit, node: Node<'_>) -> Parameter {
    let name = node
        .child_by_field_name("name")
        .map(|n| unit.node_text(n).trim_start_matches('@').to_string())
        .unwrap_or_default();
    let text = unit.node_text(node);
    let optional = children(node)
        .into_iter()
        .any(|c| c.kind() == "=" || c.kind() == "equals_value_clause");
    Parameter {
        name,
        optional,
        variadic: text.trim_start().starts_with("params "),
    }
}

/// `class C : Base, IFoo` -> `[Base, IFoo]`. Generic and primary
/// constructor entries keep their type name only.
fn base_list(unit: &SourceUnit, node: Node<'_>) -> Vec<QualifiedName> {
    let Some(list) = children(node).into_iter().find(|c| c.kind() == "base_list") else {
        return Vec::new();
    };
    named_children(list)
        .into_iter()
        .filter_map(|entry| match entry.kind() {
            "primary_constructor_base_type" => named_children(entry).into_iter().next(),
            _ => Some(entry),
        })
        .filter_map(|ty| {
            let ty = match ty.kind() {
                "generic_name" => named_children(ty).into_iter().next()?,
                _ => ty,
            };
            QualifiedName::parse(unit.node_text(ty))
        })
        .collect()
}

/// `variable_declaration` children of a field or local declaration.
pub(crate) fn variable_declarations<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "variable_declaration")
        .collect()
}

fn declarators<'a>(declaration: Node<'a>) -> Vec<Node<'a>> {
    named_children(declaration)
        .into_iter()
        .filter(|c| c.kind() == "variable_declarator")
        .collect()
}

pub(crate) fn declarator_names(unit: &SourceUnit, declaration: Node<'_>) -> Vec<String> {
    declarators(declaration)
        .into_iter()
        .filter_map(|declarator| declarator_name(unit, declarator))
        .collect()
}

fn declarator_name(unit: &SourceUnit, declarator: Node<'_>) -> Option<String> {
    let name_node = declarator.child_by_field_name("name").or_else(|| {
        children(declarator)
            .into_iter()
            .find(|c| c.kind() == "identifier")
    })?;
    Some(unit.node_text(name_node).trim_start_matches('@').to_string())
}

fn collect_constants<'a>(
    unit: &'a SourceUnit,
    field: Node<'a>,
    constants: &mut HashMap<String, Node<'a>>,
) {
    for declaration in variable_declarations(field) {
        for declarator in declarators(declaration) {
            if let Some((name, initializer)) = declarator_initializer(unit, declarator) {
                constants.entry(name).or_insert(initializer);
            }
        }
    }
}

/// Name and initializer expression of `Name = expr`.
pub(crate) fn declarator_initializer<'t>(
    unit: &SourceUnit,
    declarator: Node<'t>,
) -> Option<(String, Node<'t>)> {
    let parts = children(declarator);
    let name = declarator_name(unit, declarator)?;

    if let Some(clause) = parts.iter().find(|c| c.kind() == "equals_value_clause") {
        let value = named_children(*clause).into_iter().next()?;
        return Some((name, value));
    }
    let eq = parts.iter().position(|c| c.kind() == "=")?;
    let value = parts[eq + 1..].iter().copied().find(|c| c.is_named())?;
    Some((name, value))
}
