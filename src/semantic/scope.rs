//! Lexical scope of a node: enclosing types, enclosing namespaces and the
//! `using` directives visible at each namespace level.

use tree_sitter::Node;

use super::declarations::{
    declaration_body, declared_name, is_type_declaration, named_children,
};
use crate::syntax::{QualifiedName, SourceUnit, names::join_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsingDirective {
    /// `using System.Windows;`
    Namespace(QualifiedName),
    /// `using DP = System.Windows.DependencyProperty;`
    Alias { alias: String, target: QualifiedName },
    /// `using static System.Windows.DependencyProperty;`
    Static(QualifiedName),
}

impl UsingDirective {
    /// Parse the text of a `using_directive` node.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().strip_suffix(';')?.trim();
        let text = text.strip_prefix("global").map(str::trim_start).unwrap_or(text);
        let rest = text.strip_prefix("using")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.trim();

        if let Some(target) = rest.strip_prefix("static") {
            if target.starts_with(char::is_whitespace) {
                return QualifiedName::parse(target).map(UsingDirective::Static);
            }
        }
        if let Some((alias, target)) = rest.split_once('=') {
            let alias = QualifiedName::parse(alias)?;
            if !alias.is_simple() {
                return None;
            }
            return Some(UsingDirective::Alias {
                alias: alias.last().to_string(),
                target: QualifiedName::parse(target)?,
            });
        }
        QualifiedName::parse(rest).map(UsingDirective::Namespace)
    }
}

/// One namespace level and the directives declared directly in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeLevel {
    /// Full namespace name; empty for the global namespace.
    pub namespace: String,
    pub usings: Vec<UsingDirective>,
}

impl ScopeLevel {
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &QualifiedName)> {
        self.usings.iter().filter_map(|u| match u {
            UsingDirective::Alias { alias, target } => Some((alias.as_str(), target)),
            _ => None,
        })
    }

    pub fn imports(&self) -> impl Iterator<Item = &QualifiedName> {
        self.usings.iter().filter_map(|u| match u {
            UsingDirective::Namespace(name) => Some(name),
            _ => None,
        })
    }

    pub fn static_imports(&self) -> impl Iterator<Item = &QualifiedName> {
        self.usings.iter().filter_map(|u| match u {
            UsingDirective::Static(name) => Some(name),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupScope {
    /// Full names of the enclosing types, innermost first.
    pub types: Vec<String>,
    /// Namespace levels, innermost first; the last one is always global.
    pub levels: Vec<ScopeLevel>,
}

impl LookupScope {
    pub fn enclosing(unit: &SourceUnit, node: Node<'_>) -> Self {
        let mut chain = Vec::new();
        let mut current = node.parent();
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = ancestor.parent();
        }
        chain.reverse();

        let mut levels = vec![ScopeLevel::default()];
        let mut types: Vec<String> = Vec::new();
        let target = node.start_byte();

        for ancestor in &chain {
            match ancestor.kind() {
                "compilation_unit" => {
                    let children = named_children(*ancestor);
                    let file_scoped = children
                        .iter()
                        .find(|c| c.kind() == "file_scoped_namespace_declaration");
                    let split = file_scoped.map(|n| n.start_byte()).unwrap_or(usize::MAX);
                    levels[0].usings = usings_in(unit, &children, |c| c.start_byte() < split);

                    // Sibling form: members follow the declaration at top level.
                    if let Some(ns) = file_scoped {
                        let is_ancestor = chain.contains(ns);
                        if !is_ancestor && ns.start_byte() <= target {
                            if let Some(name) = declared_name(unit, *ns) {
                                let usings =
                                    usings_in(unit, &children, |c| c.start_byte() > split);
                                push_namespace(&mut levels, &name, usings);
                            }
                        }
                    }
                }
                "file_scoped_namespace_declaration" => {
                    if let Some(name) = declared_name(unit, *ancestor) {
                        let children = named_children(*ancestor);
                        let usings = usings_in(unit, &children, |_| true);
                        push_namespace(&mut levels, &name, usings);
                    }
                }
                "namespace_declaration" => {
                    if let Some(name) = declared_name(unit, *ancestor) {
                        let children = declaration_body(*ancestor)
                            .map(named_children)
                            .unwrap_or_default();
                        let usings = usings_in(unit, &children, |_| true);
                        push_namespace(&mut levels, &name, usings);
                    }
                }
                _ if is_type_declaration(*ancestor) => {
                    if let Some(name) = declared_name(unit, *ancestor) {
                        let prefix = types
                            .last()
                            .cloned()
                            .unwrap_or_else(|| current_namespace(&levels).to_string());
                        types.push(join_name(&prefix, name.last()));
                    }
                }
                _ => {}
            }
        }

        types.reverse();
        levels.reverse();
        Self { types, levels }
    }

    pub fn namespace(&self) -> &str {
        self.levels.first().map(|l| l.namespace.as_str()).unwrap_or("")
    }
}

fn current_namespace(levels: &[ScopeLevel]) -> &str {
    levels.last().map(|l| l.namespace.as_str()).unwrap_or("")
}

/// `namespace A.B` opens `A` and then `A.B`; directives belong to the innermost.
fn push_namespace(levels: &mut Vec<ScopeLevel>, name: &QualifiedName, usings: Vec<UsingDirective>) {
    let count = name.segments.len();
    for (i, segment) in name.segments.iter().enumerate() {
        let namespace = join_name(current_namespace(levels), segment);
        let usings = if i + 1 == count { usings.clone() } else { Vec::new() };
        levels.push(ScopeLevel { namespace, usings });
    }
}

fn usings_in(
    unit: &SourceUnit,
    children: &[Node<'_>],
    keep: impl Fn(&Node<'_>) -> bool,
) -> Vec<UsingDirective> {
    children
        .iter()
        .filter(|c| c.kind() == "using_directive" && keep(c))
        .filter_map(|c| UsingDirective::parse(unit.node_text(*c)))
        .collect()
}
