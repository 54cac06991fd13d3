use std::collections::{BTreeSet, HashMap};

use tracing::trace;
use tree_sitter::Node;

use super::constant::{self, ConstantValue};
use super::declarations::SourceDeclarations;
use super::locals;
use super::metadata::{AssemblyReference, TypeDefinition};
use super::scope::{LookupScope, ScopeLevel};
use super::symbols::{FieldSymbol, MethodSymbol, Parameter, Symbol, SymbolOrigin, TypeSymbol};
use crate::syntax::{QualifiedName, SourceUnit, names::join_name};

/// Guards constant folding against `const A = B; const B = A;` cycles.
const MAX_FOLD_DEPTH: usize = 32;

/// Result of resolving a name in a namespace-or-type context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceOrType {
    Namespace(String),
    Type(TypeSymbol),
}

/// Semantic model over one source unit and its referenced assemblies.
///
/// Built once by `bind` and read-only afterwards; every query is a pure
/// function of the unit and the references.
pub struct CompilationModel<'a> {
    unit: &'a SourceUnit,
    declarations: SourceDeclarations<'a>,
    /// Full name -> (assembly name, definition), in reference order.
    metadata_types: HashMap<String, Vec<(&'a str, &'a TypeDefinition)>>,
    metadata_namespaces: BTreeSet<String>,
}

impl std::fmt::Debug for CompilationModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationModel")
            .field("unit", &self.unit.path())
            .field("source_types", &self.declarations.types.len())
            .field("metadata_types", &self.metadata_types.len())
            .finish()
    }
}

impl<'a> CompilationModel<'a> {
    pub fn bind(unit: &'a SourceUnit, references: &'a [AssemblyReference]) -> Self {
        let declarations = SourceDeclarations::collect(unit);

        let mut metadata_types: HashMap<String, Vec<(&'a str, &'a TypeDefinition)>> =
            HashMap::new();
        let mut metadata_namespaces = BTreeSet::new();
        for assembly in references {
            metadata_namespaces.extend(assembly.namespaces());
            for ty in &assembly.types {
                let entries = metadata_types.entry(ty.full_name()).or_default();
                if !entries.iter().any(|(name, _)| *name == assembly.name) {
                    entries.push((assembly.name.as_str(), ty));
                }
            }
        }

        trace!(
            path = unit.path(),
            source_types = declarations.types.len(),
            metadata_types = metadata_types.len(),
            "bound compilation model"
        );

        Self {
            unit,
            declarations,
            metadata_types,
            metadata_namespaces,
        }
    }

    pub fn unit(&self) -> &'a SourceUnit {
        self.unit
    }

    /// Resolve a type by its full metadata name, e.g.
    /// `System.Windows.DependencyProperty`.
    ///
    /// A type declared in source wins over metadata. Among references, a
    /// name declared by more than one assembly is ambiguous and yields `None`.
    pub fn resolve_type_by_name(&self, full_name: &str) -> Option<TypeSymbol> {
        if let Some(ty) = self.declarations.types.get(full_name) {
            return Some(ty.symbol.clone());
        }
        self.resolve_metadata_type(full_name)
    }

    /// Resolve a type by full name among the references only.
    pub fn resolve_metadata_type(&self, full_name: &str) -> Option<TypeSymbol> {
        match self.metadata_types.get(full_name)?.as_slice() {
            [(assembly, _)] => Some(TypeSymbol::new(
                SymbolOrigin::Metadata(assembly.to_string()),
                full_name,
            )),
            _ => None,
        }
    }

    fn namespace_exists(&self, full_name: &str) -> bool {
        full_name.is_empty()
            || self.declarations.namespaces.contains(full_name)
            || self.metadata_namespaces.contains(full_name)
    }

    /// Every method declared by `ty`, in declaration order.
    pub fn methods_of(&self, ty: &TypeSymbol) -> Vec<MethodSymbol> {
        match &ty.origin {
            SymbolOrigin::Source => self
                .declarations
                .types
                .get(&ty.full_name)
                .map(|t| t.methods.clone())
                .unwrap_or_default(),
            SymbolOrigin::Metadata(assembly) => {
                let Some(definition) = self.metadata_definition(assembly, &ty.full_name) else {
                    return Vec::new();
                };
                let mut ordinals: HashMap<&str, usize> = HashMap::new();
                definition
                    .methods
                    .iter()
                    .map(|m| {
                        let ordinal = ordinals.entry(m.name.as_str()).or_default();
                        let symbol = MethodSymbol {
                            containing_type: ty.clone(),
                            name: m.name.clone(),
                            ordinal: *ordinal,
                            parameters: m
                                .parameters
                                .iter()
                                .map(|p| Parameter {
                                    name: p.name.clone(),
                                    optional: p.optional,
                                    variadic: p.variadic,
                                })
                                .collect(),
                        };
                        *ordinal += 1;
                        symbol
                    })
                    .collect()
            }
        }
    }

    fn metadata_definition(&self, assembly: &str, full_name: &str) -> Option<&'a TypeDefinition> {
        self.metadata_types
            .get(full_name)?
            .iter()
            .find(|(name, _)| *name == assembly)
            .map(|(_, definition)| *definition)
    }

    /// A type nested in `ty` (or declared in namespace `ns`) named `name`.
    fn member_of(&self, container: &NamespaceOrType, name: &str) -> Option<NamespaceOrType> {
        match container {
            NamespaceOrType::Namespace(ns) => {
                let full = join_name(ns, name);
                if let Some(ty) = self.resolve_type_by_name(&full) {
                    Some(NamespaceOrType::Type(ty))
                } else if self.namespace_exists(&full) {
                    Some(NamespaceOrType::Namespace(full))
                } else {
                    None
                }
            }
            NamespaceOrType::Type(ty) => {
                let full = join_name(&ty.full_name, name);
                let found = match &ty.origin {
                    SymbolOrigin::Source => self.declarations.types.contains_key(&full),
                    SymbolOrigin::Metadata(assembly) => {
                        self.metadata_definition(assembly, &full).is_some()
                    }
                };
                found.then(|| NamespaceOrType::Type(TypeSymbol::new(ty.origin.clone(), full)))
            }
        }
    }

    fn resolve_segments(
        &self,
        start: NamespaceOrType,
        segments: &[String],
    ) -> Option<NamespaceOrType> {
        segments
            .iter()
            .try_fold(start, |current, segment| self.member_of(&current, segment))
    }

    /// Resolve a using-alias target or `using static` type: always
    /// fully qualified from the global namespace.
    fn resolve_from_global(&self, name: &QualifiedName) -> Option<NamespaceOrType> {
        if name.alias.is_some() && !name.is_global() {
            return None;
        }
        self.resolve_segments(NamespaceOrType::Namespace(String::new()), &name.segments)
    }

    fn lookup_alias(&self, scope: &LookupScope, alias: &str) -> Option<NamespaceOrType> {
        scope
            .levels
            .iter()
            .find_map(|level| level.aliases().find(|(a, _)| *a == alias))
            .and_then(|(_, target)| self.resolve_from_global(target))
    }

    /// Types brought in by `using` namespace imports at one level. More than
    /// one distinct match makes the name ambiguous.
    fn lookup_in_imports(&self, level: &ScopeLevel, name: &str) -> ImportLookup {
        let mut found: Vec<TypeSymbol> = Vec::new();
        for import in level.imports() {
            let Some(NamespaceOrType::Namespace(ns)) = self.resolve_from_global(import) else {
                continue;
            };
            if let Some(ty) = self.resolve_type_by_name(&join_name(&ns, name)) {
                if !found.contains(&ty) {
                    found.push(ty);
                }
            }
        }
        match found.len() {
            0 => ImportLookup::NotFound,
            1 => ImportLookup::Found(found.remove(0)),
            _ => ImportLookup::Ambiguous,
        }
    }

    /// C# simple-name lookup in a namespace-or-type context.
    pub fn lookup_simple(&self, scope: &LookupScope, name: &str) -> Option<NamespaceOrType> {
        for enclosing in &scope.types {
            let full = join_name(enclosing, name);
            if let Some(ty) = self.declarations.types.get(&full) {
                return Some(NamespaceOrType::Type(ty.symbol.clone()));
            }
        }

        for level in &scope.levels {
            let namespace = NamespaceOrType::Namespace(level.namespace.clone());
            if let Some(found) = self.member_of(&namespace, name) {
                return Some(found);
            }
            if let Some((_, target)) = level.aliases().find(|(alias, _)| *alias == name) {
                return self.resolve_from_global(target);
            }
            match self.lookup_in_imports(level, name) {
                ImportLookup::Found(ty) => return Some(NamespaceOrType::Type(ty)),
                ImportLookup::Ambiguous => {
                    trace!(simple_name = name, "ambiguous reference between imported namespaces");
                    return None;
                }
                ImportLookup::NotFound => {}
            }
        }
        None
    }

    /// Resolve a possibly qualified or alias-qualified name.
    pub fn lookup_namespace_or_type(
        &self,
        scope: &LookupScope,
        name: &QualifiedName,
    ) -> Option<NamespaceOrType> {
        let (first, rest) = name.segments.split_first()?;
        let start = match name.alias.as_deref() {
            Some("global") => self.member_of(&NamespaceOrType::Namespace(String::new()), first)?,
            Some(alias) => {
                let target = self.lookup_alias(scope, alias)?;
                self.member_of(&target, first)?
            }
            None => self.lookup_simple(scope, first)?,
        };
        self.resolve_segments(start, rest)
    }

    /// Resolve the symbol a node refers to.
    ///
    /// Invocations resolve to the called `MethodSymbol`, choosing the first
    /// overload whose parameter list accepts the argument count. Name nodes
    /// resolve to a namespace, type or `const` field.
    pub fn resolve_symbol(&self, node: Node<'_>) -> Option<Symbol> {
        if node.kind() == "invocation_expression" {
            return self.resolve_invocation(node).map(Symbol::Method);
        }
        let scope = LookupScope::enclosing(self.unit, node);
        let name = QualifiedName::parse(self.unit.node_text(node))?;

        if let Some(found) = self.lookup_namespace_or_type(&scope, &name) {
            return Some(match found {
                NamespaceOrType::Namespace(ns) => Symbol::Namespace(ns),
                NamespaceOrType::Type(ty) => Symbol::Type(ty),
            });
        }
        self.resolve_const_field(&scope, &name).map(Symbol::Field)
    }

    fn resolve_invocation(&self, node: Node<'_>) -> Option<MethodSymbol> {
        let function = node.child_by_field_name("function")?;
        let name = QualifiedName::parse(self.unit.node_text(function))?;
        let argument_count = argument_count(node);
        let scope = LookupScope::enclosing(self.unit, node);

        if name.is_simple() {
            return self.resolve_simple_call(node, &scope, name.last(), argument_count);
        }

        let qualifier = name.qualifier()?;
        if qualifier.alias.is_none() {
            let first = qualifier.segments.first()?;
            if self.value_hides_type(node, &scope, first) {
                trace!(simple_name = %first, "qualifier names a value, call left unresolved");
                return None;
            }
        }
        let NamespaceOrType::Type(ty) = self.lookup_namespace_or_type(&scope, &qualifier)? else {
            return None;
        };
        select_overload(self.methods_of(&ty), name.last(), argument_count)
    }

    /// `Register("X", ...)`: local functions, then members of the enclosing
    /// types and their bases, shadow `using static` imports.
    ///
    /// Calls that bind to a local function or invoke a delegate-typed value
    /// stay unresolved.
    fn resolve_simple_call(
        &self,
        node: Node<'_>,
        scope: &LookupScope,
        name: &str,
        argument_count: usize,
    ) -> Option<MethodSymbol> {
        if locals::has_local_function(self.unit, node, name)
            || locals::local_binding(self.unit, node, name).is_some()
        {
            return None;
        }

        for enclosing in &scope.types {
            let Some(ty) = self.declarations.types.get(enclosing) else {
                continue;
            };
            let chain = self.with_base_types(&ty.symbol);
            let methods: Vec<MethodSymbol> = chain
                .iter()
                .flat_map(|t| self.methods_of(t))
                .filter(|m| m.name == name)
                .collect();
            if !methods.is_empty() {
                return select_overload(methods, name, argument_count);
            }
            if self.value_member_of(&chain, name).is_some() {
                return None;
            }
        }

        let candidates: Vec<MethodSymbol> = scope
            .levels
            .iter()
            .flat_map(|level| level.static_imports())
            .filter_map(|import| match self.resolve_from_global(import) {
                Some(NamespaceOrType::Type(ty)) => Some(ty),
                _ => None,
            })
            .flat_map(|ty| self.methods_of(&ty))
            .collect();
        select_overload(candidates, name, argument_count)
    }

    fn resolve_const_field(&self, scope: &LookupScope, name: &QualifiedName) -> Option<FieldSymbol> {
        let (ty, field) = self.const_field_target(scope, name)?;
        let declared = self.declarations.types.get(&ty.full_name)?;
        declared.constants.contains_key(&field).then(|| FieldSymbol {
            containing_type: ty,
            name: field,
            is_const: true,
        })
    }

    /// The type declaring the `const` field a (possibly qualified) field
    /// reference names, searching base types too.
    fn const_field_target(
        &self,
        scope: &LookupScope,
        name: &QualifiedName,
    ) -> Option<(TypeSymbol, String)> {
        if name.is_simple() {
            return scope.types.iter().find_map(|enclosing| {
                let ty = self.declarations.types.get(enclosing)?;
                self.declaring_const(&ty.symbol, name.last())
            });
        }
        match self.lookup_namespace_or_type(scope, &name.qualifier()?)? {
            NamespaceOrType::Type(ty) => self.declaring_const(&ty, name.last()),
            NamespaceOrType::Namespace(_) => None,
        }
    }

    fn declaring_const(&self, ty: &TypeSymbol, field: &str) -> Option<(TypeSymbol, String)> {
        self.with_base_types(ty)
            .into_iter()
            .find(|t| {
                t.origin == SymbolOrigin::Source
                    && self
                        .declarations
                        .types
                        .get(&t.full_name)
                        .is_some_and(|declared| declared.constants.contains_key(field))
            })
            .map(|t| (t, field.to_string()))
    }

    /// `ty` followed by its base types, nearest first. Bases are known for
    /// source types only, so a metadata base ends its branch.
    pub fn with_base_types(&self, ty: &TypeSymbol) -> Vec<TypeSymbol> {
        let mut chain = vec![ty.clone()];
        let mut next = 0;
        while let Some(current) = chain.get(next).cloned() {
            next += 1;
            if current.origin != SymbolOrigin::Source {
                continue;
            }
            let Some(declared) = self.declarations.types.get(&current.full_name) else {
                continue;
            };
            let scope = LookupScope::enclosing(self.unit, declared.node);
            for base in &declared.bases {
                if let Some(NamespaceOrType::Type(base)) = self.lookup_namespace_or_type(&scope, base)
                {
                    if !chain.contains(&base) {
                        chain.push(base);
                    }
                }
            }
        }
        chain
    }

    /// Declared type of the first field, property or event named `name`
    /// along `chain`. The inner `None` means the type was not written.
    fn value_member_of(&self, chain: &[TypeSymbol], name: &str) -> Option<Option<Node<'a>>> {
        chain.iter().find_map(|ty| {
            if ty.origin != SymbolOrigin::Source {
                return None;
            }
            self.declarations
                .types
                .get(&ty.full_name)?
                .values
                .get(name)
                .copied()
        })
    }

    /// Whether the simple name `name` at `node` binds to a value (local,
    /// parameter, field, property or event) rather than a type.
    ///
    /// A value whose declared type is the very type the name would bind to
    /// (`Color Color`) leaves type lookup in effect.
    fn value_hides_type(&self, node: Node<'_>, scope: &LookupScope, name: &str) -> bool {
        let declared = if let Some(binding) = locals::local_binding(self.unit, node, name) {
            self.declared_type(binding.type_node)
        } else {
            let member = scope.types.iter().find_map(|enclosing| {
                let ty = self.declarations.types.get(enclosing)?;
                self.value_member_of(&self.with_base_types(&ty.symbol), name)
            });
            match member {
                Some(type_node) => self.declared_type(type_node),
                None => return false,
            }
        };
        declared.is_none() || declared != self.lookup_simple(scope, name)
    }

    fn declared_type(&self, type_node: Option<Node<'_>>) -> Option<NamespaceOrType> {
        let type_node = type_node?;
        let name = QualifiedName::parse(self.unit.node_text(type_node))?;
        self.lookup_namespace_or_type(&LookupScope::enclosing(self.unit, type_node), &name)
    }

    /// Compile-time value of an expression, if it has one.
    pub fn get_constant_value(&self, node: Node<'_>) -> Option<ConstantValue> {
        self.fold(node, &mut Vec::new())
    }

    fn fold(&self, node: Node<'_>, visiting: &mut Vec<(String, String)>) -> Option<ConstantValue> {
        if visiting.len() > MAX_FOLD_DEPTH {
            return None;
        }
        let text = self.unit.node_text(node);
        match node.kind() {
            "string_literal" => constant::decode_regular_string(text).map(ConstantValue::String),
            "verbatim_string_literal" => {
                constant::decode_verbatim_string(text).map(ConstantValue::String)
            }
            "raw_string_literal" => constant::decode_raw_string(text).map(ConstantValue::String),
            "interpolated_string_expression" => fold_plain_interpolated(text),
            "character_literal" => constant::decode_char(text).map(ConstantValue::Char),
            "integer_literal" => constant::decode_integer(text).map(ConstantValue::Integer),
            "real_literal" => constant::decode_real(text).map(ConstantValue::Real),
            "boolean_literal" => match text {
                "true" => Some(ConstantValue::Bool(true)),
                "false" => Some(ConstantValue::Bool(false)),
                _ => None,
            },
            "null_literal" => Some(ConstantValue::Null),
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node.named_children(&mut cursor).next()?;
                self.fold(inner, visiting)
            }
            "binary_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.unit.node_text(op))?;
                if operator != "+" {
                    return None;
                }
                let left = self.fold(node.child_by_field_name("left")?, visiting)?;
                let right = self.fold(node.child_by_field_name("right")?, visiting)?;
                left.concat(&right)
            }
            "identifier" | "member_access_expression" | "qualified_name" => {
                let scope = LookupScope::enclosing(self.unit, node);
                let name = QualifiedName::parse(text)?;
                if name.is_simple() {
                    // Locals hide fields; only `const` locals fold.
                    if let Some(binding) = locals::local_binding(self.unit, node, name.last()) {
                        let initializer = binding.constant?;
                        let key = (format!("local@{}", initializer.start_byte()), text.to_string());
                        if visiting.contains(&key) {
                            return None;
                        }
                        visiting.push(key);
                        let value = self.fold(initializer, visiting);
                        visiting.pop();
                        return value;
                    }
                }
                let (ty, field) = self.const_field_target(&scope, &name)?;
                if ty.origin != SymbolOrigin::Source {
                    return None;
                }
                let key = (ty.full_name.clone(), field.clone());
                if visiting.contains(&key) {
                    return None;
                }
                let declared = self.declarations.types.get(&ty.full_name)?;
                let initializer = *declared.constants.get(&field)?;
                visiting.push(key);
                let value = self.fold(initializer, visiting);
                visiting.pop();
                value
            }
            _ => None,
        }
    }
}

enum ImportLookup {
    NotFound,
    Found(TypeSymbol),
    Ambiguous,
}

fn argument_count(invocation: Node<'_>) -> usize {
    let Some(arguments) = invocation.child_by_field_name("arguments") else {
        return 0;
    };
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "argument")
        .count()
}

fn select_overload(
    methods: Vec<MethodSymbol>,
    name: &str,
    argument_count: usize,
) -> Option<MethodSymbol> {
    methods
        .into_iter()
        .find(|m| m.name == name && m.accepts_arity(argument_count))
}

/// `$"Value"` with no holes is a plain string constant.
fn fold_plain_interpolated(text: &str) -> Option<ConstantValue> {
    let body = text.strip_prefix('$')?;
    if body.contains('{') {
        return None;
    }
    let value = if body.starts_with('@') {
        constant::decode_verbatim_string(body)
    } else if body.starts_with("\"\"\"") {
        constant::decode_raw_string(body)
    } else {
        constant::decode_regular_string(body)
    };
    value.map(ConstantValue::String)
}
