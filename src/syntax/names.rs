//! Name helpers.
//!
//! Callees and type references are read from their source text rather than
//! from grammar-specific node shapes: `global::System.Windows.DependencyProperty`
//! becomes alias `global` + segments `[System, Windows, DependencyProperty]`.
//! Anything that is not a plain dotted name (generic arguments, calls,
//! element access) yields `None`.

/// Reserved C# keywords. Contextual keywords (`nameof`, `var`, ...) are
/// valid identifiers and are deliberately absent.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

pub fn is_reserved_keyword(text: &str) -> bool {
    RESERVED_KEYWORDS.contains(&text)
}

/// Whether `text` is a C# identifier (without the `@` verbatim prefix).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Render `name` so it can be used as an identifier in source.
///
/// Reserved keywords get the `@` verbatim prefix: `class` -> `@class`.
pub fn escape_identifier(name: &str) -> String {
    if is_reserved_keyword(name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Parse one identifier token, accepting the `@` prefix on any identifier
/// and rejecting bare reserved keywords.
fn parse_identifier(token: &str) -> Option<String> {
    match token.strip_prefix('@') {
        Some(rest) if is_identifier(rest) => Some(rest.to_string()),
        Some(_) => None,
        None if is_identifier(token) && !is_reserved_keyword(token) => Some(token.to_string()),
        None => None,
    }
}

/// A possibly alias-qualified dotted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// The `alias` in `alias::A.B`, e.g. `global`.
    pub alias: Option<String>,
    pub segments: Vec<String>,
}

impl QualifiedName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            segments: vec![name.into()],
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        if text.contains("//") || text.contains("/*") {
            return None;
        }
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        let (alias, rest) = match compact.split_once("::") {
            Some((alias, rest)) => (Some(parse_identifier(alias)?), rest),
            None => (None, compact.as_str()),
        };

        let segments = rest
            .split('.')
            .map(parse_identifier)
            .collect::<Option<Vec<_>>>()?;

        Some(Self { alias, segments })
    }

    pub fn is_global(&self) -> bool {
        self.alias.as_deref() == Some("global")
    }

    pub fn is_simple(&self) -> bool {
        self.alias.is_none() && self.segments.len() == 1
    }

    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// The name without its last segment: `A.B.C` -> `A.B`.
    pub fn qualifier(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            alias: self.alias.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{}::", alias)?;
        }
        write!(f, "{}", self.dotted())
    }
}

/// Join a namespace and a simple name into a full name.
pub fn join_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
