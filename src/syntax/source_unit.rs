use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use super::text::{LineIndex, LinePosition, TextSpan};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load the C# grammar: {0}")]
    Language(String),
    #[error("parser produced no syntax tree for {path}")]
    NoTree { path: String },
}

/// One parsed C# file.
///
/// Owns the source text, its tree-sitter tree and a line index. Parsing
/// never fails on malformed input: the tree simply contains `ERROR` nodes,
/// which `has_syntax_errors` reports.
pub struct SourceUnit {
    path: String,
    text: String,
    tree: Tree,
    line_index: LineIndex,
}

impl std::fmt::Debug for SourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceUnit")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .field("has_syntax_errors", &self.has_syntax_errors())
            .finish()
    }
}

impl SourceUnit {
    pub fn parse(path: impl Into<String>, text: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| ParseError::NoTree { path: path.clone() })?;

        let line_index = LineIndex::new(&text);
        Ok(Self {
            path,
            text,
            tree,
            line_index,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.root().has_error()
    }

    /// Position of the first `ERROR` or missing node, if any.
    pub fn first_syntax_error(&self) -> Option<LinePosition> {
        if !self.has_syntax_errors() {
            return None;
        }
        descendants(self.root())
            .find(|n| n.is_error() || n.is_missing())
            .map(|n| self.position(n.start_byte()))
    }

    pub fn node_text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }

    pub fn span_of(&self, node: Node<'_>) -> TextSpan {
        TextSpan::new(node.start_byte(), node.end_byte())
    }

    pub fn position(&self, offset: usize) -> LinePosition {
        self.line_index.position(&self.text, offset)
    }

    pub fn line_text(&self, line: usize) -> &str {
        self.line_index.line_text(&self.text, line)
    }
}

/// Pre-order walk over `root` and all of its descendants, in source order.
pub fn descendants(root: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    let mut stack = vec![root];
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
        Some(node)
    })
}
