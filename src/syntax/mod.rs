//! C# syntax layer.
//!
//! Wraps tree-sitter so the rest of the crate never touches the parser
//! directly:
//!
//! - `source_unit`: `SourceUnit`, one parsed file (text + tree + line index)
//! - `names`: dotted/aliased name extraction and identifier helpers
//! - `text`: spans, line positions and span-based text edits

pub mod names;
pub mod source_unit;
pub mod text;

pub use names::{QualifiedName, escape_identifier, is_identifier, is_reserved_keyword};
pub use source_unit::{ParseError, SourceUnit, descendants};
pub use text::{EditError, FixEdit, LineIndex, LinePosition, TextSpan, apply_edits};
