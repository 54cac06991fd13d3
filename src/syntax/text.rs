use serde::Serialize;
use thiserror::Error;

/// Half-open byte range `[start, end)` into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// 1-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LinePosition {
    pub line: usize,
    pub column: usize,
}

impl LinePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for LinePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of every line start, for offset -> line/column mapping.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end clamp to the last line.
    pub fn position(&self, text: &str, offset: usize) -> LinePosition {
        let offset = offset.min(text.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        LinePosition::new(line_idx + 1, column + 1)
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text<'t>(&self, text: &'t str, line: usize) -> &'t str {
        let Some(&start) = line.checked_sub(1).and_then(|i| self.line_starts.get(i)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        text.get(start..end)
            .map(|l| l.trim_end_matches('\r'))
            .unwrap_or("")
    }
}

/// A single span-based replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixEdit {
    pub span: TextSpan,
    pub replacement: String,
}

impl FixEdit {
    pub fn new(span: TextSpan, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit {span:?} is outside the text (length {len})")]
    OutOfBounds { span: TextSpan, len: usize },
    #[error("edit {span:?} does not fall on character boundaries")]
    NotCharBoundary { span: TextSpan },
    #[error("edits {first:?} and {second:?} overlap")]
    Overlapping { first: TextSpan, second: TextSpan },
}

/// Apply non-overlapping edits to `text`.
///
/// Edits may be given in any order; they are applied by ascending span.
/// Identical duplicate edits are collapsed so applying the same fix twice
/// from one diagnostic list stays a no-op.
pub fn apply_edits(text: &str, edits: &[FixEdit]) -> Result<String, EditError> {
    let mut sorted: Vec<&FixEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.span.start, e.span.end));
    sorted.dedup();

    for edit in &sorted {
        if edit.span.start > edit.span.end || edit.span.end > text.len() {
            return Err(EditError::OutOfBounds {
                span: edit.span,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(edit.span.start) || !text.is_char_boundary(edit.span.end) {
            return Err(EditError::NotCharBoundary { span: edit.span });
        }
    }
    for pair in sorted.windows(2) {
        if pair[0].span.overlaps(&pair[1].span) || pair[0].span.start == pair[1].span.start {
            return Err(EditError::Overlapping {
                first: pair[0].span,
                second: pair[1].span,
            });
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in sorted {
        out.push_str(&text[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}
