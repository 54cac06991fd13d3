//! Issue types for CLI reporting.
//!
//! An issue is a diagnostic or a file-level failure, carrying everything
//! the reporter needs to display it and the fix action needs to apply it.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::analysis::{DiagnosticRecord, Severity};
use crate::syntax::FixEdit;

/// Rule id reported for files that could not be analyzed.
pub const PARSE_ERROR_RULE: &str = "parse-error";

// ============================================================
// Source Location & Context
// ============================================================

/// Position in a source file, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position plus the source line it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A rule diagnostic, with its suggested fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticIssue {
    pub context: SourceContext,
    pub diagnostic: DiagnosticRecord,
    pub fix: Option<FixEdit>,
}

impl DiagnosticIssue {
    /// Byte length of the flagged expression, for caret underlining.
    pub fn span_len(&self) -> usize {
        self.diagnostic.span.len()
    }

    /// The text the fix writes, if any.
    pub fn replacement(&self) -> Option<&str> {
        self.fix.as_ref().map(|f| f.replacement.as_str())
    }
}

/// File that could not be read, parsed or analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// An issue found during a run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Diagnostic(DiagnosticIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Issue::ParseError(_))
    }

    pub fn file_path(&self) -> &str {
        self.sort_key().0
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source location with the line for context display.
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Common view of issues for the reporter.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> &str;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Display width of the flagged range, in source characters.
    fn highlight_len(&self) -> usize {
        1
    }
}

impl Report for DiagnosticIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.diagnostic.message.clone()
    }

    fn report_severity(&self) -> Severity {
        self.diagnostic.severity
    }

    fn report_rule(&self) -> &str {
        self.diagnostic.rule_id
    }

    fn hint(&self) -> Option<String> {
        match self.replacement() {
            Some(replacement) => Some(format!("replace with `{}`", replacement)),
            None => Some(format!(
                "no automatic fix: \"{}\" is not a valid identifier",
                self.diagnostic.member_name
            )),
        }
    }

    fn highlight_len(&self) -> usize {
        // Clipped to the first line of the span.
        let flagged = self
            .context
            .source_line
            .chars()
            .skip(self.context.col().saturating_sub(1))
            .scan(0usize, |bytes, c| {
                *bytes += c.len_utf8();
                Some(*bytes)
            })
            .take_while(|bytes| *bytes <= self.span_len())
            .count();
        flagged.max(1)
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> &str {
        PARSE_ERROR_RULE
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.report_rule().cmp(other.report_rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
