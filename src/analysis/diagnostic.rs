use serde::Serialize;

use crate::syntax::{LinePosition, TextSpan};

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One finding of one rule in one source unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Byte span of the flagged argument expression.
    pub span: TextSpan,
    /// 1-based start position of `span`.
    pub location: LinePosition,
    /// Name used to build the `nameof(...)` replacement.
    pub member_name: String,
}
