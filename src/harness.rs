//! Verification harness for rules.
//!
//! Drives the analysis pipeline over literal source fixtures and checks
//! both the reported diagnostics and the fixed output:
//!
//! ```ignore
//! let verifier = Verifier::new();
//! verifier.verify_diagnostics(source, &[ExpectedDiagnostic::new(RULE_ID).at(7, 41)])?;
//! verifier.verify_fix(source, fixed)?;
//! ```

use std::fmt::Write as _;

use thiserror::Error;

use crate::analysis::{DiagnosticRecord, analyze_text};
use crate::rules::RuleRegistry;
use crate::semantic::{AssemblyReference, well_known};
use crate::syntax::{EditError, ParseError};

/// Fixture file name used for every verified source.
pub const FIXTURE_PATH: &str = "Test0.cs";

/// Fix passes before giving up on reaching a fixed point.
const MAX_FIX_ITERATIONS: usize = 8;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("expected {expected} diagnostic(s), got {actual}:\n{listing}")]
    DiagnosticCount {
        expected: usize,
        actual: usize,
        listing: String,
    },
    #[error("diagnostic #{index} mismatch: expected {expected}, got {actual}")]
    DiagnosticMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("fixed source mismatch\n--- expected\n{expected}\n--- actual\n{actual}")]
    FixMismatch { expected: String, actual: String },
    #[error("fixes did not converge; diagnostics remain:\n{listing}")]
    NotConverged { listing: String },
}

/// A diagnostic a fixture expects, matched field by field. Unset fields
/// are not compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDiagnostic {
    pub rule_id: String,
    pub position: Option<(usize, usize)>,
    pub message: Option<String>,
}

impl ExpectedDiagnostic {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            position: None,
            message: None,
        }
    }

    /// 1-based line and column of the diagnostic's start.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some((line, column));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn matches(&self, actual: &DiagnosticRecord) -> bool {
        self.rule_id == actual.rule_id
            && self
                .position
                .is_none_or(|(line, column)| {
                    actual.location.line == line && actual.location.column == column
                })
            && self.message.as_deref().is_none_or(|m| m == actual.message)
    }
}

impl std::fmt::Display for ExpectedDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rule_id)?;
        if let Some((line, column)) = self.position {
            write!(f, " at {}:{}", line, column)?;
        }
        if let Some(message) = &self.message {
            write!(f, " \"{}\"", message)?;
        }
        Ok(())
    }
}

fn describe(diagnostic: &DiagnosticRecord) -> String {
    format!(
        "{} at {} \"{}\"",
        diagnostic.rule_id, diagnostic.location, diagnostic.message
    )
}

fn listing(diagnostics: &[DiagnosticRecord]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let _ = writeln!(out, "  {}", describe(d));
    }
    out
}

/// Runs rules over fixtures with a fixed reference set and registry.
#[derive(Debug, Clone)]
pub struct Verifier {
    references: Vec<AssemblyReference>,
    registry: RuleRegistry,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier {
    /// Built-in rules against the default WPF reference set.
    pub fn new() -> Self {
        Self {
            references: well_known::wpf_references(),
            registry: RuleRegistry::builtin(),
        }
    }

    pub fn with_references(mut self, references: Vec<AssemblyReference>) -> Self {
        self.references = references;
        self
    }

    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn diagnostics(&self, source: &str) -> Result<Vec<DiagnosticRecord>, VerifyError> {
        let analysis = analyze_text(FIXTURE_PATH, source, &self.references, &self.registry)?;
        Ok(analysis.diagnostics)
    }

    /// Check that `source` produces exactly `expected`, in order.
    pub fn verify_diagnostics(
        &self,
        source: &str,
        expected: &[ExpectedDiagnostic],
    ) -> Result<(), VerifyError> {
        let actual = self.diagnostics(source)?;
        if actual.len() != expected.len() {
            return Err(VerifyError::DiagnosticCount {
                expected: expected.len(),
                actual: actual.len(),
                listing: listing(&actual),
            });
        }
        for (index, (want, got)) in expected.iter().zip(&actual).enumerate() {
            if !want.matches(got) {
                return Err(VerifyError::DiagnosticMismatch {
                    index,
                    expected: want.to_string(),
                    actual: describe(got),
                });
            }
        }
        Ok(())
    }

    /// Apply every suggested fix, re-analyzing until no fixable diagnostic
    /// remains.
    pub fn apply_fixes(&self, source: &str) -> Result<String, VerifyError> {
        let mut text = source.to_string();
        for _ in 0..MAX_FIX_ITERATIONS {
            let analysis = analyze_text(FIXTURE_PATH, &text, &self.references, &self.registry)?;
            if analysis.fixes(&self.registry).is_empty() {
                return Ok(text);
            }
            text = analysis.fixed_text(&self.registry)?;
        }
        let remaining = self.diagnostics(&text)?;
        Err(VerifyError::NotConverged {
            listing: listing(&remaining),
        })
    }

    /// Check that fixing `source` yields `expected` and that the result
    /// is diagnostic-free.
    pub fn verify_fix(&self, source: &str, expected: &str) -> Result<(), VerifyError> {
        let actual = self.apply_fixes(source)?;
        if actual != expected {
            return Err(VerifyError::FixMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        let remaining = self.diagnostics(&actual)?;
        if !remaining.is_empty() {
            return Err(VerifyError::NotConverged {
                listing: listing(&remaining),
            });
        }
        Ok(())
    }
}

/// One fixture: source, expected diagnostics and, optionally, the
/// expected fixed source.
#[derive(Debug, Clone)]
pub struct TestCase<'s> {
    pub source: &'s str,
    pub expected: Vec<ExpectedDiagnostic>,
    pub fixed: Option<&'s str>,
}

impl<'s> TestCase<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            expected: Vec::new(),
            fixed: None,
        }
    }

    pub fn expect(mut self, diagnostic: ExpectedDiagnostic) -> Self {
        self.expected.push(diagnostic);
        self
    }

    pub fn fixed(mut self, fixed: &'s str) -> Self {
        self.fixed = Some(fixed);
        self
    }

    pub fn run(&self, verifier: &Verifier) -> Result<(), VerifyError> {
        verifier.verify_diagnostics(self.source, &self.expected)?;
        if let Some(fixed) = self.fixed {
            verifier.verify_fix(self.source, fixed)?;
        }
        Ok(())
    }
}
