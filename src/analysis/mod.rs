//! Analysis pipeline.
//!
//! For each source unit: `matcher` finds the calls that bind to a target
//! method, `classifier` decides the shape of their name argument, and
//! `emitter` turns literal names into diagnostics and `nameof` fixes.
//! `analyze` runs every registered rule, applies `#pragma warning`
//! suppressions and returns diagnostics in a deterministic order.

pub mod classifier;
pub mod diagnostic;
pub mod emitter;
pub mod matcher;
pub mod suppressions;

use tracing::debug;

use crate::rules::{Rule, RuleRegistry};
use crate::semantic::{AssemblyReference, CompilationModel};
use crate::syntax::{EditError, FixEdit, LinePosition, ParseError, SourceUnit, apply_edits};

pub use classifier::{ArgumentShape, classify, is_name_of_expression, name_argument};
pub use diagnostic::{DiagnosticRecord, Severity};
pub use matcher::{CallArgument, CallSite, TargetSymbolSet, find_call_sites};
pub use suppressions::SuppressionContext;

/// Run every rule in `registry` over one bound unit.
///
/// A unit with syntax errors yields no diagnostics. The result is sorted
/// by span start, then rule id.
pub fn analyze(
    unit: &SourceUnit,
    model: &CompilationModel<'_>,
    registry: &RuleRegistry,
) -> Vec<DiagnosticRecord> {
    if unit.has_syntax_errors() {
        debug!(path = unit.path(), "syntax errors, skipping semantic analysis");
        return Vec::new();
    }

    let suppressions = SuppressionContext::from_source(unit.text());
    let mut diagnostics: Vec<DiagnosticRecord> = registry
        .iter()
        .flat_map(|rule| rule.check(model))
        .filter(|d| !suppressions.should_ignore(d.location.line, d.rule_id))
        .collect();

    diagnostics.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| a.rule_id.cmp(b.rule_id))
            .then_with(|| a.span.end.cmp(&b.span.end))
    });
    diagnostics.dedup();
    diagnostics
}

/// The fix for a diagnostic, from the rule that produced it.
pub fn suggest_fix(registry: &RuleRegistry, diagnostic: &DiagnosticRecord) -> Option<FixEdit> {
    registry.get(diagnostic.rule_id)?.fix(diagnostic)
}

/// The fix for a diagnostic, when applying it leaves valid source.
pub fn applicable_fix(registry: &RuleRegistry, diagnostic: &DiagnosticRecord) -> Option<FixEdit> {
    let rule = registry.get(diagnostic.rule_id)?;
    if !rule.fix_applies(diagnostic) {
        return None;
    }
    rule.fix(diagnostic)
}

/// Result of analyzing one file.
#[derive(Debug)]
pub struct UnitAnalysis {
    pub unit: SourceUnit,
    pub diagnostics: Vec<DiagnosticRecord>,
}

impl UnitAnalysis {
    pub fn path(&self) -> &str {
        self.unit.path()
    }

    /// Position of the first syntax error, if the unit could not be analyzed.
    pub fn syntax_error(&self) -> Option<LinePosition> {
        self.unit.first_syntax_error()
    }

    pub fn fixes(&self, registry: &RuleRegistry) -> Vec<FixEdit> {
        self.diagnostics
            .iter()
            .filter_map(|d| applicable_fix(registry, d))
            .collect()
    }

    /// The unit's text with every fix applied.
    pub fn fixed_text(&self, registry: &RuleRegistry) -> Result<String, EditError> {
        apply_edits(self.unit.text(), &self.fixes(registry))
    }
}

/// Parse, bind and analyze one file.
pub fn analyze_text(
    path: &str,
    text: &str,
    references: &[AssemblyReference],
    registry: &RuleRegistry,
) -> Result<UnitAnalysis, ParseError> {
    let unit = SourceUnit::parse(path, text)?;
    let diagnostics = {
        let model = CompilationModel::bind(&unit, references);
        analyze(&unit, &model, registry)
    };
    Ok(UnitAnalysis { unit, diagnostics })
}
