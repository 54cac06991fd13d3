//! Diagnostic and fix emitter.

use super::diagnostic::DiagnosticRecord;
use super::matcher::CallArgument;
use crate::rules::RuleMetadata;
use crate::semantic::{CompilationModel, ConstantValue};
use crate::syntax::{FixEdit, escape_identifier, is_identifier};

/// Build the diagnostic for a literal name argument.
///
/// The member name is the string value; any other constant (`null`, a
/// number) falls back to the argument's source text.
pub fn emit(
    model: &CompilationModel<'_>,
    rule: &'static RuleMetadata,
    argument: &CallArgument<'_>,
    value: &ConstantValue,
) -> DiagnosticRecord {
    let unit = model.unit();
    let member_name = match value {
        ConstantValue::String(s) => s.clone(),
        _ => unit.node_text(argument.expression).to_string(),
    };
    let span = unit.span_of(argument.expression);
    DiagnosticRecord {
        rule_id: rule.id,
        severity: rule.severity,
        message: rule.format_message(&[&member_name]),
        span,
        location: unit.position(span.start),
        member_name,
    }
}

/// `nameof(<name>)` over the diagnostic's span.
pub fn name_of_fix(diagnostic: &DiagnosticRecord) -> FixEdit {
    FixEdit::new(
        diagnostic.span,
        format!("nameof({})", escape_identifier(&diagnostic.member_name)),
    )
}

/// `nameof()` needs an identifier: `""`, `"1st"` or `"Is Open"` would
/// rewrite the call into invalid source.
pub fn name_of_fix_applies(diagnostic: &DiagnosticRecord) -> bool {
    is_identifier(&diagnostic.member_name)
}
