//! `DependencyProperty.Register("Name", ...)` should be
//! `DependencyProperty.Register(nameof(Name), ...)`.

use tracing::debug;

use super::{Rule, RuleMetadata};
use crate::analysis::{
    ArgumentShape, DiagnosticRecord, Severity, TargetSymbolSet, classify, emitter,
    find_call_sites, name_argument,
};
use crate::semantic::CompilationModel;
use crate::syntax::FixEdit;

pub const TARGET_TYPE: &str = "System.Windows.DependencyProperty";
pub const TARGET_METHOD: &str = "Register";

pub static METADATA: RuleMetadata = RuleMetadata {
    id: "DependencyPropertyWithoutNameOfOperatorAnalyzer",
    title: "Use nameof",
    message_format: "Dependency property '{0}' can use nameof() operator for DependencyProperty.Register() call",
    category: "Custom Controls",
    severity: Severity::Warning,
    enabled_by_default: true,
    description: "The name passed to DependencyProperty.Register() should be nameof(Property) so renames keep the registration in sync.",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyPropertyNameOfRule;

impl Rule for DependencyPropertyNameOfRule {
    fn metadata(&self) -> &'static RuleMetadata {
        &METADATA
    }

    fn check(&self, model: &CompilationModel<'_>) -> Vec<DiagnosticRecord> {
        let targets = TargetSymbolSet::resolve(model, TARGET_TYPE, TARGET_METHOD);
        if targets.is_empty() {
            debug!(
                path = model.unit().path(),
                rule = METADATA.id,
                "{} is not referenced, rule does not apply",
                TARGET_TYPE
            );
            return Vec::new();
        }

        find_call_sites(model, &targets)
            .iter()
            .filter_map(|site| match classify(model, site) {
                ArgumentShape::Literal(value) => {
                    let argument = name_argument(site)?;
                    Some(emitter::emit(model, &METADATA, argument, &value))
                }
                ArgumentShape::SymbolicNameReference | ArgumentShape::Other => None,
            })
            .collect()
    }

    fn fix(&self, diagnostic: &DiagnosticRecord) -> Option<FixEdit> {
        (diagnostic.rule_id == METADATA.id).then(|| emitter::name_of_fix(diagnostic))
    }

    fn fix_applies(&self, diagnostic: &DiagnosticRecord) -> bool {
        emitter::name_of_fix_applies(diagnostic)
    }
}
