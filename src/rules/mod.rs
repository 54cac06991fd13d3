//! Rule implementations for wpfdiag.
//!
//! Each rule is a plain value implementing `Rule`; the `RuleKind` enum
//! dispatches to it statically. `RuleRegistry` is the explicit, ordered set
//! of rules a run uses, built once at start-up.
//!
//! ## Module Structure
//!
//! - `dependency_property_nameof`: string literals passed as the name to
//!   `DependencyProperty.Register`

pub mod dependency_property_nameof;

use std::collections::BTreeMap;

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::analysis::{DiagnosticRecord, Severity};
use crate::semantic::CompilationModel;
use crate::syntax::FixEdit;

pub use dependency_property_nameof::DependencyPropertyNameOfRule;

/// Static description of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    pub id: &'static str,
    pub title: &'static str,
    /// Message template with positional `{0}`, `{1}`, ... placeholders.
    pub message_format: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub enabled_by_default: bool,
    pub description: &'static str,
}

impl RuleMetadata {
    pub fn format_message(&self, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.message_format.to_string(), |message, (i, arg)| {
                message.replace(&format!("{{{}}}", i), arg)
            })
    }
}

/// A diagnostic rule over one bound source unit.
#[enum_dispatch]
pub trait Rule {
    fn metadata(&self) -> &'static RuleMetadata;

    /// Diagnostics in source order. Must be a pure function of the model.
    fn check(&self, model: &CompilationModel<'_>) -> Vec<DiagnosticRecord>;

    /// The fix for one of this rule's diagnostics.
    fn fix(&self, diagnostic: &DiagnosticRecord) -> Option<FixEdit>;

    /// Whether applying `fix` to the diagnostic leaves valid source.
    fn fix_applies(&self, _diagnostic: &DiagnosticRecord) -> bool {
        true
    }
}

#[enum_dispatch(Rule)]
#[derive(Debug, Clone)]
pub enum RuleKind {
    DependencyPropertyNameOf(DependencyPropertyNameOfRule),
}

/// Every rule this crate ships, enabled or not.
pub fn builtin_rules() -> Vec<RuleKind> {
    vec![DependencyPropertyNameOfRule.into()]
}

/// Ids of every built-in rule.
pub fn known_rule_ids() -> Vec<&'static str> {
    builtin_rules().iter().map(|r| r.metadata().id).collect()
}

/// The set of rules a run applies, keyed (and ordered) by rule id.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<&'static str, RuleKind>,
}

impl RuleRegistry {
    /// Registry with every rule that is enabled by default.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for rule in builtin_rules() {
            if rule.metadata().enabled_by_default {
                registry.register(rule);
            }
        }
        registry
    }

    pub fn register(&mut self, rule: RuleKind) {
        self.rules.insert(rule.metadata().id, rule);
    }

    /// Remove a rule. Returns false if it was not registered.
    pub fn disable(&mut self, id: &str) -> bool {
        self.rules.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&RuleKind> {
        self.rules.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleKind> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
