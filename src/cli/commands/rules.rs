use anyhow::Result;

use crate::cli::{exit_status::ExitStatus, report};
use crate::rules::{RuleRegistry, builtin_rules};

/// List every built-in rule, enabled by default or not.
pub fn rules() -> Result<ExitStatus> {
    let mut registry = RuleRegistry::default();
    for rule in builtin_rules() {
        registry.register(rule);
    }
    report::print_rules(&registry);
    Ok(ExitStatus::Success)
}
