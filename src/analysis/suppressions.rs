//! `#pragma warning` suppressions.
//!
//! - `#pragma warning disable` - disable all rules from this line on
//! - `#pragma warning disable Id1, Id2` - disable only the listed rules
//! - `#pragma warning restore` / `#pragma warning restore Id1` - re-enable
//!
//! A later directive overrides an earlier one for the rules it names.

use std::collections::HashMap;

/// Parsed `#pragma warning` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PragmaDirective {
    /// Empty `rules` means every rule.
    Disable { rules: Vec<String> },
    Restore { rules: Vec<String> },
}

impl PragmaDirective {
    /// Parse one source line. Returns None if it is not a warning pragma.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim_start().strip_prefix('#')?.trim_start();
        let rest = rest.strip_prefix("pragma")?.trim_start();
        let rest = rest.strip_prefix("warning")?.trim_start();
        let rest = rest.split("//").next().unwrap_or("");

        if let Some(ids) = rest.strip_prefix("disable") {
            return Some(Self::Disable {
                rules: Self::parse_rules(ids),
            });
        }
        if let Some(ids) = rest.strip_prefix("restore") {
            return Some(Self::Restore {
                rules: Self::parse_rules(ids),
            });
        }
        None
    }

    fn parse_rules(ids: &str) -> Vec<String> {
        ids.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Tracks pragma directives for a single file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// (1-based line, directive), in source order.
    directives: Vec<(usize, PragmaDirective)>,
}

impl SuppressionContext {
    pub fn from_source(text: &str) -> Self {
        let directives = text
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| PragmaDirective::parse(line).map(|d| (idx + 1, d)))
            .collect();
        Self { directives }
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Check if a diagnostic of `rule_id` starting on `line` is suppressed.
    pub fn should_ignore(&self, line: usize, rule_id: &str) -> bool {
        let mut all_disabled = false;
        let mut overrides: HashMap<&str, bool> = HashMap::new();

        for (_, directive) in self.directives.iter().take_while(|(l, _)| *l <= line) {
            let (disable, rules) = match directive {
                PragmaDirective::Disable { rules } => (true, rules),
                PragmaDirective::Restore { rules } => (false, rules),
            };
            if rules.is_empty() {
                all_disabled = disable;
                overrides.clear();
            } else {
                for rule in rules {
                    overrides.insert(rule.as_str(), disable);
                }
            }
        }

        overrides.get(rule_id).copied().unwrap_or(all_disabled)
    }
}
