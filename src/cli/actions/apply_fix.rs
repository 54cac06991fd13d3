use super::traits::{Action, EditOperation};
use crate::issues::{DiagnosticIssue, Issue};

/// Replace flagged arguments with their suggested `nameof(...)`.
pub struct ApplyFix;

impl Action<DiagnosticIssue> for ApplyFix {
    fn to_operations(issues: &[DiagnosticIssue]) -> Vec<EditOperation> {
        issues
            .iter()
            .filter_map(|issue| {
                Some(EditOperation {
                    context: issue.context.clone(),
                    edit: issue.fix.clone()?,
                })
            })
            .collect()
    }
}

impl Action<Issue> for ApplyFix {
    fn to_operations(issues: &[Issue]) -> Vec<EditOperation> {
        let diagnostics: Vec<DiagnosticIssue> = issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::Diagnostic(d) => Some(d.clone()),
                Issue::ParseError(_) => None,
            })
            .collect();
        <ApplyFix as Action<DiagnosticIssue>>::to_operations(&diagnostics)
    }
}
