use super::CommandResult;
use crate::analysis::Severity;
use crate::issues::Issue;

pub fn finish(mut issues: Vec<Issue>, source_files_checked: usize) -> CommandResult {
    issues.sort();

    let count = |severity: Severity| issues.iter().filter(|i| i.severity() == severity).count();
    let parse_error_count = issues.iter().filter(|i| i.is_parse_error()).count();

    CommandResult {
        error_count: count(Severity::Error),
        warning_count: count(Severity::Warning),
        info_count: count(Severity::Info),
        parse_error_count,
        source_files_checked,
        issues,
    }
}
