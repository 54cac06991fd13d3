use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): no problems
/// - `Failure` (1): diagnostics found, or fixes pending in dry-run mode
/// - `Error` (2): internal, configuration or parse error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status of an analysis run. Unanalyzable files outrank findings.
    pub fn from_counts(parse_errors: usize, problems: usize) -> Self {
        if parse_errors > 0 {
            ExitStatus::Error
        } else if problems > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
