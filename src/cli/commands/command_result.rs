use crate::cli::exit_status::ExitStatus;
use crate::issues::Issue;

/// Result of an analysis command.
#[derive(Debug)]
pub struct CommandResult {
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    /// Number of files that could not be analyzed.
    pub parse_error_count: usize,
    /// Number of C# files that were checked.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn problem_count(&self) -> usize {
        self.error_count + self.warning_count + self.info_count
    }

    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from_counts(self.parse_error_count, self.problem_count())
    }
}
