//! Action trait definition.
//!
//! Actions convert issues into file edits, then either preview them or
//! write them back.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::issues::SourceContext;
use crate::syntax::{FixEdit, apply_edits};

/// Statistics from running an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStats {
    /// Number of issues processed.
    pub processed: usize,
    /// Number of issues skipped (no edit available).
    pub skipped: usize,
    /// Number of edits written to files.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
    }
}

/// One edit to apply, with the location it was reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub context: SourceContext,
    pub edit: FixEdit,
}

impl EditOperation {
    /// The reported line with this edit applied, when the edit starts on it.
    pub fn edited_line(&self, span_len: usize) -> Option<String> {
        let line = &self.context.source_line;
        let start = line
            .char_indices()
            .nth(self.context.col().saturating_sub(1))
            .map(|(i, _)| i)?;
        let end = start + span_len;
        if end > line.len() || !line.is_char_boundary(end) {
            return None;
        }
        Some(format!("{}{}{}", &line[..start], self.edit.replacement, &line[end..]))
    }

    /// Print a `- old` / `+ new` preview of this edit.
    pub fn preview(&self) {
        println!(
            "  {} {}:{}:{}",
            "-->".blue(),
            self.context.file_path(),
            self.context.line(),
            self.context.col()
        );
        println!("  {} {}", "-".red(), self.context.source_line.red());
        match self.edited_line(self.edit.span.len()) {
            Some(new_line) => println!("  {} {}", "+".green(), new_line.green()),
            None => println!("  {} {}", "+".green(), self.edit.replacement.green()),
        }
        println!();
    }
}

/// Action trait - converts issues into edits and executes them.
///
/// ```ignore
/// if apply {
///     ApplyFix::run(&issues)?;
/// } else {
///     ApplyFix::preview(&issues);
/// }
/// ```
pub trait Action<I> {
    /// Convert issues to edits. Issues without an edit are left out.
    fn to_operations(issues: &[I]) -> Vec<EditOperation>;

    /// Write the edits to disk.
    fn run(issues: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(issues);
        let mut stats = execute_operations(&ops)?;
        stats.skipped = issues.len().saturating_sub(ops.len());
        Ok(stats)
    }

    /// Preview the edits (dry-run mode).
    fn preview(issues: &[I]) {
        for op in Self::to_operations(issues) {
            op.preview();
        }
    }
}

/// Apply edits grouped per file, one read and one write per file.
pub(crate) fn execute_operations(ops: &[EditOperation]) -> Result<ActionStats> {
    let mut by_file: BTreeMap<&str, Vec<FixEdit>> = BTreeMap::new();
    for op in ops {
        by_file
            .entry(op.context.file_path())
            .or_default()
            .push(op.edit.clone());
    }

    let mut stats = ActionStats {
        processed: ops.len(),
        ..Default::default()
    };
    for (file_path, edits) in by_file {
        let text = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path))?;
        let fixed = apply_edits(&text, &edits)
            .with_context(|| format!("Failed to apply fixes to {}", file_path))?;
        if fixed != text {
            fs::write(file_path, fixed)
                .with_context(|| format!("Failed to write file: {}", file_path))?;
            stats.changes_applied += edits.len();
            stats.files_modified += 1;
        }
    }
    Ok(stats)
}
