//! Fix command - rewrite string names passed to `DependencyProperty.Register`
//! as `nameof(...)`.
//!
//! Every diagnostic carries its fix. Files that could not be analyzed are
//! reported and left untouched.
//!
//! Use `--apply` to actually rewrite files (default is dry-run mode).

use std::collections::BTreeSet;

use anyhow::Result;
use colored::Colorize;

use super::helper::finish;
use crate::{
    cli::{
        actions::{Action, ApplyFix},
        args::FixCommand,
        exit_status::ExitStatus,
        report,
    },
    core::CheckContext,
    issues::Issue,
};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let ctx = CheckContext::new(&cmd.common)?;
    let apply = cmd.apply;
    let result = finish(ctx.issues(), ctx.files.len());

    let (fixable, unfixable): (Vec<Issue>, Vec<Issue>) = result
        .issues
        .iter()
        .cloned()
        .partition(|issue| matches!(issue, Issue::Diagnostic(d) if d.fix.is_some()));

    // Parse errors and diagnostics without a fix are shown as-is.
    if !unfixable.is_empty() {
        report::report(&unfixable);
    }

    if fixable.is_empty() {
        if unfixable.is_empty() {
            report::print_success(result.source_files_checked);
        }
    } else if apply {
        let stats = <ApplyFix as Action<Issue>>::run(&fixable)?;
        println!(
            "{} {} issue(s) in {} file(s).",
            "Fixed".green().bold(),
            stats.changes_applied,
            stats.files_modified
        );
    } else {
        <ApplyFix as Action<Issue>>::preview(&fixable);
        let files: BTreeSet<&str> = fixable.iter().map(Issue::file_path).collect();
        println!(
            "{} {} issue(s) in {} file(s).",
            "Would fix".yellow().bold(),
            fixable.len(),
            files.len()
        );
        println!("Run with {} to apply these fixes.", "--apply".cyan());
    }

    report::print_parse_warning(result.parse_error_count, ctx.verbose);

    // In dry-run mode, pending fixes are a "Failure" (exit 1) to signal
    // that there's work to be done.
    let parse_errors = result.parse_error_count;
    let pending = if apply { 0 } else { fixable.len() };
    let remaining = pending + unfixable.len() - parse_errors;
    Ok(ExitStatus::from_counts(parse_errors, remaining))
}
