//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style; `check --format json` prints them as a
//! JSON array instead. Kept out of the library core so wpfdiag can be used
//! without a terminal.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::analysis::Severity;
use crate::issues::{Issue, Report, ReportLocation};
use crate::rules::{Rule, RuleRegistry};
use crate::syntax::FixEdit;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// One issue in `--format json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonIssue<'a> {
    file_path: &'a str,
    line: usize,
    column: usize,
    rule_id: &'a str,
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<&'a FixEdit>,
}

impl<'a> From<&'a Issue> for JsonIssue<'a> {
    fn from(issue: &'a Issue) -> Self {
        let mut entry = Self {
            file_path: "",
            line: 0,
            column: 0,
            rule_id: issue.report_rule(),
            severity: issue.report_severity(),
            message: issue.message(),
            member_name: None,
            fix: None,
        };
        match issue {
            Issue::Diagnostic(d) => {
                entry.file_path = d.context.file_path();
                entry.line = d.context.line();
                entry.column = d.context.col();
                entry.member_name = Some(&d.diagnostic.member_name);
                entry.fix = d.fix.as_ref();
            }
            Issue::ParseError(p) => entry.file_path = &p.file_path,
        }
        entry
    }
}

pub fn report_json(issues: &[Issue]) -> Result<()> {
    report_json_to(issues, &mut io::stdout().lock())
}

/// Print issues as a pretty JSON array.
pub fn report_json_to<W: Write>(issues: &[Issue], writer: &mut W) -> Result<()> {
    let mut sorted = issues.to_vec();
    sorted.sort();
    let entries: Vec<JsonIssue<'_>> = sorted.iter().map(JsonIssue::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &entries).context("Failed to write JSON report")?;
    writeln!(writer)?;
    Ok(())
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize) {
    print_success_to(source_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files that could not be analyzed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be analyzed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// List registry rules: id, severity, category and title.
pub fn print_rules(registry: &RuleRegistry) {
    print_rules_to(registry, &mut io::stdout().lock());
}

pub fn print_rules_to<W: Write>(registry: &RuleRegistry, writer: &mut W) {
    let id_width = registry
        .iter()
        .map(|rule| rule.metadata().id.len())
        .max()
        .unwrap_or(0);

    for rule in registry.iter() {
        let meta = rule.metadata();
        let _ = writeln!(
            writer,
            "{:<width$}  {:<7}  {}  {}",
            meta.id.bold(),
            severity_label(meta.severity),
            format!("[{}]", meta.category).dimmed(),
            meta.title,
            width = id_width
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().blue(),
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_label(severity),
        issue.message(),
        issue.report_rule().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let (line, col, source_line) = (ctx.line(), ctx.col(), ctx.source_line.as_str());
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // col is 1-based; carets are measured in display width.
            let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
            let flagged: String = source_line
                .chars()
                .skip(col.saturating_sub(1))
                .take(issue.highlight_len())
                .collect();
            let carets = "^".repeat(UnicodeWidthStr::width(flagged.as_str()).max(1));
            let carets = match severity {
                Severity::Error => carets.red(),
                Severity::Warning => carets.yellow(),
                Severity::Info => carets.blue(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                carets,
                width = max_line_width,
                padding = UnicodeWidthStr::width(prefix.as_str())
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let count = |severity: Severity| {
        issues
            .iter()
            .filter(|i| i.report_severity() == severity)
            .count()
    };
    let (errors, warnings, infos) = (
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info),
    );
    let total = errors + warnings + infos;
    if total == 0 {
        return;
    }

    let mut summary = format!(
        "\n{} {} {} ({} {}, {} {}",
        FAILURE_MARK.red(),
        total,
        if total == 1 { "problem" } else { "problems" },
        errors,
        if errors == 1 { "error" } else { "errors" }.red(),
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }.yellow()
    );
    if infos > 0 {
        summary.push_str(&format!(", {} {}", infos, "info".blue()));
    }
    summary.push(')');
    let _ = writeln!(writer, "{}", summary);
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
