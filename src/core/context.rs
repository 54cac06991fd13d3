use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow, bail};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::file_scanner::{ScanOptions, scan_files};
use crate::{
    analysis::{UnitAnalysis, analyze_text, applicable_fix},
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    issues::{DiagnosticIssue, Issue, ParseErrorIssue, SourceContext, SourceLocation},
    rules::RuleRegistry,
    semantic::{AssemblyReference, well_known},
};

/// Outcome of analyzing one file.
#[derive(Debug)]
pub enum FileOutcome {
    Analyzed(UnitAnalysis),
    /// The file could not be read or parsed.
    Failed { path: String, error: String },
}

impl FileOutcome {
    pub fn path(&self) -> &str {
        match self {
            FileOutcome::Analyzed(analysis) => analysis.path(),
            FileOutcome::Failed { path, .. } => path,
        }
    }
}

/// Everything a command needs: configuration, the files in scope, the
/// reference set and the rule registry.
///
/// Analysis runs lazily on first access and is cached.
pub struct CheckContext {
    pub config: Config,
    pub root_dir: PathBuf,
    /// Source files in path order.
    pub files: Vec<String>,
    pub references: Vec<AssemblyReference>,
    pub registry: RuleRegistry,
    pub verbose: bool,
    outcomes: OnceCell<Vec<FileOutcome>>,
}

impl CheckContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // Priority: CLI --source-root arg > current directory
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        // CLI > config file > defaults
        let mut config = config_result.config;
        if !common_args.reference.is_empty() {
            config.references = common_args.reference.clone();
        }
        for rule in &common_args.disable {
            if !config.disabled_rules.contains(rule) {
                config.disabled_rules.push(rule.clone());
            }
        }
        config.validate()?;

        let references = load_references(&root_dir, &config.references)?;
        let registry = build_registry(&config);

        let scan_result = scan_files(
            path,
            ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_generated_files: config.ignore_generated_files,
            },
        );
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }
        debug!(
            files = scan_result.files.len(),
            references = references.len(),
            rules = registry.len(),
            "context ready"
        );

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files.into_iter().collect(),
            references,
            registry,
            verbose,
            outcomes: OnceCell::new(),
        })
    }

    /// Per-file analysis results in path order (lazy, computed in parallel).
    pub fn outcomes(&self) -> &[FileOutcome] {
        self.outcomes.get_or_init(|| {
            let references = &self.references;
            let registry = &self.registry;
            // par_iter over an ordered Vec collects in the same order.
            self.files
                .par_iter()
                .map(|file_path| analyze_file(file_path, references, registry))
                .collect()
        })
    }

    /// Every issue of the run, sorted.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .outcomes()
            .iter()
            .flat_map(|outcome| self.outcome_issues(outcome))
            .collect();
        issues.sort();
        issues
    }

    pub fn parse_error_count(&self) -> usize {
        self.outcomes()
            .iter()
            .filter(|outcome| match outcome {
                FileOutcome::Analyzed(analysis) => analysis.syntax_error().is_some(),
                FileOutcome::Failed { .. } => true,
            })
            .count()
    }

    fn outcome_issues(&self, outcome: &FileOutcome) -> Vec<Issue> {
        match outcome {
            FileOutcome::Failed { path, error } => {
                if self.verbose {
                    eprintln!("Warning: {} - {}", path, error);
                }
                vec![Issue::ParseError(ParseErrorIssue {
                    file_path: path.clone(),
                    error: error.clone(),
                })]
            }
            FileOutcome::Analyzed(analysis) => {
                if let Some(position) = analysis.syntax_error() {
                    if self.verbose {
                        eprintln!("Warning: {} - syntax error at {}", analysis.path(), position);
                    }
                    return vec![Issue::ParseError(ParseErrorIssue {
                        file_path: analysis.path().to_string(),
                        error: format!("syntax error at {}, file not analyzed", position),
                    })];
                }
                analysis
                    .diagnostics
                    .iter()
                    .map(|diagnostic| {
                        let location = SourceLocation::new(
                            analysis.path(),
                            diagnostic.location.line,
                            diagnostic.location.column,
                        );
                        let source_line = analysis.unit.line_text(diagnostic.location.line);
                        Issue::Diagnostic(DiagnosticIssue {
                            context: SourceContext::new(location, source_line),
                            diagnostic: diagnostic.clone(),
                            fix: applicable_fix(&self.registry, diagnostic),
                        })
                    })
                    .collect()
            }
        }
    }
}

fn analyze_file(
    file_path: &str,
    references: &[AssemblyReference],
    registry: &RuleRegistry,
) -> FileOutcome {
    let failed = |error: String| FileOutcome::Failed {
        path: file_path.to_string(),
        error,
    };

    let text = match fs::read_to_string(file_path) {
        Ok(text) => text,
        Err(e) => return failed(format!("Failed to read file: {}", e)),
    };
    match analyze_text(file_path, &text, references, registry) {
        Ok(analysis) => FileOutcome::Analyzed(analysis),
        Err(e) => failed(e.to_string()),
    }
}

/// Resolve configured references: built-in assembly names first, then
/// JSON descriptions relative to the source root.
pub fn load_references(root_dir: &Path, entries: &[String]) -> Result<Vec<AssemblyReference>> {
    let mut references: Vec<AssemblyReference> = Vec::with_capacity(entries.len());
    for entry in entries {
        let reference = match well_known::by_name(entry) {
            Some(reference) => reference,
            None => {
                let path = root_dir.join(entry);
                if !path.is_file() {
                    bail!(
                        "Unknown reference \"{}\": not a built-in assembly ({}) and no such file",
                        entry,
                        well_known::names().join(", ")
                    );
                }
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read reference: {:?}", path))?;
                AssemblyReference::from_json(&json)
                    .with_context(|| format!("Failed to parse reference: {:?}", path))?
            }
        };
        if references.iter().any(|r| r.name == reference.name) {
            warn!(assembly = %reference.name, "duplicate reference ignored");
            continue;
        }
        references.push(reference);
    }
    Ok(references)
}

fn build_registry(config: &Config) -> RuleRegistry {
    let mut registry = RuleRegistry::builtin();
    for rule in &config.disabled_rules {
        if !registry.disable(rule) {
            debug!(rule = %rule, "rule already disabled");
        }
    }
    registry
}
