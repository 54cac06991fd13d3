//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report diagnostics for the C# sources under the source root
//! - `fix`: Rewrite flagged arguments to `nameof(...)`
//! - `init`: Write a default configuration file
//! - `rules`: List the available rules

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Fix(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Rules) | None => false,
        }
    }
}

/// Common arguments shared by analysis commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Referenced assembly: a built-in name or a JSON description
    /// (repeatable, replaces the configured references)
    #[arg(long, value_name = "ASSEMBLY")]
    pub reference: Vec<String>,

    /// Disable a rule by id (repeatable)
    #[arg(long, value_name = "RULE_ID")]
    pub disable: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style text
    #[default]
    Human,
    /// JSON array of diagnostics with their fixes
    Json,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report DependencyProperty registrations that should use nameof()
    Check(CheckCommand),
    /// Replace string names in DependencyProperty.Register() with nameof()
    Fix(FixCommand),
    /// Initialize a new .wpfdiagrc.json configuration file
    Init,
    /// List available rules
    Rules,
}
