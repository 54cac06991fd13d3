//! wpfdiag - DependencyProperty name checks for WPF C# sources
//!
//! wpfdiag is a CLI tool and library that finds `DependencyProperty.Register`
//! calls whose name argument is a string literal and rewrites them to
//! `nameof(...)`, so property renames cannot silently break registrations.
//!
//! ## Module Structure
//!
//! - `syntax`: C# parsing (tree-sitter), text spans and edits
//! - `semantic`: assembly metadata, name binding and constant folding
//! - `analysis`: the matcher / classifier / emitter pipeline and suppressions
//! - `rules`: rule metadata, the `Rule` trait and the registry
//! - `harness`: fixture verification for rules
//! - `config`: Configuration file loading and parsing
//! - `core`: file discovery and the per-run check context
//! - `issues`: Issue types for reporting
//! - `cli`: Command-line interface layer
//! - `logging`: tracing subscriber setup

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod harness;
pub mod issues;
pub mod logging;
pub mod rules;
pub mod semantic;
pub mod syntax;
