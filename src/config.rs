use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::rules::known_rule_ids;
use crate::semantic::well_known;

pub const CONFIG_FILE_NAME: &str = ".wpfdiagrc.json";

/// Build output and designer-generated sources.
pub const GENERATED_FILE_PATTERNS: &[&str] = &[
    "**/obj/**",
    "**/bin/**",
    "**/*.g.cs",
    "**/*.g.i.cs",
    "**/*.Designer.cs",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_generated_files")]
    pub ignore_generated_files: bool,
    /// Built-in assembly names or paths to assembly JSON descriptions.
    #[serde(default = "default_references")]
    pub references: Vec<String>,
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

fn default_ignore_generated_files() -> bool {
    true
}

fn default_references() -> Vec<String> {
    well_known::names().iter().map(|n| n.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: Vec::new(),
            ignore_generated_files: default_ignore_generated_files(),
            references: default_references(),
            disabled_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid or a disabled rule
    /// id is unknown.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directories.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        let known = known_rule_ids();
        for rule in &self.disabled_rules {
            if !known.contains(&rule.as_str()) {
                bail!(
                    "Unknown rule in 'disabledRules': \"{}\" (known rules: {})",
                    rule,
                    known.join(", ")
                );
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
