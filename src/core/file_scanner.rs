//! Discovery of C# source files under a source root.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::WalkDir;

use crate::config::GENERATED_FILE_PATTERNS;

/// Patterns without wildcards are literal paths.
pub(crate) fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Source files in path order.
    pub files: BTreeSet<String>,
    /// Entries that could not be accessed.
    pub skipped_count: usize,
}

/// Options controlling which files a scan keeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_generated_files: bool,
}

struct IgnoreSet {
    base_dir: PathBuf,
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, ignores: &[String], ignore_generated_files: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignores {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => warn!(pattern = %p, "invalid ignore pattern: {}", e),
                }
            } else {
                literal_paths.push(base_dir.join(p));
            }
        }

        if ignore_generated_files {
            patterns.extend(GENERATED_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            base_dir: base_dir.to_path_buf(),
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.literal_paths.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        // Globs match relative to the source root.
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let path_str = relative.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

fn roots_to_scan(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => warn!(pattern = %inc, "invalid include pattern: {}", e),
            }
        } else {
            let path = base_dir.join(inc);
            if path.exists() {
                roots.push(path);
            } else {
                warn!(path = %path.display(), "include path does not exist");
            }
        }
    }
    roots
}

/// Collect `.cs` files under `base_dir`, honouring includes and ignores.
pub fn scan_files(base_dir: &str, options: ScanOptions<'_>) -> ScanResult {
    let base = Path::new(base_dir);
    let ignore_set = IgnoreSet::new(base, options.ignores, options.ignore_generated_files);
    let mut result = ScanResult::default();

    for root in roots_to_scan(base, options.includes) {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !ignore_set.is_ignored(entry.path()));
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_source_file(path) {
                result.files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    result
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("cs"))
}
