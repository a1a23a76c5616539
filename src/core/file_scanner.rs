use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use walkdir::WalkDir;

use crate::logging::Logger;

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files in walk order (sorted by file name per directory).
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// What to pick up while walking a root directory.
pub struct ScanFilter<'a> {
    /// Matched against the file name.
    pub filter: &'a Regex,
    /// Matched against the full path.
    pub ignores: &'a [Pattern],
    /// Files never returned, e.g. the schema itself.
    pub exclude: &'a [PathBuf],
}

/// Recursively collect files under `root` accepted by `scan_filter`.
///
/// Failing to access the root is fatal; unreadable entries below it are
/// logged as warnings and skipped.
pub fn scan_files(root: &Path, scan_filter: &ScanFilter, logger: &dyn Logger) -> Result<ScanResult> {
    fs::metadata(root).with_context(|| format!("Cannot access root path: {}", root.display()))?;

    let excluded: Vec<PathBuf> = scan_filter
        .exclude
        .iter()
        .map(|path| canonical(path))
        .collect();

    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                logger.warn(&format!("Cannot access path: {}", e));
                continue;
            }
        };
        let path = entry.path();

        if scan_filter.ignores.iter().any(|p| p.matches_path(path)) {
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !scan_filter.filter.is_match(&file_name) {
            continue;
        }
        if !excluded.is_empty() && excluded.contains(&canonical(path)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(ScanResult {
        files,
        skipped_count,
    })
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
