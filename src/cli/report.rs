//! Report formatting and printing utilities.
//!
//! Diagnostics go through the `Logger` on stderr; the results of a command
//! are printed here, on stdout. Kept separate from core logic so the crate
//! can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::schema::SchemaDiff;
use crate::core::validate::{FileReport, ValidationSummary};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print added and removed schema keys to stdout.
pub fn print_schema_diff(diff: &SchemaDiff) {
    print_schema_diff_to(diff, &mut io::stdout().lock());
}

pub fn print_schema_diff_to<W: Write>(diff: &SchemaDiff, writer: &mut W) {
    for key in &diff.added {
        let _ = writeln!(writer, "  {} {}", "+".green(), quoted(key));
    }
    for key in &diff.removed {
        let _ = writeln!(writer, "  {} {}", "-".red(), quoted(key));
    }
}

/// Print one line per validated file and a closing summary to stdout.
pub fn print_validation(summary: &ValidationSummary) {
    print_validation_to(summary, &mut io::stdout().lock());
}

pub fn print_validation_to<W: Write>(summary: &ValidationSummary, writer: &mut W) {
    if summary.results.is_empty() {
        let _ = writeln!(
            writer,
            "{} no translation files found",
            "warning:".bold().yellow()
        );
        return;
    }

    for result in &summary.results {
        let message = result.message();
        if result.is_success() {
            let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
        } else {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
        }
    }

    if summary.results.len() > 1 {
        print_coverage_table(summary, writer);
    }

    let failed = summary.failed_count();
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} of {} translation {} incomplete",
            FAILURE_MARK.red(),
            failed,
            summary.results.len(),
            if summary.results.len() == 1 { "file is" } else { "files are" }
        );
    }
}

/// Aligned `file  coverage%` table for multi-file runs.
fn print_coverage_table<W: Write>(summary: &ValidationSummary, writer: &mut W) {
    let rows: Vec<(&str, String)> = summary
        .results
        .iter()
        .map(|result| match result {
            FileReport::Validated(validation) => {
                (validation.file.as_str(), format!("{:>3}%", validation.coverage()))
            }
            FileReport::Failed { file, .. } => (file.as_str(), "  -".to_string()),
        })
        .collect();

    let width = rows.iter().map(|(file, _)| file.width()).max().unwrap_or(0);

    let _ = writeln!(writer);
    for (file, coverage) in rows {
        let padding = " ".repeat(width - file.width());
        let _ = writeln!(writer, "  {}{}  {}", file, padding, coverage.bold());
    }
    let _ = writeln!(writer);
}

/// Print where the export was written.
pub fn print_export_saved(count: usize, path: &str) {
    print_export_saved_to(count, path, &mut io::stdout().lock());
}

pub fn print_export_saved_to<W: Write>(count: usize, path: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Exported {} translation {} to {}",
            count,
            if count == 1 { "key" } else { "keys" },
            path
        )
        .green()
    );
}

fn quoted(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| key.to_string())
}
