//! Validation of translation files against a generated schema.
//!
//! Validator errors are turned into [`Issue`]s which carry the missing and
//! invalid tallies; coverage is computed from the schema's leaf key count.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;

use crate::config::JSON_FILTER;
use crate::core::file_scanner::{ScanFilter, scan_files};
use crate::core::parsers::json::read_json_file;
use crate::core::schema::SCHEMA_PROPERTY;
use crate::issues::{
    EmptyTranslationIssue, Issue, MissingGroupIssue, MissingKeyIssue, MissingParametersIssue,
    Report, SchemaViolationIssue, UnknownKeyIssue,
};
use crate::logging::Logger;

/// Leaf key totals of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCounts {
    /// All leaf keys, group members included.
    pub count: usize,
    /// Number of keys per group.
    pub groups: HashMap<String, usize>,
}

pub fn count_keys(schema: &Value) -> KeyCounts {
    let mut counts = KeyCounts::default();
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return counts;
    };

    for (name, property) in properties {
        if let Some(nested) = property.get("properties").and_then(Value::as_object) {
            counts.groups.insert(name.clone(), nested.len());
            counts.count += nested.len();
        } else if name != SCHEMA_PROPERTY {
            counts.count += 1;
        }
    }
    counts
}

/// Render a JSON pointer such as `/custom group/Hello` as
/// `["custom group"]["Hello"]`.
fn display_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| {
            let segment = segment.replace("~1", "/").replace("~0", "~");
            let quoted = serde_json::to_string(&segment).unwrap_or_else(|_| format!("\"{}\"", segment));
            format!("[{}]", quoted)
        })
        .collect()
}

fn optional_path(pointer: &str) -> Option<String> {
    if pointer.is_empty() {
        None
    } else {
        Some(display_path(pointer))
    }
}

/// A schema compiled once and reused for every translation file.
pub struct CompiledSchema {
    validator: Validator,
    counts: KeyCounts,
}

impl CompiledSchema {
    pub fn compile(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|err| anyhow!("Invalid schema: {}", err))?;
        Ok(Self {
            validator,
            counts: count_keys(schema),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::compile(&read_json_file(path)?)
    }

    pub fn counts(&self) -> &KeyCounts {
        &self.counts
    }

    /// Check one translation document. Mismatches are reported as issues,
    /// never as errors.
    pub fn validate(&self, file: &str, document: &Value) -> FileValidation {
        let mut issues = Vec::new();

        for error in self.validator.iter_errors(document) {
            let pointer = error.instance_path.to_string();
            match &error.kind {
                ValidationErrorKind::Required { property } => {
                    let name = match property {
                        Value::String(name) => name.clone(),
                        other => other.to_string(),
                    };
                    let group_size = if pointer.is_empty() {
                        self.counts.groups.get(&name).copied()
                    } else {
                        None
                    };
                    match group_size {
                        Some(key_count) => issues.push(Issue::from(MissingGroupIssue {
                            file: file.to_string(),
                            group: name,
                            key_count,
                        })),
                        None => issues.push(Issue::from(MissingKeyIssue {
                            file: file.to_string(),
                            key: name,
                            path: optional_path(&pointer),
                        })),
                    }
                }
                ValidationErrorKind::MinLength { .. } => {
                    issues.push(Issue::from(EmptyTranslationIssue {
                        file: file.to_string(),
                        path: display_path(&pointer),
                    }));
                }
                ValidationErrorKind::Pattern { .. } => {
                    issues.push(Issue::from(MissingParametersIssue {
                        file: file.to_string(),
                        path: display_path(&pointer),
                    }));
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for key in unexpected {
                        issues.push(Issue::from(UnknownKeyIssue {
                            file: file.to_string(),
                            key: key.clone(),
                            path: optional_path(&pointer),
                        }));
                    }
                }
                _ => {
                    let detail = match optional_path(&pointer) {
                        Some(path) => format!("{} at {}", error, path),
                        None => error.to_string(),
                    };
                    issues.push(Issue::from(SchemaViolationIssue {
                        file: file.to_string(),
                        detail,
                    }));
                }
            }
        }

        FileValidation::new(file, issues, self.counts.count)
    }
}

/// Outcome of validating one translation file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileValidation {
    pub file: String,
    pub issues: Vec<Issue>,
    pub total_keys: usize,
    pub missing: usize,
    pub invalid: usize,
}

fn pluralize(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

impl FileValidation {
    pub fn new(file: &str, issues: Vec<Issue>, total_keys: usize) -> Self {
        let missing = issues.iter().map(|issue| issue.missing_count()).sum();
        let invalid = issues.iter().map(|issue| issue.invalid_count()).sum();
        Self {
            file: file.to_string(),
            issues,
            total_keys,
            missing,
            invalid,
        }
    }

    /// Percentage of schema keys present and non-empty, rounded.
    pub fn coverage(&self) -> usize {
        if self.total_keys == 0 {
            return 0;
        }
        let present = self.total_keys.saturating_sub(self.missing);
        (present as f64 / self.total_keys as f64 * 100.0).round() as usize
    }

    pub fn is_success(&self) -> bool {
        self.missing == 0 && self.invalid == 0
    }

    pub fn message(&self) -> String {
        if self.issues.is_empty() {
            return format!("{} is valid and 100% translated!", self.file);
        }

        let invalid = if self.invalid > 0 {
            format!(" and {} invalid key{}", self.invalid, pluralize(self.invalid))
        } else {
            String::new()
        };
        format!(
            "{} has {} missing translation{}{}; {}% translated.",
            self.file,
            self.missing,
            pluralize(self.missing),
            invalid,
            self.coverage()
        )
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and validate one translation file.
///
/// Fails only when the file cannot be read or parsed.
pub fn validate_translation_file(path: &Path, schema: &CompiledSchema) -> Result<FileValidation> {
    let document = read_json_file(path)?;
    Ok(schema.validate(&file_name(path), &document))
}

/// Options for [`validate_translations`].
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// A translation file, or a directory of them.
    pub root_path: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
}

impl ValidateOptions {
    pub fn new(root_path: impl Into<PathBuf>, schema_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: Some(root_path.into()),
            schema_path: Some(schema_path.into()),
        }
    }
}

/// Result for one file of a validation run.
#[derive(Debug, Clone, PartialEq)]
pub enum FileReport {
    Validated(FileValidation),
    /// The file could not be read or parsed.
    Failed { file: String, error: String },
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        match self {
            FileReport::Validated(validation) => validation.is_success(),
            FileReport::Failed { .. } => false,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FileReport::Validated(validation) => validation.message(),
            FileReport::Failed { file, error } => format!("{}: {}", file, error),
        }
    }
}

/// Results of a validation run, in file walk order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSummary {
    pub results: Vec<FileReport>,
}

impl ValidationSummary {
    pub fn is_success(&self) -> bool {
        self.results.iter().all(FileReport::is_success)
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|result| !result.is_success()).count()
    }
}

fn required<'a>(value: &'a Option<PathBuf>, name: &str, logger: &dyn Logger) -> Result<&'a Path> {
    match value {
        Some(path) => Ok(path),
        None => {
            let message = format!("{} is not defined.", name);
            logger.error(&message);
            Err(anyhow!(message))
        }
    }
}

fn log_issues(validation: &FileValidation, logger: &dyn Logger) {
    for issue in &validation.issues {
        logger.warn(&issue.message());
    }
}

/// Validate a translation file, or every `.json` file below a directory.
///
/// The schema file itself is never treated as a translation. In directory
/// mode a file that cannot be read is reported as failed and the run
/// continues; in single-file mode the error is returned.
pub fn validate_translations(options: &ValidateOptions, logger: &dyn Logger) -> Result<ValidationSummary> {
    let root = required(&options.root_path, "rootPath", logger)?;
    let schema_path = required(&options.schema_path, "schemaPath", logger)?;

    let schema = CompiledSchema::from_file(schema_path).inspect_err(|err| logger.error(&format!("{:#}", err)))?;

    if root.is_file() {
        let validation = validate_translation_file(root, &schema)?;
        log_issues(&validation, logger);
        return Ok(ValidationSummary {
            results: vec![FileReport::Validated(validation)],
        });
    }

    let filter = Regex::new(JSON_FILTER)?;
    let exclude = [schema_path.to_path_buf()];
    let scan_filter = ScanFilter {
        filter: &filter,
        ignores: &[],
        exclude: &exclude,
    };
    let scan = scan_files(root, &scan_filter, logger)?;

    let results: Vec<FileReport> = scan
        .files
        .par_iter()
        .map(|path| match validate_translation_file(path, &schema) {
            Ok(validation) => FileReport::Validated(validation),
            Err(err) => FileReport::Failed {
                file: file_name(path),
                error: format!("{:#}", err),
            },
        })
        .collect();

    for result in &results {
        match result {
            FileReport::Validated(validation) => log_issues(validation, logger),
            FileReport::Failed { .. } => logger.warn(&result.message()),
        }
    }

    Ok(ValidationSummary { results })
}
