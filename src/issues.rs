//! Issue types produced when validating a translation file against the schema.
//!
//! Each issue carries the file name it was found in and renders the message
//! shown to users. Issues also know how they count towards the file's
//! missing and invalid tallies.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingGroup,
    MissingKey,
    EmptyTranslation,
    MissingParameters,
    UnknownKey,
    SchemaViolation,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingGroup => write!(f, "missing-group"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::EmptyTranslation => write!(f, "empty-translation"),
            Rule::MissingParameters => write!(f, "missing-parameters"),
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::SchemaViolation => write!(f, "schema-violation"),
        }
    }
}

/// A key or group name as JSON, e.g. `"custom group"`.
fn quoted(name: &str) -> String {
    serde_json::to_string(name).unwrap_or_else(|_| format!("\"{}\"", name))
}

fn in_path(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" in {}", path),
        None => String::new(),
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A whole group is absent; every key in it counts as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingGroupIssue {
    pub file: String,
    pub group: String,
    pub key_count: usize,
}

/// A required key is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub file: String,
    pub key: String,
    /// Rendered path of the enclosing group, if any.
    pub path: Option<String>,
}

/// The key is present but its translation is an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTranslationIssue {
    pub file: String,
    pub path: String,
}

/// The translation does not contain every `${N}` placeholder of its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParametersIssue {
    pub file: String,
    pub path: String,
}

/// A key or group that the schema does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyIssue {
    pub file: String,
    pub key: String,
    pub path: Option<String>,
}

/// Any other schema violation, e.g. a number where a string is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolationIssue {
    pub file: String,
    pub detail: String,
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found in one translation file.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingGroup(MissingGroupIssue),
    MissingKey(MissingKeyIssue),
    EmptyTranslation(EmptyTranslationIssue),
    MissingParameters(MissingParametersIssue),
    UnknownKey(UnknownKeyIssue),
    SchemaViolation(SchemaViolationIssue),
}

// ============================================================
// Report Trait
// ============================================================

/// Trait for types that can be reported to users.
///
/// Uses `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File name the issue was found in.
    fn file(&self) -> &str;

    /// Full message, starting with the file name.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// How many translations this issue leaves missing.
    fn missing_count(&self) -> usize {
        0
    }

    /// How many invalid keys this issue represents.
    fn invalid_count(&self) -> usize {
        0
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingGroupIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!(
            "{} is missing translation group {}",
            self.file,
            quoted(&self.group)
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingGroup
    }

    fn missing_count(&self) -> usize {
        self.key_count
    }
}

impl Report for MissingKeyIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!(
            "{} is missing translation key {}{}",
            self.file,
            quoted(&self.key),
            in_path(&self.path)
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingKey
    }

    fn missing_count(&self) -> usize {
        1
    }
}

impl Report for EmptyTranslationIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!("{} is missing translation {}", self.file, self.path)
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::EmptyTranslation
    }

    fn missing_count(&self) -> usize {
        1
    }
}

impl Report for MissingParametersIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!(
            "{} translation of {} does not include all parameters",
            self.file, self.path
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingParameters
    }
}

impl Report for UnknownKeyIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!(
            "{} has unknown translation key or group {}{}",
            self.file,
            quoted(&self.key),
            in_path(&self.path)
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::UnknownKey
    }

    fn invalid_count(&self) -> usize {
        1
    }
}

impl Report for SchemaViolationIssue {
    fn file(&self) -> &str {
        &self.file
    }

    fn message(&self) -> String {
        format!("{} {}", self.file, self.detail)
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::SchemaViolation
    }
}
