//! Template data model shared by the extractor, the aggregator and the schema generator.
//!
//! - [`TranslationEntry`]: one occurrence found in a single source file
//! - [`Template`]: one element of the aggregated, serializable template list
//! - [`TemplatePatterns`]: template key → placeholder regex used as a schema `pattern`

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier that stands for "the current file's relative path" when used as a group.
pub const FILE_GROUP_SENTINEL: &str = "__translationGroup";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\d+)\}").unwrap());

/// Group a template occurrence belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupName {
    /// An explicit group name from a string literal or identifier argument.
    Named(String),
    /// Resolved at aggregation time to the file path relative to the scan root.
    CurrentFile,
}

impl GroupName {
    /// Build a group from an identifier argument, recognizing the file sentinel.
    pub fn from_identifier(name: &str) -> Self {
        if name == FILE_GROUP_SENTINEL {
            GroupName::CurrentFile
        } else {
            GroupName::Named(name.to_string())
        }
    }

    pub fn resolve(&self, file_group: &str) -> String {
        match self {
            GroupName::Named(name) => name.clone(),
            GroupName::CurrentFile => file_group.to_string(),
        }
    }
}

/// A single translation key occurrence produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TranslationEntry {
    /// Ungrouped key.
    Key(String),
    /// Key that belongs to a group.
    Grouped { group: GroupName, value: String },
}

impl TranslationEntry {
    pub fn value(&self) -> &str {
        match self {
            TranslationEntry::Key(value) => value,
            TranslationEntry::Grouped { value, .. } => value,
        }
    }
}

/// A named group of keys in the aggregated template list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateGroup {
    pub group: String,
    pub items: Vec<String>,
}

/// One element of the aggregated template list.
///
/// Serializes to either a bare string or `{ "group": ..., "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Template {
    Key(String),
    Group(TemplateGroup),
}

impl Template {
    /// The top-level property name this template occupies in the schema.
    pub fn name(&self) -> &str {
        match self {
            Template::Key(key) => key,
            Template::Group(group) => &group.group,
        }
    }

    /// Number of leaf keys this template contributes.
    pub fn key_count(&self) -> usize {
        match self {
            Template::Key(_) => 1,
            Template::Group(group) => group.items.len(),
        }
    }
}

/// Map from template key to the regex requiring all of its placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplatePatterns(BTreeMap<String, String>);

impl TemplatePatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: impl Into<String>, pattern: impl Into<String>) {
        self.0.insert(template.into(), pattern.into());
    }

    pub fn get(&self, template: &str) -> Option<&str> {
        self.0.get(template).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge another map into this one; later entries replace earlier ones.
    pub fn extend(&mut self, other: TemplatePatterns) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of an export: the aggregated template list and its patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExport {
    pub templates: Vec<Template>,
    pub template_patterns: TemplatePatterns,
}

impl TemplateExport {
    /// Total number of leaf keys across all templates.
    pub fn key_count(&self) -> usize {
        self.templates.iter().map(Template::key_count).sum()
    }
}

/// Pattern for a template with `count` positional placeholders.
///
/// Returns `None` for templates without placeholders.
pub fn placeholder_pattern(count: usize) -> Option<String> {
    if count == 0 {
        return None;
    }
    Some((0..count).map(lookahead).collect())
}

/// Pattern built from the `${N}` tokens written literally in a key.
///
/// Used for keys passed to `translate(...)`, where placeholders are not derived
/// from template interpolations.
pub fn pattern_from_key(key: &str) -> Option<String> {
    let pattern: String = PLACEHOLDER_REGEX
        .captures_iter(key)
        .filter_map(|caps| caps.get(1))
        .filter_map(|index| index.as_str().parse::<usize>().ok())
        .map(lookahead)
        .collect();
    if pattern.is_empty() {
        None
    } else {
        Some(pattern)
    }
}

fn lookahead(index: usize) -> String {
    format!(r"(?=.*?\$\{{{}\}})", index)
}
