//! Folds per-file translation entries into one deterministic template list.
//!
//! Keys and group items are kept in ordered sets, so the final list does not
//! depend on the order in which files were merged.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::templates::{Template, TemplateExport, TemplateGroup, TemplatePatterns, TranslationEntry};

/// Group name used for a file: its path relative to the scan root with `/` separators.
pub fn file_group(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace('\\', "/")
}

/// Running collection of templates across many files.
#[derive(Debug, Clone, Default)]
pub struct TemplateCollection {
    keys: BTreeSet<String>,
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl TemplateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection from a previously exported template list.
    pub fn from_templates(templates: &[Template]) -> Self {
        let mut collection = Self::new();
        for template in templates {
            match template {
                Template::Key(key) => {
                    collection.add_key(key.clone());
                }
                Template::Group(group) => {
                    for item in &group.items {
                        collection.add_grouped(&group.group, item.clone());
                    }
                }
            }
        }
        collection
    }

    /// Returns true if the key was not present yet.
    pub fn add_key(&mut self, key: String) -> bool {
        self.keys.insert(key)
    }

    /// Returns true if the item was not present in the group yet.
    pub fn add_grouped(&mut self, group: &str, item: String) -> bool {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(item)
    }

    /// Merge one file's entries, resolving file-path groups to `file_group`.
    ///
    /// Returns the number of entries that were new to the collection.
    pub fn merge_entries(&mut self, entries: &[TranslationEntry], file_group: &str) -> usize {
        let mut added = 0;
        for entry in entries {
            let inserted = match entry {
                TranslationEntry::Key(key) => self.add_key(key.clone()),
                TranslationEntry::Grouped { group, value } => {
                    self.add_grouped(&group.resolve(file_group), value.clone())
                }
            };
            if inserted {
                added += 1;
            }
        }
        added
    }

    pub fn merge(&mut self, other: TemplateCollection) {
        self.keys.extend(other.keys);
        for (group, items) in other.groups {
            self.groups.entry(group).or_default().extend(items);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.groups.is_empty()
    }

    /// Number of leaf keys, counting each group item separately.
    pub fn key_count(&self) -> usize {
        self.keys.len() + self.groups.values().map(BTreeSet::len).sum::<usize>()
    }

    /// Ungrouped keys first, then groups by name; items sorted within each group.
    pub fn templates(&self) -> Vec<Template> {
        let keys = self.keys.iter().cloned().map(Template::Key);
        let groups = self
            .groups
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(group, items)| {
                Template::Group(TemplateGroup {
                    group: group.clone(),
                    items: items.iter().cloned().collect(),
                })
            });
        keys.chain(groups).collect()
    }
}

/// Collection plus the pattern map, merged file by file.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    collection: TemplateCollection,
    patterns: TemplatePatterns,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from an earlier export.
    pub fn from_export(export: &TemplateExport) -> Self {
        Self {
            collection: TemplateCollection::from_templates(&export.templates),
            patterns: export.template_patterns.clone(),
        }
    }

    pub fn merge_file(
        &mut self,
        entries: &[TranslationEntry],
        patterns: TemplatePatterns,
        file_group: &str,
    ) -> usize {
        self.patterns.extend(patterns);
        self.collection.merge_entries(entries, file_group)
    }

    pub fn collection(&self) -> &TemplateCollection {
        &self.collection
    }

    pub fn finish(self) -> TemplateExport {
        TemplateExport {
            templates: self.collection.templates(),
            template_patterns: self.patterns,
        }
    }
}
