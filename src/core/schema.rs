//! JSON Schema generation, diffing and persistence.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::core::export::{ExportOptions, export_translation_keys};
use crate::core::parsers::json::{Indent, read_json_file, write_json_file};
use crate::core::templates::{Template, TemplateExport, TemplatePatterns};
use crate::logging::Logger;

/// Property that lets translation files point at their schema.
pub const SCHEMA_PROPERTY: &str = "$schema";

const GENERATED_MESSAGE: &str = "i18n json schema has been generated";

fn key_schema(key: &str, patterns: &TemplatePatterns) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("string"));
    schema.insert("minLength".to_string(), json!(1));
    if let Some(pattern) = patterns.get(key) {
        schema.insert("pattern".to_string(), json!(pattern));
    }
    Value::Object(schema)
}

/// Build the schema for an aggregated template list.
pub fn generate_schema(templates: &[Template], patterns: &TemplatePatterns) -> Value {
    let mut properties = Map::new();
    properties.insert(SCHEMA_PROPERTY.to_string(), json!({ "type": "string" }));

    for template in templates {
        match template {
            Template::Key(key) => {
                properties.insert(key.clone(), key_schema(key, patterns));
            }
            Template::Group(group) => {
                let items: Map<String, Value> = group
                    .items
                    .iter()
                    .map(|item| (item.clone(), key_schema(item, patterns)))
                    .collect();
                properties.insert(
                    group.group.clone(),
                    json!({
                        "type": "object",
                        "properties": items,
                        "required": group.items,
                    }),
                );
            }
        }
    }

    let mut seen = BTreeSet::new();
    let required: Vec<&str> = templates
        .iter()
        .map(Template::name)
        .filter(|name| seen.insert(*name))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Names used both as a plain key and as a group. The group wins in the
/// generated schema.
pub fn name_collisions(templates: &[Template]) -> Vec<String> {
    let keys: BTreeSet<&str> = templates
        .iter()
        .filter_map(|template| match template {
            Template::Key(key) => Some(key.as_str()),
            Template::Group(_) => None,
        })
        .collect();
    templates
        .iter()
        .filter_map(|template| match template {
            Template::Group(group) if keys.contains(group.group.as_str()) => Some(group.group.clone()),
            _ => None,
        })
        .collect()
}

/// Schema for an export; an empty export yields `{}`.
pub fn schema_for_export(export: &TemplateExport) -> Value {
    if export.templates.is_empty() {
        json!({})
    } else {
        generate_schema(&export.templates, &export.template_patterns)
    }
}

/// Leaf key names of a schema: nested keys for groups, the name itself for
/// plain keys. `$schema` is not a key.
pub fn lookup_keys(schema: &Value) -> Vec<String> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    properties
        .iter()
        .filter(|(name, _)| name.as_str() != SCHEMA_PROPERTY)
        .flat_map(|(name, property)| match property.get("properties").and_then(Value::as_object) {
            Some(nested) => nested.keys().cloned().collect::<Vec<_>>(),
            None => vec![name.clone()],
        })
        .collect()
}

/// Key changes between a previous schema and a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Number of keys in the new schema.
    pub count: usize,
}

pub fn diff_schema(previous: Option<&Value>, new: &Value) -> SchemaDiff {
    let new_keys = lookup_keys(new);
    let old_keys = previous.map(lookup_keys).unwrap_or_default();

    let old_set: BTreeSet<&String> = old_keys.iter().collect();
    let new_set: BTreeSet<&String> = new_keys.iter().collect();

    SchemaDiff {
        added: new_keys
            .iter()
            .filter(|key| !old_set.contains(key))
            .cloned()
            .collect(),
        removed: old_keys
            .iter()
            .filter(|key| !new_set.contains(key))
            .cloned()
            .collect(),
        count: new_keys.len(),
    }
}

/// Read the schema that is about to be replaced.
///
/// An unreadable or invalid file is logged and treated as absent.
pub fn read_previous_schema(path: &Path, logger: &dyn Logger) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    match read_json_file(path) {
        Ok(value) => Some(value),
        Err(err) => {
            logger.warn(&err.to_string());
            logger.trace(&format!("{:?}", err));
            None
        }
    }
}

/// Options for [`generate_translation_schema`].
#[derive(Clone, Default)]
pub struct SchemaOptions {
    pub export: ExportOptions,
    /// Where to write the schema; `None` only returns it.
    pub schema_path: Option<PathBuf>,
    pub indent: Indent,
}

/// Result of a schema generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaOutcome {
    pub schema: Value,
    /// Present when the schema was written to disk.
    pub diff: Option<SchemaDiff>,
    pub message: String,
}

/// Export all templates under the root and turn them into a schema.
pub fn generate_translation_schema(options: &SchemaOptions, logger: &dyn Logger) -> Result<SchemaOutcome> {
    let export = export_translation_keys(&options.export, logger)?;
    let schema = schema_for_export(&export);
    for name in name_collisions(&export.templates) {
        logger.warn(&format!(
            "Translation key \"{}\" is shadowed by a group of the same name",
            name
        ));
    }

    if export.templates.is_empty() {
        let root = options
            .export
            .root_path
            .as_deref()
            .map(|root| root.display().to_string())
            .unwrap_or_default();
        logger.warn(&format!("No i18n tagged template literals found in '{}'", root));
    }

    let Some(schema_path) = &options.schema_path else {
        logger.success(GENERATED_MESSAGE);
        return Ok(SchemaOutcome {
            schema,
            diff: None,
            message: GENERATED_MESSAGE.to_string(),
        });
    };

    let previous = read_previous_schema(schema_path, logger);
    write_json_file(schema_path, &schema, options.indent)
        .inspect_err(|err| logger.error(&err.to_string()))?;

    let diff = diff_schema(previous.as_ref(), &schema);
    let message = format!(
        "{}; contains {} keys ( {} added / {} removed ): {}",
        GENERATED_MESSAGE,
        diff.count,
        diff.added.len(),
        diff.removed.len(),
        schema_path.display()
    );
    logger.success(&message);

    Ok(SchemaOutcome {
        schema,
        diff: Some(diff),
        message,
    })
}
