//! Extraction, aggregation, schema generation and validation.
//!
//! Pipeline: `file_scanner` finds sources, `extract` turns each file into
//! translation entries, `aggregate` merges them, `schema` renders the JSON
//! Schema and `validate` checks translation files against it. `export`
//! drives the first three stages.

pub mod aggregate;
pub mod export;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod schema;
pub mod templates;
pub mod validate;

pub use export::{ExportOptions, ExtractOptions, Extractor, export_translation_keys};
pub use schema::{SchemaOptions, SchemaOutcome, generate_translation_schema};
pub use templates::{Template, TemplateExport, TemplateGroup};
pub use validate::{ValidateOptions, ValidationSummary, validate_translations};
