//! i18n-tag-schema - JSON Schema generation for `es2015-i18n-tag` projects
//!
//! Extracts i18n tagged template literals from JavaScript and TypeScript
//! sources, turns them into a JSON Schema describing the translation catalog
//! and validates translation files against that schema.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, aggregation, schema and validation pipeline
//! - `issues`: Validation issue types and reporting
//! - `logging`: Logger collaborator
//! - `processors`: Preprocessor and postprocessor registry
//! - `progress`: Throttled progress reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod processors;
pub mod progress;
