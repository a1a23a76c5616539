//! File parsers for source code and JSON documents.
//!
//! This module provides parsers for different file types:
//! - `json`: JSON reading/writing for schemas and translation files
//! - `source`: JavaScript/TypeScript source parser (uses swc for AST generation)

pub mod json;
pub mod source;
