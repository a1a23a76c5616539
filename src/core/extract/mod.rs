//! Template extraction from a single parsed source file.
//!
//! Extraction runs in three steps over one module:
//! 1. [`ImportNames`]: learn the local names of `i18n` and `i18nGroup`
//! 2. [`DeclarationGroups`]: find `i18nGroup(name)(Class)` wrapper calls
//! 3. [`TemplateExtractor`]: visit tagged templates and `translate(...)` calls

pub mod canonical;
pub mod imports;
pub mod visitor;

pub use imports::{DeclarationGroups, ImportNames};
pub use visitor::{ExtractionResult, TemplateExtractor};

use crate::core::parsers::source::ParsedSource;

/// Cheap textual gate run before parsing.
///
/// Only skips files that cannot contain a recognized call: every form needs
/// either the `i18n` identifier or an import from the package.
pub fn might_contain_templates(source: &str, package_name: &str) -> bool {
    source.contains("i18n") || (!package_name.is_empty() && source.contains(package_name))
}

/// Extract all translation entries and patterns from one parsed module.
pub fn extract_templates(parsed: &ParsedSource, package_name: &str) -> ExtractionResult {
    let names = ImportNames::collect(&parsed.module, package_name);
    let declaration_groups = DeclarationGroups::collect(&parsed.module, &names);
    TemplateExtractor::new(parsed, &names, &declaration_groups).extract(&parsed.module)
}
