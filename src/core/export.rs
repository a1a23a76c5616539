//! Export orchestration: scan files, extract templates in parallel and merge
//! them into one sorted template list.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use regex::Regex;
use swc_common::SourceMap;

use crate::config::{DEFAULT_FILTER, DEFAULT_PACKAGE_NAME};
use crate::core::aggregate::{Aggregator, file_group};
use crate::core::extract::{ExtractionResult, extract_templates, might_contain_templates};
use crate::core::file_scanner::{ScanFilter, scan_files};
use crate::core::parsers::json::{Indent, to_json_string};
use crate::core::parsers::source::{SyntaxPlugins, parse_source};
use crate::core::templates::{Template, TemplateExport};
use crate::logging::Logger;
use crate::processors::{Postprocessor, Preprocessor, PreprocessorRef, ProcessorRegistry};
use crate::progress::{ProgressCallback, ProgressTracker};

/// Settings for turning one source text into translation entries.
#[derive(Clone)]
pub struct ExtractOptions {
    pub package_name: String,
    pub plugins: SyntaxPlugins,
    pub preprocessor: Option<Arc<dyn Preprocessor>>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            plugins: SyntaxPlugins::default(),
            preprocessor: None,
        }
    }
}

impl ExtractOptions {
    /// Resolve a preprocessor reference through `registry`.
    pub fn with_preprocessor(
        mut self,
        reference: Option<&PreprocessorRef>,
        registry: &ProcessorRegistry,
        logger: &dyn Logger,
    ) -> Result<Self> {
        if let Some(reference) = reference {
            let processor = registry
                .resolve_preprocessor(reference)
                .inspect_err(|err| logger.error(&err.to_string()))?;
            self.preprocessor = Some(processor);
        }
        Ok(self)
    }
}

/// Parses and extracts files, sharing one source map across threads.
pub struct Extractor {
    options: ExtractOptions,
    source_map: Arc<SourceMap>,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            source_map: Arc::new(SourceMap::default()),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract entries from source text; `file_path` selects the grammar.
    pub fn extract_source(&self, source: &str, file_path: &Path) -> Result<ExtractionResult> {
        let source = match &self.options.preprocessor {
            Some(preprocessor) => preprocessor
                .process(source)
                .with_context(|| format!("Failed to preprocess {}", file_path.display()))?,
            None => source.to_string(),
        };

        if !might_contain_templates(&source, &self.options.package_name) {
            return Ok(ExtractionResult::default());
        }

        let parsed = parse_source(
            source,
            &file_path.to_string_lossy(),
            self.options.plugins.for_file(file_path),
            Arc::clone(&self.source_map),
        )?;
        Ok(extract_templates(&parsed, &self.options.package_name))
    }

    pub fn extract_file(&self, file_path: &Path) -> Result<ExtractionResult> {
        let source = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;
        self.extract_source(&source, file_path)
    }
}

fn pluralize(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn relative_display(root: &Path, file_path: &Path) -> String {
    file_path
        .strip_prefix(root)
        .unwrap_or(file_path)
        .display()
        .to_string()
}

/// Fold one file's extraction result into `aggregator`, logging a summary line.
///
/// Returns the number of entries found in the file.
pub fn merge_file_templates(
    root: &Path,
    file_path: &Path,
    result: ExtractionResult,
    aggregator: &mut Aggregator,
    logger: &dyn Logger,
) -> usize {
    let relative = relative_display(root, file_path);
    for warning in &result.warnings {
        logger.warn(&format!("{}: {}", relative, warning));
    }

    let count = result.entries.len();
    aggregator.merge_file(&result.entries, result.patterns, &file_group(root, file_path));
    logger.info(&format!("{} ({} template{})", relative, count, pluralize(count)));
    count
}

/// Extract templates from in-memory content and merge them into `aggregator`.
///
/// `root` and `file_path` only decide the file's group name and grammar.
pub fn read_templates_from_file_content(
    root: &Path,
    file_path: &Path,
    content: &str,
    extractor: &Extractor,
    aggregator: &mut Aggregator,
    logger: &dyn Logger,
) -> Result<usize> {
    let result = extractor.extract_source(content, file_path)?;
    Ok(merge_file_templates(root, file_path, result, aggregator, logger))
}

/// Options for [`export_translation_keys`].
#[derive(Clone)]
pub struct ExportOptions {
    pub root_path: Option<PathBuf>,
    /// Export a single file instead of scanning the root.
    pub file_path: Option<PathBuf>,
    /// Regex matched against file names.
    pub filter: String,
    pub ignores: Vec<String>,
    pub extract: ExtractOptions,
    pub progress: Option<ProgressCallback>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            root_path: None,
            file_path: None,
            filter: DEFAULT_FILTER.to_string(),
            ignores: vec!["**/node_modules/**".to_string()],
            extract: ExtractOptions::default(),
            progress: None,
        }
    }
}

impl ExportOptions {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: Some(root_path.into()),
            ..Self::default()
        }
    }

    /// The root path, or the configuration error for a missing one.
    pub fn root(&self, logger: &dyn Logger) -> Result<&Path> {
        match &self.root_path {
            Some(root) => Ok(root),
            None => {
                let message = "rootPath is not defined.";
                logger.error(message);
                Err(anyhow!(message))
            }
        }
    }
}

/// Extract and aggregate all templates under the root (or from one file).
///
/// In directory mode a file that cannot be read or parsed is logged and
/// skipped; in single-file mode its error is returned.
pub fn export_translation_keys(options: &ExportOptions, logger: &dyn Logger) -> Result<TemplateExport> {
    let root = options.root(logger)?;
    let extractor = Extractor::new(options.extract.clone());
    let mut aggregator = Aggregator::new();

    if let Some(file_path) = &options.file_path {
        let tracker = ProgressTracker::new(options.progress.clone(), 1);
        let result = extractor.extract_file(file_path)?;
        merge_file_templates(root, file_path, result, &mut aggregator, logger);
        tracker.tick(&relative_display(root, file_path));
        tracker.finish();
        return Ok(aggregator.finish());
    }

    let filter = Regex::new(&options.filter)
        .with_context(|| format!("Invalid file filter \"{}\"", options.filter))
        .inspect_err(|err| logger.error(&err.to_string()))?;
    let ignores = options
        .ignores
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))
        })
        .collect::<Result<Vec<_>>>()
        .inspect_err(|err| logger.error(&err.to_string()))?;

    let scan_filter = ScanFilter {
        filter: &filter,
        ignores: &ignores,
        exclude: &[],
    };
    let scan = scan_files(root, &scan_filter, logger)?;
    let tracker = ProgressTracker::new(options.progress.clone(), scan.files.len());

    let results: Vec<(&PathBuf, Result<ExtractionResult>)> = scan
        .files
        .par_iter()
        .map(|file_path| {
            let result = extractor.extract_file(file_path);
            tracker.tick(&relative_display(root, file_path));
            (file_path, result)
        })
        .collect();
    tracker.finish();

    for (file_path, result) in results {
        match result {
            Ok(result) => {
                merge_file_templates(root, file_path, result, &mut aggregator, logger);
            }
            Err(err) => {
                logger.warn(&format!("{}: {}", file_path.display(), err));
                logger.trace(&format!("{:?}", err));
            }
        }
    }

    Ok(aggregator.finish())
}

/// Render the template list, through a postprocessor when one is given.
pub fn render_templates(
    templates: &[Template],
    postprocessor: Option<&dyn Postprocessor>,
    indent: Indent,
) -> Result<String> {
    match postprocessor {
        Some(postprocessor) => postprocessor.process(templates),
        None => to_json_string(templates, indent),
    }
}
