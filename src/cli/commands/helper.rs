use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::cli::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::export::{ExportOptions, ExtractOptions};
use crate::core::parsers::json::Indent;
use crate::core::parsers::source::SyntaxPlugins;
use crate::logging::{ConsoleLogger, Logger};
use crate::processors::{PreprocessorRef, ProcessorRegistry};

/// Configuration shared by the commands.
///
/// Priority: CLI arguments > `.i18n-tag-schema.json` > built-in defaults.
/// Paths from the config file resolve against the file's directory, paths
/// from arguments against the working directory.
pub struct CommandContext {
    pub config: Config,
    pub base_dir: PathBuf,
    pub registry: ProcessorRegistry,
    pub logger: ConsoleLogger,
    root_arg: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Cannot determine the working directory")?;
        let loaded = load_config(&cwd)?;
        let logger = ConsoleLogger::new(common.verbose);
        if common.verbose && !loaded.from_file {
            logger.trace("No .i18n-tag-schema.json found, using default configuration");
        }

        Ok(Self {
            config: loaded.config,
            base_dir: loaded.base_dir,
            registry: ProcessorRegistry::with_builtins(),
            logger,
            root_arg: common.root.clone(),
        })
    }

    pub fn config_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn root(&self) -> Result<PathBuf> {
        match (&self.root_arg, &self.config.root_path) {
            (Some(root), _) => Ok(root.clone()),
            (None, Some(root)) => Ok(self.config_path(root)),
            (None, None) => bail!("rootPath is not defined."),
        }
    }

    pub fn schema_path(&self, arg: Option<&Path>) -> PathBuf {
        match arg {
            Some(path) => path.to_path_buf(),
            None => self.config_path(&self.config.schema_path),
        }
    }

    pub fn filter(&self, arg: Option<&str>) -> Result<String> {
        let filter = arg.unwrap_or(&self.config.filter);
        Regex::new(filter).with_context(|| format!("Invalid file filter \"{}\"", filter))?;
        Ok(filter.to_string())
    }

    pub fn indent(&self, arg: Option<usize>) -> Indent {
        Indent::from_spaces(arg.or(self.config.indent))
    }

    /// Extraction settings with the preprocessor already resolved, so an
    /// unknown name fails before any file is read.
    pub fn extract_options(&self, preprocessor: Option<&str>, typescript: bool) -> Result<ExtractOptions> {
        let mut options = ExtractOptions {
            package_name: self.config.package_name.clone(),
            plugins: SyntaxPlugins {
                typescript: typescript || self.config.typescript,
                ..SyntaxPlugins::default()
            },
            preprocessor: None,
        };

        if let Some(name) = preprocessor.or(self.config.preprocessor.as_deref()) {
            let processor = self.registry.resolve_preprocessor(&PreprocessorRef::from(name))?;
            options.preprocessor = Some(processor);
        }
        Ok(options)
    }

    pub fn export_options(&self, filter: Option<&str>, extract: ExtractOptions) -> Result<ExportOptions> {
        self.config.ignore_patterns()?;
        Ok(ExportOptions {
            root_path: Some(self.root()?),
            file_path: None,
            filter: self.filter(filter)?,
            ignores: self.config.ignores.clone(),
            extract,
            progress: None,
        })
    }
}
