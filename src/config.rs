use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::parsers::json::Indent;

pub const CONFIG_FILE_NAME: &str = ".i18n-tag-schema.json";

pub const DEFAULT_FILTER: &str = r"\.jsx?$";
pub const DEFAULT_SCHEMA_PATH: &str = "./translation.schema.json";
pub const DEFAULT_PACKAGE_NAME: &str = "es2015-i18n-tag";
pub const JSON_FILTER: &str = r"\.json$";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
    /// Absent means tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
    #[serde(default = "default_package_name")]
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postprocessor: Option<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub typescript: bool,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_schema_path() -> String {
    DEFAULT_SCHEMA_PATH.to_string()
}

fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: None,
            filter: default_filter(),
            schema_path: default_schema_path(),
            indent: None,
            package_name: default_package_name(),
            preprocessor: None,
            postprocessor: None,
            ignores: default_ignores(),
            typescript: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the file filter is not a valid regex or any glob
    /// pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        Regex::new(&self.filter)
            .with_context(|| format!("Invalid file filter \"{}\"", self.filter))?;

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn indent(&self) -> Indent {
        Indent::from_spaces(self.indent)
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })
            })
            .collect()
    }
}

/// Config written by `init`.
pub fn default_config_json() -> Result<String> {
    let config = Config {
        root_path: Some("./src".to_string()),
        ..Config::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory the config file lives in; relative paths resolve against it.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
