//! `init`: write a starter `.i18n-tag-schema.json` into the working directory.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Cannot determine the working directory")?;
    init_in(&cwd)
}

/// Create the config file in `dir`. An existing file is never overwritten.
pub fn init_in(dir: &Path) -> Result<ExitStatus> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    println!("  point \"rootPath\" at your sources, then run `i18n-tag-schema schema`");

    Ok(ExitStatus::Success)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::config::Config;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();

        assert_eq!(init_in(dir.path()).unwrap(), ExitStatus::Success);

        let content = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let config: Config = serde_json::from_str(&content).unwrap();
        assert_eq!(config.root_path.as_deref(), Some("./src"));
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();

        assert_eq!(init_in(dir.path()).unwrap(), ExitStatus::Failure);
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "{}"
        );
    }
}
