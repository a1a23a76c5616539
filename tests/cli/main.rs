use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod export;
mod init;
mod schema;
mod validate;

const BIN_NAME: &str = "i18n-tag-schema";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps the config lookup inside the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn schema_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("schema");
        cmd
    }

    pub fn export_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("export");
        cmd
    }

    pub fn validate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("validate");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A decorated class, an export-wrapped class and inline groups.
pub const GROUPED_SOURCE: &str = r#"import i18n, { i18nGroup } from 'es2015-i18n-tag'

@i18nGroup('custom group')
export class Account {
    log() {
        console.log(this.i18n`Hello ${name}, you have ${amount}:c in your bank account.`)
    }
}

class Clock {
    render() {
        return this.i18n`Time`
    }
}
export default i18nGroup('clock')(Clock)

console.log(i18n('custom inline group')`Hello!`)
console.log(i18n`Welcome`)
"#;
