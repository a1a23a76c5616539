use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .i18n-tag-schema.json"));

    let content = test.read_file(".i18n-tag-schema.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["rootPath"], "./src");
    assert_eq!(parsed["filter"], r"\.jsx?$");
    assert_eq!(parsed["schemaPath"], "./translation.schema.json");
    assert_eq!(parsed["packageName"], "es2015-i18n-tag");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".i18n-tag-schema.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: .i18n-tag-schema.json already exists"));
    assert_eq!(test.read_file(".i18n-tag-schema.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/app.js", "i18n`Hello!`")?;

    let output = test.schema_command().output()?;

    assert!(
        output.status.success(),
        "Schema command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join("translation.schema.json").exists());

    Ok(())
}
