use anyhow::Result;

use crate::{CliTest, GROUPED_SOURCE, stderr, stdout};

const COMPLETE: &str = r#"{
    "Welcome": "Willkommen",
    "clock": { "Time": "Zeit" },
    "custom group": {
        "Hello ${0}, you have ${1} in your bank account.": "Hallo ${0}, du hast ${1} auf deinem Konto."
    },
    "custom inline group": { "Hello!": "Hallo!" }
}"#;

fn with_schema() -> Result<CliTest> {
    let test = CliTest::with_file("src/app.js", GROUPED_SOURCE)?;
    let output = test.schema_command().arg("src").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    Ok(test)
}

#[test]
fn test_validate_complete_translation() -> Result<()> {
    let test = with_schema()?;
    test.write_file("locales/de.json", COMPLETE)?;

    let output = test
        .validate_command()
        .args(["locales/de.json", "--schema", "translation.schema.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("de.json is valid and 100% translated!"));

    Ok(())
}

#[test]
fn test_validate_incomplete_translation_fails() -> Result<()> {
    let test = with_schema()?;
    test.write_file(
        "locales/fr.json",
        r#"{
            "Welcome": "",
            "clock": { "Time": "Heure" },
            "custom group": {
                "Hello ${0}, you have ${1} in your bank account.": "Bonjour ${0}"
            },
            "Obsolete": "Obsolète"
        }"#,
    )?;

    let output = test
        .validate_command()
        .args(["locales/fr.json", "--schema", "translation.schema.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(
        "fr.json has 2 missing translations and 1 invalid key; 50% translated."
    ));

    let stderr = stderr(&output);
    assert!(stderr.contains("fr.json is missing translation group \"custom inline group\""));
    assert!(stderr.contains("fr.json is missing translation [\"Welcome\"]"));
    assert!(stderr.contains(
        "fr.json translation of [\"custom group\"][\"Hello ${0}, you have ${1} in your bank account.\"] does not include all parameters"
    ));
    assert!(stderr.contains("fr.json has unknown translation key or group \"Obsolete\""));

    Ok(())
}

#[test]
fn test_validate_directory() -> Result<()> {
    let test = with_schema()?;
    test.write_file("locales/de.json", COMPLETE)?;
    test.write_file("locales/en.json", r#"{ "Welcome": "Welcome" }"#)?;

    let output = test
        .validate_command()
        .args(["locales", "--schema", "translation.schema.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("de.json is valid and 100% translated!"));
    assert!(stdout.contains("en.json has 3 missing translations; 25% translated."));
    assert!(stdout.contains("1 of 2 translation files are incomplete"));

    Ok(())
}

#[test]
fn test_validate_directory_excludes_schema() -> Result<()> {
    let test = with_schema()?;
    test.write_file("locales/de.json", COMPLETE)?;
    test.write_file("locales/schema.json", &test.read_file("translation.schema.json")?)?;

    let output = test
        .validate_command()
        .args(["locales", "--schema", "locales/schema.json"])
        .output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(!stdout(&output).contains("schema.json"));

    Ok(())
}

#[test]
fn test_validate_unparsable_file_continues() -> Result<()> {
    let test = with_schema()?;
    test.write_file("locales/broken.json", "{ nope")?;
    test.write_file("locales/de.json", COMPLETE)?;

    let output = test
        .validate_command()
        .args(["locales", "--schema", "translation.schema.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout(&output);
    assert!(stdout.contains("broken.json: Failed to parse JSON file"));
    assert!(stdout.contains("de.json is valid and 100% translated!"));

    Ok(())
}

#[test]
fn test_validate_missing_schema_is_an_error() -> Result<()> {
    let test = CliTest::with_file("locales/de.json", "{}")?;

    let output = test
        .validate_command()
        .args(["locales", "--schema", "missing.schema.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read JSON file"));

    Ok(())
}
