use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, GROUPED_SOURCE, stderr, stdout};

#[test]
fn test_schema_writes_file_and_reports_diff() -> Result<()> {
    let test = CliTest::with_file("src/app.js", GROUPED_SOURCE)?;

    let output = test.schema_command().arg("src").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let schema: Value = serde_json::from_str(&test.read_file("translation.schema.json")?)?;
    assert_eq!(
        schema["required"],
        json!(["Welcome", "clock", "custom group", "custom inline group"])
    );
    assert_eq!(
        schema["properties"]["custom group"]["properties"]
            ["Hello ${0}, you have ${1} in your bank account."]["pattern"],
        json!(r"(?=.*?\$\{0\})(?=.*?\$\{1\})")
    );
    assert_eq!(
        schema["properties"]["clock"]["required"],
        json!(["Time"])
    );
    assert_eq!(schema["additionalProperties"], json!(false));

    let stderr = stderr(&output);
    assert!(stderr.contains("app.js (4 templates)"));
    assert!(stderr.contains(
        "i18n json schema has been generated; contains 4 keys ( 4 added / 0 removed ): "
    ));
    assert!(stdout(&output).contains("+ \"Welcome\""));

    Ok(())
}

#[test]
fn test_schema_second_run_reports_removed_keys() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "i18n`Hello!`\ni18n`Bye`")?;
    test.schema_command().arg("src").output()?;

    test.write_file("src/app.js", "i18n`Hello!`")?;
    let output = test.schema_command().arg("src").output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("contains 1 keys ( 0 added / 1 removed )"));
    assert!(stdout(&output).contains("- \"Bye\""));

    Ok(())
}

#[test]
fn test_schema_to_stdout() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "i18n`Hello ${name}`")?;

    let output = test
        .schema_command()
        .args(["src", "--stdout", "--indent", "2"])
        .output()?;

    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.starts_with("{\n  \"type\": \"object\""));
    let schema: Value = serde_json::from_str(&printed)?;
    assert_eq!(schema["required"], json!(["Hello ${0}"]));
    assert!(!test.root().join("translation.schema.json").exists());

    Ok(())
}

#[test]
fn test_schema_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".i18n-tag-schema.json",
        r#"{ "rootPath": "./app", "schemaPath": "./out/schema.json", "indent": 2, "filter": "\\.mjs$" }"#,
    )?;
    test.write_file("app/index.mjs", "i18n`Hello!`")?;
    test.write_file("app/ignored.js", "i18n`Ignored`")?;

    let output = test.schema_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = test.read_file("out/schema.json")?;
    assert!(content.starts_with("{\n  \"type\""));
    let schema: Value = serde_json::from_str(&content)?;
    assert_eq!(schema["required"], json!(["Hello!"]));

    Ok(())
}

#[test]
fn test_schema_without_templates_writes_empty_object() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "export const answer = 42")?;

    let output = test.schema_command().arg("src").output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("translation.schema.json")?, "{}");
    assert!(stderr(&output).contains("No i18n tagged template literals found in 'src'"));

    Ok(())
}

#[test]
fn test_schema_skips_unparsable_files() -> Result<()> {
    let test = CliTest::with_file("src/broken.js", "i18n`a` const = ;")?;
    test.write_file("src/ok.js", "i18n`Hello!`")?;

    let output = test.schema_command().arg("src").output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("broken.js"));
    let schema: Value = serde_json::from_str(&test.read_file("translation.schema.json")?)?;
    assert_eq!(schema["required"], json!(["Hello!"]));

    Ok(())
}

#[test]
fn test_schema_without_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.schema_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: rootPath is not defined."));

    Ok(())
}

#[test]
fn test_schema_with_unknown_preprocessor_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "i18n`Hello!`")?;

    let output = test
        .schema_command()
        .args(["src", "--preprocessor", "babel"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("cannot find preprocessor 'babel'. check if it is registered.")
    );

    Ok(())
}

#[test]
fn test_schema_typescript_sources() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "const name: string = 'x'\nexport const greet = () => i18n`Hello ${name}`",
    )?;

    let output = test
        .schema_command()
        .args(["src", "--filter", r"\.ts$"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let schema: Value = serde_json::from_str(&test.read_file("translation.schema.json")?)?;
    assert_eq!(schema["required"], json!(["Hello ${0}"]));

    Ok(())
}
