use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::{CliTest, GROUPED_SOURCE, stderr, stdout};

#[test]
fn test_export_prints_templates() -> Result<()> {
    let test = CliTest::with_file("src/app.js", GROUPED_SOURCE)?;

    let output = test.export_command().arg("src").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let templates: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        templates,
        json!([
            "Welcome",
            { "group": "clock", "items": ["Time"] },
            {
                "group": "custom group",
                "items": ["Hello ${0}, you have ${1} in your bank account."]
            },
            { "group": "custom inline group", "items": ["Hello!"] }
        ])
    );

    Ok(())
}

#[test]
fn test_export_po() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        "i18n`Welcome`\ni18n('menu')`Open`",
    )?;

    let output = test
        .export_command()
        .args(["src", "--postprocessor", "po"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_snapshot!(stdout(&output), @r#"
    msgid "Welcome"
    msgstr ""

    msgctxt "menu"
    msgid "Open"
    msgstr ""
    "#);

    Ok(())
}

#[test]
fn test_export_single_file() -> Result<()> {
    let test = CliTest::with_file("src/components/Clock.js", "i18n(__translationGroup)`Time`")?;
    test.write_file("src/other.js", "i18n`Other`")?;

    let output = test
        .export_command()
        .args(["src", "--file", "src/components/Clock.js"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let templates: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        templates,
        json!([{ "group": "components/Clock.js", "items": ["Time"] }])
    );

    Ok(())
}

#[test]
fn test_export_single_unparsable_file_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/broken.js", "i18n`a` const = ;")?;

    let output = test
        .export_command()
        .args(["src", "--file", "src/broken.js"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_export_to_file() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "i18n`Hello!`\ni18n`Bye`")?;

    let output = test
        .export_command()
        .args(["src", "--output", "build/templates.json", "--indent", "2"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("build/templates.json")?,
        "[\n  \"Bye\",\n  \"Hello!\"\n]"
    );
    assert!(stdout(&output).contains("Exported 2 translation keys to build/templates.json"));

    Ok(())
}

#[test]
fn test_export_with_unknown_postprocessor_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "i18n`Hello!`")?;

    let output = test
        .export_command()
        .args(["src", "--postprocessor", "xliff"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("cannot find postprocessor 'xliff'. check if it is registered.")
    );

    Ok(())
}
