use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["sourceRoot"], "src/main");
    assert_eq!(
        parsed["langBundle"],
        "src/main/resources/l10n/JabRef_en.properties"
    );
    assert_eq!(
        parsed["menuBundle"],
        "src/main/resources/l10n/Menu_en.properties"
    );
    assert_eq!(parsed["sourceExtensions"], serde_json::json!(["java"]));
    assert_eq!(parsed["markupExtensions"], serde_json::json!(["fxml"]));
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .l10nscanrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".l10nscanrc.json").exists());

    let content = test.read_file(".l10nscanrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nscanrc.json", "{}")?;

    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .l10nscanrc.json already exists
    ");
    assert_eq!(test.read_file(".l10nscanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_check() -> Result<()> {
    let test = CliTest::with_bundles("Save=Save\n", "")?;
    test.write_file(
        "src/main/java/App.java",
        r#"class App { String s = Localization.lang("Save"); }"#,
    )?;

    let init = run(test.command().arg("init"))?;
    assert_eq!(init.code, Some(0));

    let check = run(&mut test.check_command())?;
    assert_eq!(check.code, Some(0), "stdout: {}", check.stdout);

    Ok(())
}
