use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, LANG_BUNDLE, run};

const APP_JAVA: &str = "src/main/java/org/jabref/App.java";

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_bundles("Save=Save\nOpen_file=Open file\n", "File=File\n")?;
    test.write_file(
        APP_JAVA,
        r#"
class App {
    void menu() {
        Localization.lang("Save");
        Localization.lang("Open file");
        Localization.menuTitle("File");
    }
}
"#,
    )?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no issues found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_missing_key() -> Result<()> {
    let test = CliTest::with_bundles("", "")?;
    test.write_file(
        APP_JAVA,
        r#"class App {
    void save() {
        dialog.notify(Localization.lang("Save file"));
    }
}
"#,
    )?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Save_file"  missing-key [lang]
      --> ./src/main/java/org/jabref/App.java:3:23
      |
    3 |         dialog.notify(Localization.lang("Save file"));
      |                       ^
      = hint: add "Save_file" to ./src/main/resources/l10n/JabRef_en.properties


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_obsolete_key() -> Result<()> {
    let test = CliTest::with_bundles("Used=Used\nNot_used=Not used\n", "")?;
    test.write_file(APP_JAVA, r#"Localization.lang("Used");"#)?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: "Not_used"  obsolete-key [lang]
      --> ./src/main/resources/l10n/JabRef_en.properties:2:1
      = note: defined but not used in any source or markup file


    ✘ 1 problems (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_missing_key_used_in_several_files() -> Result<()> {
    let test = CliTest::with_bundles("", "")?;
    for name in ["A", "B", "C", "D", "E"] {
        test.write_file(
            &format!("src/main/java/{name}.java"),
            r#"Localization.lang("Shared key");"#,
        )?;
    }
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Shared_key"  missing-key [lang]
      --> ./src/main/java/A.java:1:1
      |
    1 | Localization.lang("Shared key");
      | ^
      = hint: add "Shared_key" to ./src/main/resources/l10n/JabRef_en.properties
      = used: ./src/main/java/B.java:1:1
      = used: ./src/main/java/C.java:1:1
      = used: ./src/main/java/D.java:1:1 (and 1 more)


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_bundle_selection() -> Result<()> {
    let test = CliTest::with_bundles("Unused=Unused\n", "File=File\n")?;
    test.write_file(APP_JAVA, r#"Localization.menuTitle("File");"#)?;

    let menu = run(test.check_command().arg("menu"))?;
    assert_eq!(menu.code, Some(0), "stdout: {}", menu.stdout);

    let lang = run(test.check_command().arg("lang"))?;
    assert_eq!(lang.code, Some(1));
    assert!(lang.stdout.contains("\"Unused\"  obsolete-key [lang]"));

    Ok(())
}

#[test]
fn test_keys_are_checked_per_bundle() -> Result<()> {
    let test = CliTest::with_bundles("File=File\n", "")?;
    test.write_file(APP_JAVA, r#"Localization.menuTitle("File");"#)?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "File"  missing-key [menu]
      --> ./src/main/java/org/jabref/App.java:1:1
      |
    1 | Localization.menuTitle("File");
      | ^
      = hint: add "File" to ./src/main/resources/l10n/Menu_en.properties

    warning: "File"  obsolete-key [lang]
      --> ./src/main/resources/l10n/JabRef_en.properties:1:1
      = note: defined but not used in any source or markup file


    ✘ 2 problems (1 error, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_markup_keys() -> Result<()> {
    let test = CliTest::with_bundles("Cancel=Cancel\n", "")?;
    test.write_file(
        "src/main/java/org/jabref/gui/Dialog.fxml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<?import javafx.scene.control.Button?>
<VBox xmlns:fx="http://javafx.com/fxml">
    <Button text="%Cancel"/>
    <Button text="%Apply changes"/>
</VBox>
"#,
    )?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Apply_changes"  missing-key [lang]
      --> ./src/main/java/org/jabref/gui/Dialog.fxml:1:1
      = hint: add "Apply_changes" to ./src/main/resources/l10n/JabRef_en.properties


    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_trailing_space_is_extraction_error() -> Result<()> {
    let test = CliTest::with_bundles("Open=Open\n", "")?;
    // Keys of the failing file are left out, so "Open" looks unused.
    test.write_file(
        APP_JAVA,
        r#"Localization.lang("Open ");
Localization.lang("Open");"#,
    )?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Open " at 1:1 ends with a space. As this is a localization key, this is illegal!  extraction-error [lang]
      --> ./src/main/java/org/jabref/App.java:1:1
      = note: keys of this file were not checked

    warning: "Open"  obsolete-key [lang]
      --> ./src/main/resources/l10n/JabRef_en.properties:1:1
      = note: defined but not used in any source or markup file


    ✘ 2 problems (1 error, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_comment_inside_call() -> Result<()> {
    let test = CliTest::with_bundles("Save_%0=Save %0\n", "")?;
    test.write_file(
        APP_JAVA,
        r#"String s = Localization.lang("Save %0", // the user's file
        name);"#,
    )?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_escaped_emoji_in_bundle() -> Result<()> {
    let test = CliTest::with_bundles("Smile=\\ud83d\\ude00\n", "")?;
    test.write_file(APP_JAVA, r#"Localization.lang("Smile");"#)?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);

    Ok(())
}

#[test]
fn test_unbalanced_parentheses() -> Result<()> {
    let test = CliTest::with_bundles("", "")?;
    test.write_file(APP_JAVA, r#"Localization.lang("Never closed""#)?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains("error: unbalanced parentheses in call at 1:1")
    );

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_bundles("Old=Old\n", "")?;
    test.write_file(APP_JAVA, r#"Localization.lang("New key");"#)?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command().args(["--format", "json"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {
      "bundles": [
        "lang",
        "menu"
      ],
      "issues": [
        {
          "rule": "missing-key",
          "severity": "error",
          "bundle": "lang",
          "key": "New_key",
          "location": {
            "file_path": "./src/main/java/org/jabref/App.java",
            "line": 1,
            "col": 1
          },
          "source_line": "Localization.lang(\"New key\");",
          "bundle_file": "./src/main/resources/l10n/JabRef_en.properties"
        },
        {
          "rule": "obsolete-key",
          "severity": "warning",
          "bundle": "lang",
          "key": "Old",
          "location": {
            "file_path": "./src/main/resources/l10n/JabRef_en.properties",
            "line": 1,
            "col": 1
          }
        }
      ],
      "skippedFiles": [],
      "summary": {
        "errors": 1,
        "warnings": 1,
        "sourceFiles": 1,
        "markupFiles": 0,
        "skippedFiles": 0
      }
    }

    ----- stderr -----
    "#);

    let output = run(test.check_command().args(["--format", "json"]))?;
    let report: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["summary"]["errors"], 1);

    Ok(())
}

#[test]
fn test_cli_overrides_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Main.java", r#"Localization.lang("Hello");"#)?;
    test.write_file("l10n/en.properties", "Hello=Hello\n")?;

    let output = run(test.check_command().args([
        "lang",
        "--source-root",
        "app",
        "--lang-bundle",
        "l10n/en.properties",
    ]))?;

    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".l10nscanrc.json",
        r#"{
    "sourceRoot": "modules",
    "ignores": ["**/generated/**"],
    "langBundle": "l10n/en.properties",
    "menuBundle": "l10n/menu.properties"
}"#,
    )?;
    test.write_file("modules/App.java", r#"Localization.lang("Hello");"#)?;
    test.write_file(
        "modules/generated/Stub.java",
        r#"Localization.lang("Generated");"#,
    )?;
    test.write_file("l10n/en.properties", "Hello=Hello\n")?;
    test.write_file("l10n/menu.properties", "")?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(0), "stdout: {}", output.stdout);

    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nscanrc.json", r#"{ "markupExtensions": [] }"#)?;
    test.write_file(APP_JAVA, "")?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("'markupExtensions' must name at least one extension"));

    Ok(())
}

#[test]
fn test_missing_bundle_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(APP_JAVA, r#"Localization.lang("Hello");"#)?;

    let output = run(&mut test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains(
        "Error: base resource file ./src/main/resources/l10n/JabRef_en.properties could not be read"
    ));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_missing_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(LANG_BUNDLE.replace("src/main", "other").as_str(), "")?;

    let output = run(test.check_command().args(["--source-root", "nowhere"]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("source root ./nowhere does not exist"));

    Ok(())
}

#[test]
fn test_invalid_markup_is_skipped() -> Result<()> {
    let test = CliTest::with_bundles("", "")?;
    test.write_file("src/main/java/Broken.fxml", "<VBox><Button text=\"%A\">")?;
    let _filters = test.snapshot_settings().bind_to_scope();

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 0 source files, 1 markup file - no issues found

    ----- stderr -----
    warning: 1 file(s) could not be read (use -v for details)
    "#);

    let verbose = run(test.check_command().arg("-v"))?;
    assert_eq!(verbose.code, Some(0));
    assert!(
        verbose
            .stderr
            .contains("warning: skipped ./src/main/java/Broken.fxml: cannot evaluate markup")
    );

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.command().arg("--help"))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("check"));
    assert!(output.stdout.contains("init"));

    Ok(())
}
