use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, GAUGE, GAUGE_FIXED, stderr, stdout};

const RULE_ID: &str = "DependencyPropertyWithoutNameOfOperatorAnalyzer";

#[test]
fn test_reports_string_name() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains(&format!(
        "warning: Dependency property 'Value' can use nameof() operator for DependencyProperty.Register() call  {}",
        RULE_ID
    )));
    assert!(out.contains("Gauge.cs:8:41"));
    assert!(out.contains("= hint: replace with `nameof(Value)`"));
    assert!(out.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE_FIXED)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 source file - no issues found"));

    Ok(())
}

#[test]
fn test_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 0 source files - no issues found"));

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.check_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let parsed: Value = serde_json::from_slice(&output.stdout)?;
    let entries = parsed.as_array().expect("JSON output should be an array");
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry["ruleId"], RULE_ID);
    assert_eq!(entry["severity"], "warning");
    assert_eq!(entry["line"], 8);
    assert_eq!(entry["column"], 41);
    assert_eq!(entry["memberName"], "Value");
    assert_eq!(entry["fix"]["replacement"], "nameof(Value)");
    assert!(entry["filePath"].as_str().unwrap().ends_with("Gauge.cs"));

    Ok(())
}

#[test]
fn test_json_format_clean_project_is_empty_array() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE_FIXED)?;

    let output = test.check_command().args(["--format", "json"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    let parsed: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed, Value::Array(vec![]));

    Ok(())
}

#[test]
fn test_syntax_error_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Controls/Gauge.cs", GAUGE)?;
    test.write_file("Controls/Broken.cs", "public class Broken {\n    void M( {\n")?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(out.contains("Broken.cs"));
    assert!(out.contains("parse-error"));
    assert!(out.contains("Gauge.cs:8:41"));
    assert!(stderr(&output).contains("1 file(s) could not be analyzed"));

    Ok(())
}

#[test]
fn test_disable_flag() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.check_command().args(["--disable", RULE_ID]).output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_disable_unknown_rule_fails() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test
        .check_command()
        .args(["--disable", "NoSuchRule"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown rule"));

    Ok(())
}

#[test]
fn test_config_disabled_rules() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;
    test.write_file(
        ".wpfdiagrc.json",
        &format!(r#"{{ "disabledRules": ["{}"] }}"#, RULE_ID),
    )?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".wpfdiagrc.json", r#"{ "ignores": ["**/Legacy/**"] }"#)?;
    test.write_file("Legacy/Gauge.cs", GAUGE)?;
    test.write_file("Controls/Dial.cs", GAUGE_FIXED)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 source file - no issues found"));

    Ok(())
}

#[test]
fn test_generated_files_are_skipped() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("obj/Debug/Gauge.g.cs", GAUGE)?;
    test.write_file("Controls/Gauge.Designer.cs", GAUGE)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_source_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Controls/Gauge.cs", GAUGE)?;
    test.write_file("other/Gauge.cs", GAUGE_FIXED)?;

    let output = test
        .check_command()
        .args(["--source-root", "app"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("1 problem"));

    Ok(())
}

#[test]
fn test_without_windows_base_nothing_is_reported() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test
        .check_command()
        .args(["--reference", "System.Runtime"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_reference_from_json_file() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;
    test.write_file(
        "refs/WindowsBase.json",
        r#"{
  "name": "WindowsBase",
  "types": [
    {
      "namespace": "System.Windows",
      "name": "DependencyProperty",
      "methods": [
        {
          "name": "Register",
          "parameters": [
            { "name": "name", "type": "string" },
            { "name": "propertyType", "type": "System.Type" },
            { "name": "ownerType", "type": "System.Type" }
          ]
        }
      ]
    }
  ]
}"#,
    )?;

    let output = test
        .check_command()
        .args([
            "--reference",
            "System.Runtime",
            "--reference",
            "refs/WindowsBase.json",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Gauge.cs:8:41"));

    Ok(())
}

#[test]
fn test_unknown_reference_fails() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test
        .check_command()
        .args(["--reference", "Missing.dll"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown reference"));

    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;
    test.write_file(".wpfdiagrc.json", "{ not json")?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}

#[test]
fn test_rules_command() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("rules").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(RULE_ID));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let out = stdout(&output);

    assert!(output.status.success());
    for command in ["check", "fix", "init", "rules"] {
        assert!(out.contains(command), "help should list `{}`", command);
    }

    Ok(())
}
