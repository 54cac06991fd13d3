use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, GAUGE, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "includes",
        "ignores",
        "ignoreGeneratedFiles",
        "references",
        "disabledRules",
    ] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["ignoreGeneratedFiles"], Value::Bool(true));
    assert!(
        parsed["references"]
            .as_array()
            .is_some_and(|refs| refs.iter().any(|r| r == "WindowsBase"))
    );

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .wpfdiagrc.json"));
    assert!(test.root().join(".wpfdiagrc.json").exists());

    let content = test.read_file(".wpfdiagrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".wpfdiagrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".wpfdiagrc.json already exists"));
    assert_eq!(test.read_file(".wpfdiagrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.check_command().output()?;
    assert_eq!(
        output.status.code(),
        Some(1),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("Gauge.cs:8:41"));

    Ok(())
}
