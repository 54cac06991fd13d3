use anyhow::Result;

use crate::{CliTest, GAUGE, GAUGE_FIXED, stdout};

#[test]
fn test_fix_dry_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.fix_command().output()?;
    let out = stdout(&output);

    // Pending fixes are reported as a failure.
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("Gauge.cs:8:41"));
    assert!(out.lines().any(|line| {
        line.trim_start().starts_with('-')
            && line.ends_with("DependencyProperty.Register(\"Value\", typeof(double), typeof(Gauge));")
    }));
    assert!(out.lines().any(|line| {
        line.trim_start().starts_with('+')
            && line.ends_with("DependencyProperty.Register(nameof(Value), typeof(double), typeof(Gauge));")
    }));
    assert!(out.contains("Would fix 1 issue(s) in 1 file(s)."));
    assert!(out.contains("Run with --apply to apply these fixes."));
    assert_eq!(test.read_file("Controls/Gauge.cs")?, GAUGE);

    Ok(())
}

#[test]
fn test_fix_apply_rewrites_files() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Fixed 1 issue(s) in 1 file(s)."));
    assert_eq!(test.read_file("Controls/Gauge.cs")?, GAUGE_FIXED);

    Ok(())
}

#[test]
fn test_fix_apply_multiple_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Controls/Gauge.cs", GAUGE)?;
    test.write_file(
        "Controls/Range.cs",
        r#"using System.Windows;

public class Range : DependencyObject
{
    public static readonly DependencyProperty MinimumProperty =
        DependencyProperty.Register("Minimum", typeof(double), typeof(Range));
    public static readonly DependencyProperty MaximumProperty =
        DependencyProperty.Register(@"Maximum", typeof(double), typeof(Range));
}
"#,
    )?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Fixed 3 issue(s) in 2 file(s)."));

    let range = test.read_file("Controls/Range.cs")?;
    assert!(range.contains("Register(nameof(Minimum), typeof(double)"));
    assert!(range.contains("Register(nameof(Maximum), typeof(double)"));
    assert!(!range.contains("\"Minimum\""));

    Ok(())
}

#[test]
fn test_fix_apply_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE)?;

    test.fix_command().arg("--apply").output()?;
    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 source file - no issues found"));
    assert_eq!(test.read_file("Controls/Gauge.cs")?, GAUGE_FIXED);

    // The fixed project passes `check` as well.
    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_fix_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", GAUGE_FIXED)?;

    let output = test.fix_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no issues found"));

    Ok(())
}

#[test]
fn test_fix_skips_unparsable_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("Controls/Gauge.cs", GAUGE)?;
    let broken = "public class Broken {\n    static object P = DependencyProperty.Register(\"P\", typeof(int)\n";
    test.write_file("Controls/Broken.cs", broken)?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("parse-error"));
    assert_eq!(test.read_file("Controls/Gauge.cs")?, GAUGE_FIXED);
    assert_eq!(test.read_file("Controls/Broken.cs")?, broken);

    Ok(())
}

const ODD_NAMES: &str = r#"using System.Windows;

public class Gauge : DependencyObject
{
    public static readonly DependencyProperty FirstProperty =
        DependencyProperty.Register("1st", typeof(double), typeof(Gauge));
    public static readonly DependencyProperty ValueProperty =
        DependencyProperty.Register("Value", typeof(double), typeof(Gauge));
}
"#;

#[test]
fn test_fix_dry_run_marks_non_identifier_names() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", ODD_NAMES)?;

    let output = test.fix_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("no automatic fix: \"1st\" is not a valid identifier"));
    assert!(!out.contains("nameof(1st)"));
    assert!(out.contains("Would fix 1 issue(s) in 1 file(s)."));

    Ok(())
}

#[test]
fn test_fix_apply_skips_non_identifier_names() -> Result<()> {
    let test = CliTest::with_file("Controls/Gauge.cs", ODD_NAMES)?;

    let output = test.fix_command().arg("--apply").output()?;

    // The unfixable diagnostic is still outstanding.
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Fixed 1 issue(s) in 1 file(s)."));
    assert_eq!(
        test.read_file("Controls/Gauge.cs")?,
        ODD_NAMES.replace("Register(\"Value\",", "Register(nameof(Value),")
    );

    Ok(())
}
