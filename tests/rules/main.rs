use anyhow::Result;
use pretty_assertions::assert_eq;
use wpfdiag::harness::{ExpectedDiagnostic, TestCase, Verifier};
use wpfdiag::semantic::well_known;

mod binding;
mod forms;

pub const RULE_ID: &str = "DependencyPropertyWithoutNameOfOperatorAnalyzer";

/// 1-based line and column of the first occurrence of `needle`.
pub fn position_of(source: &str, needle: &str) -> (usize, usize) {
    let offset = source
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in fixture", needle));
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, source[line_start..offset].chars().count() + 1)
}

pub fn expected(source: &str, needle: &str, name: &str) -> ExpectedDiagnostic {
    let (line, column) = position_of(source, needle);
    ExpectedDiagnostic::new(RULE_ID)
        .at(line, column)
        .with_message(message(name))
}

pub fn message(name: &str) -> String {
    format!(
        "Dependency property '{}' can use nameof() operator for DependencyProperty.Register() call",
        name
    )
}

const GAUGE: &str = r#"using System.Windows;

namespace Controls
{
    public class Gauge : DependencyObject
    {
        public static readonly DependencyProperty ValueProperty =
            DependencyProperty.Register("Value", typeof(double), typeof(Gauge));

        public double Value
        {
            get { return (double)GetValue(ValueProperty); }
            set { SetValue(ValueProperty, value); }
        }
    }
}
"#;

const GAUGE_FIXED: &str = r#"using System.Windows;

namespace Controls
{
    public class Gauge : DependencyObject
    {
        public static readonly DependencyProperty ValueProperty =
            DependencyProperty.Register(nameof(Value), typeof(double), typeof(Gauge));

        public double Value
        {
            get { return (double)GetValue(ValueProperty); }
            set { SetValue(ValueProperty, value); }
        }
    }
}
"#;

#[test]
fn test_empty_source_has_no_diagnostics() -> Result<()> {
    TestCase::new("").run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_string_literal_name_is_reported() -> Result<()> {
    TestCase::new(GAUGE)
        .expect(
            ExpectedDiagnostic::new(RULE_ID)
                .at(8, 41)
                .with_message(message("Value")),
        )
        .fixed(GAUGE_FIXED)
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_nameof_name_is_not_reported() -> Result<()> {
    TestCase::new(GAUGE_FIXED).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_class_without_register_is_not_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Plain : DependencyObject
{
    public string Title { get; set; } = "Value";

    public void Rename(string name) { Title = name; }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_rule_does_not_apply_without_windows_base() -> Result<()> {
    let verifier = Verifier::new().with_references(vec![well_known::system_runtime()]);
    TestCase::new(GAUGE).run(&verifier)?;
    Ok(())
}

#[test]
fn test_fix_is_idempotent() -> Result<()> {
    let verifier = Verifier::new();
    let once = verifier.apply_fixes(GAUGE)?;
    let twice = verifier.apply_fixes(&once)?;

    assert_eq!(once, GAUGE_FIXED);
    assert_eq!(twice, once);
    Ok(())
}

#[test]
fn test_diagnostics_are_deterministic() -> Result<()> {
    let source = r#"using System.Windows;

public class Range : DependencyObject
{
    public static readonly DependencyProperty MinimumProperty =
        DependencyProperty.Register("Minimum", typeof(double), typeof(Range));
    public static readonly DependencyProperty MaximumProperty =
        DependencyProperty.Register("Maximum", typeof(double), typeof(Range));
    public static readonly DependencyProperty StepProperty =
        DependencyProperty.Register("Step", typeof(double), typeof(Range));
}
"#;
    let verifier = Verifier::new();
    let first = verifier.diagnostics(source)?;
    for _ in 0..5 {
        assert_eq!(verifier.diagnostics(source)?, first);
    }

    TestCase::new(source)
        .expect(expected(source, "\"Minimum\"", "Minimum"))
        .expect(expected(source, "\"Maximum\"", "Maximum"))
        .expect(expected(source, "\"Step\"", "Step"))
        .run(&verifier)?;
    Ok(())
}
