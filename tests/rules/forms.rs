//! Shapes of the name argument: which constants are flagged, which are not,
//! and what the fix writes for each.

use anyhow::Result;
use pretty_assertions::assert_eq;
use wpfdiag::harness::{ExpectedDiagnostic, TestCase, Verifier};

use crate::{RULE_ID, expected, message, position_of};

fn register_with(argument: &str) -> String {
    format!(
        r#"using System.Windows;

public class Gauge : DependencyObject
{{
    private const string ValueName = "Value";

    public static readonly DependencyProperty ValueProperty =
        DependencyProperty.Register({}, typeof(double), typeof(Gauge));
}}
"#,
        argument
    )
}

#[test]
fn test_const_field_is_reported_with_folded_value() -> Result<()> {
    let source = register_with("ValueName");
    TestCase::new(&source)
        .expect(expected(&source, "ValueName,", "Value"))
        .fixed(&source.replace("Register(ValueName,", "Register(nameof(Value),"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_qualified_const_field_is_reported() -> Result<()> {
    let source = r#"using System.Windows;

static class Names
{
    public const string Value = "Value";
}

public class Gauge : DependencyObject
{
    static object P = DependencyProperty.Register(Names.Value, typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "Names.Value,", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_verbatim_string_is_reported() -> Result<()> {
    let source = register_with(r#"@"Value""#);
    TestCase::new(&source)
        .expect(expected(&source, "@\"Value\"", "Value"))
        .fixed(&source.replace("@\"Value\"", "nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_raw_string_is_reported() -> Result<()> {
    let source = register_with(r#""""Value""""#);
    TestCase::new(&source)
        .expect(expected(&source, "\"\"\"Value", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_parenthesized_and_concatenated_literals_are_reported() -> Result<()> {
    let source = register_with(r#"("Val" + "ue")"#);
    TestCase::new(&source)
        .expect(expected(&source, "(\"Val\"", "Value"))
        .fixed(&source.replace("(\"Val\" + \"ue\")", "nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_interpolated_string_without_holes_is_reported() -> Result<()> {
    let source = register_with(r#"$"Value""#);
    TestCase::new(&source)
        .expect(expected(&source, "$\"Value\"", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_non_constant_name_is_not_reported() -> Result<()> {
    for argument in [
        "GetName()",
        "$\"{ValueName}\"",
        "nameof(ValueProperty) + \"Suffix\"",
        "name",
    ] {
        let source = register_with(argument);
        TestCase::new(&source).run(&Verifier::new())?;
    }
    Ok(())
}

#[test]
fn test_parenthesized_nameof_is_not_reported() -> Result<()> {
    let source = register_with("(nameof(ValueProperty))");
    TestCase::new(&source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_named_argument_is_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
    static object P = DependencyProperty.Register(
        propertyType: typeof(double),
        name: "Value",
        ownerType: typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .fixed(&source.replace("name: \"Value\"", "name: nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_null_name_falls_back_to_source_text() -> Result<()> {
    let source = register_with("null");
    TestCase::new(&source)
        .expect(expected(&source, "null,", "null"))
        .fixed(&source.replace("Register(null,", "Register(nameof(@null),"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_keyword_name_is_escaped_in_fix() -> Result<()> {
    let source = register_with("\"class\"");
    let fixed = Verifier::new().apply_fixes(&source)?;
    assert!(fixed.contains("Register(nameof(@class), typeof(double)"));
    Ok(())
}

#[test]
fn test_non_identifier_names_are_reported_but_not_fixed() -> Result<()> {
    for (argument, name) in [("\"1st\"", "1st"), ("\"Is Open\"", "Is Open"), ("\"\"", "")] {
        let source = register_with(argument);
        let diagnostics = Verifier::new().diagnostics(&source)?;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, message(name));
        assert_eq!(Verifier::new().apply_fixes(&source)?, source);
    }
    Ok(())
}

#[test]
fn test_pragma_disable_suppresses() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
#pragma warning disable DependencyPropertyWithoutNameOfOperatorAnalyzer
    static object A = DependencyProperty.Register("A", typeof(int), typeof(Gauge));
#pragma warning restore DependencyPropertyWithoutNameOfOperatorAnalyzer
    static object B = DependencyProperty.Register("B", typeof(int), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"B\"", "B"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_pragma_disable_all_suppresses() -> Result<()> {
    let source = r#"#pragma warning disable
using System.Windows;

public class Gauge : DependencyObject
{
    static object A = DependencyProperty.Register("A", typeof(int), typeof(Gauge));
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_pragma_for_other_rule_does_not_suppress() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
#pragma warning disable CS0618
    static object A = DependencyProperty.Register("A", typeof(int), typeof(Gauge));
}
"#;
    let (line, column) = position_of(source, "\"A\"");
    TestCase::new(source)
        .expect(ExpectedDiagnostic::new(RULE_ID).at(line, column))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_syntax_errors_yield_no_diagnostics() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
    static object A = DependencyProperty.Register("A", typeof(int), typeof(Gauge))
    static object B =
}
"#;
    assert_eq!(Verifier::new().diagnostics(source)?, vec![]);
    Ok(())
}

#[test]
fn test_message_uses_exact_format() -> Result<()> {
    let source = register_with("\"IsOpen\"");
    let diagnostics = Verifier::new().diagnostics(&source)?;

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, message("IsOpen"));
    assert_eq!(diagnostics[0].rule_id, RULE_ID);
    Ok(())
}
