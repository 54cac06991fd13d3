//! Call sites are matched by the symbol they bind to, not by their text.

use anyhow::Result;
use wpfdiag::harness::{TestCase, Verifier};

use crate::expected;

#[test]
fn test_user_defined_look_alike_is_not_reported() -> Result<()> {
    let source = r#"using System;
using System.Windows;

namespace MyApp
{
    public static class DependencyProperty
    {
        public static object Register(string name, Type propertyType, Type ownerType) => null;
    }

    public class Widget
    {
        static object P = DependencyProperty.Register("Value", typeof(int), typeof(Widget));
    }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_unrelated_register_method_is_not_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Registry
{
    public static void Register(string name, object a, object b) { }

    public void Setup()
    {
        Register("Value", typeof(int), typeof(Registry));
    }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_fully_qualified_call_is_reported() -> Result<()> {
    let source = r#"public class Gauge : System.Windows.DependencyObject
{
    public static readonly System.Windows.DependencyProperty ValueProperty =
        System.Windows.DependencyProperty.Register("Value", typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .fixed(&source.replace("\"Value\"", "nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_global_qualified_call_is_reported() -> Result<()> {
    let source = r#"public class Gauge
{
    static object P = global::System.Windows.DependencyProperty.Register("Value", typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_aliased_type_is_reported() -> Result<()> {
    let source = r#"using DP = System.Windows.DependencyProperty;

public class Gauge
{
    static object P = DP.Register("Value", typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .fixed(&source.replace("\"Value\"", "nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_using_static_is_reported() -> Result<()> {
    let source = r#"using static System.Windows.DependencyProperty;

public class Gauge
{
    static object P = Register("Value", typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .fixed(&source.replace("\"Value\"", "nameof(Value)"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_using_inside_namespace_is_reported() -> Result<()> {
    let source = r#"namespace Controls
{
    using System.Windows;

    public class Gauge
    {
        static object P = DependencyProperty.Register("Value", typeof(double), typeof(Gauge));
    }
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_file_scoped_namespace_is_reported() -> Result<()> {
    let source = r#"using System.Windows;

namespace Controls;

public class Gauge : DependencyObject
{
    public static readonly DependencyProperty ValueProperty =
        DependencyProperty.Register("Value", typeof(double), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"Value\"", "Value"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_every_register_overload_is_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
    static object A = DependencyProperty.Register("A", typeof(int), typeof(Gauge));
    static object B = DependencyProperty.Register("B", typeof(int), typeof(Gauge), new PropertyMetadata(0));
    static object C = DependencyProperty.Register("C", typeof(int), typeof(Gauge), new PropertyMetadata(0), null);
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"A\"", "A"))
        .expect(expected(source, "\"B\"", "B"))
        .expect(expected(source, "\"C\"", "C"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_other_registration_methods_are_not_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Panel : DependencyObject
{
    static object A = DependencyProperty.RegisterAttached("Dock", typeof(int), typeof(Panel));
    static object K = DependencyProperty.RegisterReadOnly("Count", typeof(int), typeof(Panel), null);
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

const REGISTRAR: &str = r#"
public class Registrar
{
    public object Register(string name, object propertyType, object ownerType) => null;
}
"#;

#[test]
fn test_field_named_like_the_type_hides_it() -> Result<()> {
    let source = format!(
        r#"using System.Windows;
{REGISTRAR}
public class Widget
{{
    static readonly Registrar DependencyProperty = new Registrar();
    static object P = DependencyProperty.Register("P", null, null);
}}
"#
    );
    TestCase::new(&source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_property_of_unknown_type_hides_the_type() -> Result<()> {
    let source = r#"using System.Windows;

public class Widget
{
    static Unknown DependencyProperty { get; }
    static object P = DependencyProperty.Register("P", null, null);
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_local_and_parameter_named_like_the_type_hide_it() -> Result<()> {
    let source = format!(
        r#"using System.Windows;
{REGISTRAR}
public class Widget
{{
    void WithParameter(Registrar DependencyProperty)
    {{
        DependencyProperty.Register("P", null, null);
    }}

    void WithLocal()
    {{
        var DependencyProperty = new Registrar();
        DependencyProperty.Register("Q", null, null);
    }}
}}
"#
    );
    TestCase::new(&source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_inherited_field_named_like_the_type_hides_it() -> Result<()> {
    let source = format!(
        r#"using System.Windows;
{REGISTRAR}
public class Base
{{
    protected static readonly Registrar DependencyProperty = new Registrar();
}}

public class Widget : Base
{{
    static object P = DependencyProperty.Register("P", null, null);
}}
"#
    );
    TestCase::new(&source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_member_typed_as_the_type_it_names_is_still_reported() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
    static readonly DependencyProperty DependencyProperty = null;
    static object P = DependencyProperty.Register("P", typeof(int), typeof(Gauge));
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"P\"", "P"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_inherited_register_shadows_static_import() -> Result<()> {
    let source = r#"using static System.Windows.DependencyProperty;

public class Base
{
    protected static object Register(string name, object propertyType, object ownerType) => null;
}

public class Widget : Base
{
    static object P = Register("P", null, null);

    void Setup()
    {
        Register("Q", null, null);
    }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_local_function_shadows_static_import() -> Result<()> {
    let source = r#"using static System.Windows.DependencyProperty;

public class Widget
{
    void Setup()
    {
        Register("P", null, null);

        object Register(string name, object propertyType, object ownerType) => null;
    }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_static_import_still_binds_without_shadowing() -> Result<()> {
    let source = r#"using static System.Windows.DependencyProperty;

public class Widget : System.Windows.DependencyObject
{
    void Setup()
    {
        Register("P", typeof(int), typeof(Widget));
    }
}
"#;
    TestCase::new(source)
        .expect(expected(source, "\"P\"", "P"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_const_local_and_inherited_const_are_folded() -> Result<()> {
    let source = r#"using System.Windows;

public class Base : DependencyObject
{
    protected const string Inherited = "I";
}

public class Gauge : Base
{
    static object P = DependencyProperty.Register(Inherited, typeof(int), typeof(Gauge));

    static void Setup()
    {
        const string local = "L";
        DependencyProperty.Register(local, typeof(int), typeof(Gauge));
    }
}
"#;
    TestCase::new(source)
        .expect(expected(source, "Inherited,", "I"))
        .expect(expected(source, "local,", "L"))
        .run(&Verifier::new())?;
    Ok(())
}

#[test]
fn test_non_const_local_hides_const_field() -> Result<()> {
    let source = r#"using System.Windows;

public class Gauge : DependencyObject
{
    const string Name = "Field";

    static void Setup()
    {
        string Name = "Local";
        DependencyProperty.Register(Name, typeof(int), typeof(Gauge));
    }
}
"#;
    TestCase::new(source).run(&Verifier::new())?;
    Ok(())
}
