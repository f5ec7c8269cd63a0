//! Unit tests for the diagnostics pass.

use super::checker::{check, Diagnostic, Severity};
use crate::compile;

fn check_source(source: &str) -> Vec<Diagnostic> {
    check(&compile(source).unwrap(), source)
}

#[test]
fn test_clean_unit_has_no_diagnostics() {
    let diagnostics = check_source(
        "abstract class Shape { public abstract double Area(); public string Name { get; set; } }
         class Square : Shape { double side; public Square(double s) { side = s; } public override double Area() { return side * side; } }
         static class Util { static int Count; public static void Log(string s) {} public static void Log(string s, int level) {} }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_duplicate_class() {
    let diagnostics = check_source("class A {}\nclass B {}\nclass A {}");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message, "class `A` is already declared");
    assert_eq!(diagnostics[0].span.start.line, 3);
    assert_eq!(diagnostics[0].span.start.column, 7);
}

#[test]
fn test_duplicate_methods() {
    let diagnostics = check_source("public class X { public void A() {} public void A() {} }");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert_eq!(diagnostics[0].message, "`X.A` is already declared");
    assert_eq!(diagnostics[0].span.start.column, 49);
}

#[test]
fn test_overloads_are_keyed_by_arity() {
    let diagnostics = check_source("class X { void A() {} void A(int a) {} void A(string b) {} }");

    // Same arity clashes even when the parameter types differ
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "`X.A` is already declared");
}

#[test]
fn test_field_and_property_name_clashes() {
    let diagnostics = check_source(
        "class X { int Count; int Count { get; set; } void Size() {} string Size; }",
    );

    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["`X.Count` is already declared", "`X.Size` is already declared"]);
}

#[test]
fn test_method_after_field_clashes() {
    let diagnostics = check_source("class X { int Run; void Run() {} }");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_extra_constructors_warn() {
    let diagnostics = check_source(
        "class P { public P() {} public P(int a) {} public P(int a, int b) {} static P() {} }",
    );

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(
        diagnostics[0].message,
        "`P` declares more than one constructor; only the first is generated"
    );
}

#[test]
fn test_base_initializer_without_base_class() {
    let diagnostics = check_source("class S {\n    public S(int a) : base(a) {}\n}");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        diagnostics[0].message,
        "`S` has no base class; the `base(...)` call is dropped"
    );
    assert_eq!(diagnostics[0].span.start.line, 2);
    assert_eq!(diagnostics[0].span.start.column, 23);

    let derived = check_source("class D : S { public D(int a) : base(a) {} }");
    assert!(derived.is_empty(), "{:?}", derived);
}

#[test]
fn test_abstract_method_in_concrete_class() {
    let diagnostics = check_source("class Shape { public abstract double Area(); }");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "abstract method `Shape.Area` in a class that is not abstract"
    );
}

#[test]
fn test_instance_member_in_static_class() {
    let diagnostics = check_source("static class Util { int count; static void Ok() {} void Bad() {} }");

    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "static class `Util` cannot declare instance member `count`",
            "static class `Util` cannot declare instance member `Bad`",
        ]
    );
}

#[test]
fn test_render_diagnostic() {
    let source = "class P {\n    public P() {}\n    public P(int a) {}\n}";
    let diagnostics = check_source(source);

    let rendered = diagnostics[0].render(source, "P.cs");
    assert_eq!(
        rendered,
        "Warning: `P` declares more than one constructor; only the first is generated\n\
         -> P.cs:3:12\n  |\n3 | public P(int a) {}\n  | -------^\n"
    );
}
