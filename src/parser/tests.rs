//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Using directives, namespaces and class headers
//! - Fields, properties, methods and constructors
//! - Expressions and precedence
//! - Interop and DOM forms
//! - Control flow placeholders and error reporting

use super::parser::{parse, MAX_NESTING_DEPTH};
use crate::{
    ast::{
        ast::{ExprType, Expression, Statement, StmtType},
        declarations::{Accessibility, CompilationUnit, InitializerTarget, Member, MemberType},
        expressions::{BinaryOperator, LiteralValue, UnaryOperator},
        statements::UnsupportedConstruct,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<CompilationUnit, Error> {
    parse(tokenize(source).unwrap())
}

/// Parses `body` as the statements of a single method and returns them.
fn parse_body(body: &str) -> Vec<Statement> {
    let source = format!("class T {{ void M() {{ {} }} }}", body);
    let unit = parse_source(&source).unwrap();

    match &unit.classes[0].members[0] {
        Member::Method(method) => method.body.clone().unwrap().body,
        other => panic!("expected method, got {:?}", other),
    }
}

/// Parses `expr` as the value of a return statement.
fn parse_expression(expr: &str) -> Expression {
    match parse_body(&format!("return {};", expr)).remove(0) {
        Statement::Return(ret) => ret.value.unwrap(),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let unit = parse_source("").unwrap();
    assert!(unit.imports.is_empty());
    assert!(unit.classes.is_empty());
}

#[test]
fn test_parse_using_directives() {
    let unit = parse_source("using System; using System.Collections.Generic;").unwrap();
    assert_eq!(unit.imports, vec!["System", "System.Collections.Generic"]);
}

#[test]
fn test_parse_hello_app() {
    let source =
        r#"public class App { public static void Main() { Console.WriteLine("Hello"); } }"#;
    let unit = parse_source(source).unwrap();

    assert_eq!(unit.classes.len(), 1);
    let class = &unit.classes[0];
    assert_eq!(class.name, "App");
    assert_eq!(class.accessibility, Accessibility::Public);

    let method = class.methods().next().unwrap();
    assert_eq!(method.name, "Main");
    assert!(method.is_static);
    assert!(method.return_type.is_void());

    let body = method.body.as_ref().unwrap();
    assert_eq!(body.body.len(), 1);
    assert_eq!(body.body[0].get_stmt_type(), StmtType::ExpressionStmt);
}

#[test]
fn test_parse_namespaces_are_flattened() {
    let block = parse_source("namespace Demo.App { class A {} class B {} }").unwrap();
    assert_eq!(block.namespace.as_deref(), Some("Demo.App"));
    assert_eq!(block.classes.len(), 2);

    let file_scoped = parse_source("namespace Demo; using System; class A {}").unwrap();
    assert_eq!(file_scoped.namespace.as_deref(), Some("Demo"));
    assert_eq!(file_scoped.imports, vec!["System"]);
    assert_eq!(file_scoped.classes.len(), 1);
}

#[test]
fn test_single_base_name_is_base_class() {
    let unit = parse_source("class Dog : Animal {}").unwrap();
    assert_eq!(unit.classes[0].base_class.as_deref(), Some("Animal"));
    assert!(unit.classes[0].interfaces.is_empty());
}

#[test]
fn test_single_interface_is_treated_as_base_class() {
    // A lone interface cannot be told apart from a base class
    let unit = parse_source("class Repo : IDisposable {}").unwrap();
    assert_eq!(unit.classes[0].base_class.as_deref(), Some("IDisposable"));
    assert!(unit.classes[0].interfaces.is_empty());
}

#[test]
fn test_multiple_base_names_are_interfaces() {
    let unit = parse_source("class Dog : Animal, IPet {}").unwrap();
    assert_eq!(unit.classes[0].base_class, None);
    assert_eq!(unit.classes[0].interfaces, vec!["Animal", "IPet"]);
}

#[test]
fn test_class_modifiers() {
    let unit = parse_source("public static class Util {} abstract class Shape {} sealed class Leaf {}")
        .unwrap();

    assert!(unit.classes[0].is_static);
    assert!(unit.classes[1].is_abstract);
    assert_eq!(unit.classes[1].accessibility, Accessibility::Internal);
    assert!(unit.classes[2].is_sealed);
}

#[test]
fn test_parse_fields() {
    let unit = parse_source(
        "class C { private int count; public static string Name = \"x\"; const double Pi = 3.14; }",
    )
    .unwrap();
    let fields: Vec<_> = unit.classes[0].fields().collect();

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, "count");
    assert_eq!(fields[0].accessibility, Accessibility::Private);
    assert!(fields[0].initializer.is_none());

    assert!(fields[1].is_static);
    assert_eq!(fields[1].field_type.name, "string");
    assert!(fields[1].initializer.is_some());

    assert!(fields[2].is_const);
}

#[test]
fn test_parse_auto_property() {
    let unit = parse_source("class C { public string Name { get; set; } }").unwrap();
    let property = unit.classes[0].properties().next().unwrap();

    assert_eq!(property.name, "Name");
    assert!(property.has_getter);
    assert!(property.has_setter);
    assert!(property.initializer.is_none());
}

#[test]
fn test_parse_property_variants() {
    let unit = parse_source(
        "class C {
            public int Count { get; private set; } = 5;
            public int Total { get { return 1; } set { var x = { }; } }
            public int Half { get => 2; }
        }",
    );

    // Block accessor bodies are skipped as balanced text, even when they
    // would not parse as statements.
    let unit = unit.unwrap();
    let properties: Vec<_> = unit.classes[0].properties().collect();

    assert_eq!(properties.len(), 3);
    assert!(properties[0].has_setter);
    assert!(matches!(
        properties[0].initializer,
        Some(Expression::Literal(_))
    ));
    assert!(properties[1].has_getter && properties[1].has_setter);
    assert!(properties[2].has_getter && !properties[2].has_setter);
}

#[test]
fn test_parse_method_parameters() {
    let unit =
        parse_source("class C { public int Add(int a, int b = 2) { return a + b; } }").unwrap();
    let method = unit.classes[0].methods().next().unwrap();

    assert_eq!(method.parameters.len(), 2);
    assert_eq!(method.parameters[0].name, "a");
    assert_eq!(method.parameters[0].param_type.name, "int");
    assert!(method.parameters[1].default_value.is_some());
}

#[test]
fn test_parse_abstract_and_expression_bodied_methods() {
    let unit = parse_source(
        "abstract class Shape { public abstract double Area(); public int Two() => 2; }",
    )
    .unwrap();
    let methods: Vec<_> = unit.classes[0].methods().collect();

    assert!(methods[0].is_abstract);
    assert!(methods[0].body.is_none());

    let body = methods[1].body.as_ref().unwrap();
    assert_eq!(body.body[0].get_stmt_type(), StmtType::ReturnStmt);
}

#[test]
fn test_parse_constructor_with_base_initializer() {
    let unit = parse_source(
        "class Dog : Animal { public Dog(string name) : base(name) { Sound = \"woof\"; } }",
    )
    .unwrap();
    let constructor = unit.classes[0].constructors().next().unwrap();

    assert_eq!(constructor.name, "Dog");
    assert_eq!(constructor.parameters.len(), 1);

    let initializer = constructor.initializer.as_ref().unwrap();
    assert_eq!(initializer.target, InitializerTarget::Base);
    assert_eq!(initializer.arguments.len(), 1);
    assert_eq!(constructor.body.body.len(), 1);
}

#[test]
fn test_parse_generic_and_array_types() {
    let unit = parse_source(
        "class C { List<Dictionary<string, int>> items; string[] names; int? maybe; }",
    )
    .unwrap();
    let fields: Vec<_> = unit.classes[0].fields().collect();

    assert_eq!(fields[0].field_type.name, "List");
    assert_eq!(fields[0].field_type.generic_args[0].generic_args.len(), 2);
    assert_eq!(fields[0].field_type.to_string(), "List<Dictionary<string, int>>");
    assert!(fields[1].field_type.is_array);
    assert!(fields[2].field_type.nullable);
}

#[test]
fn test_members_in_declaration_order() {
    let unit = parse_source(
        "class C { int a; C() {} void M() {} string P { get; set; } }",
    )
    .unwrap();
    let kinds: Vec<_> = unit.classes[0]
        .members
        .iter()
        .map(|member| member.get_member_type())
        .collect();

    assert_eq!(
        kinds,
        vec![
            MemberType::Field,
            MemberType::Constructor,
            MemberType::Method,
            MemberType::Property
        ]
    );
}

#[test]
fn test_duplicate_members_are_kept() {
    let unit = parse_source("public class X { public void A() {} public void A() {} }").unwrap();
    assert_eq!(unit.classes[0].methods().count(), 2);
}

#[test]
fn test_parse_local_declarations() {
    let body = parse_body("int x = 1; var y = x; List<int> z; string[] w = null;");
    assert_eq!(body.len(), 4);

    for stmt in &body {
        assert_eq!(stmt.get_stmt_type(), StmtType::VarDeclStmt);
    }

    match &body[2] {
        Statement::VariableDecl(decl) => {
            assert_eq!(decl.identifier, "z");
            assert!(decl.assigned_value.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_binary_precedence() {
    // 5 + 3 * 2 => 5 + (3 * 2)
    match parse_expression("5 + 3 * 2") {
        Expression::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Add);
            match *binary.right {
                Expression::Binary(right) => assert_eq!(right.operator, BinaryOperator::Multiply),
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    match parse_expression("(5 + 3) * 2") {
        Expression::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Multiply);
            assert_eq!(binary.left.get_expr_type(), ExprType::Binary);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_logical_precedence() {
    // a || b && c == d => a || (b && (c == d))
    match parse_expression("a || b && c == d") {
        Expression::Binary(or) => {
            assert_eq!(or.operator, BinaryOperator::Or);
            match *or.right {
                Expression::Binary(and) => {
                    assert_eq!(and.operator, BinaryOperator::And);
                    assert!(matches!(
                        *and.right,
                        Expression::Binary(ref eq) if eq.operator == BinaryOperator::Equal
                    ));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    // a - b - c => (a - b) - c
    match parse_expression("a - b - c") {
        Expression::Binary(binary) => {
            assert_eq!(binary.left.get_expr_type(), ExprType::Binary);
            assert_eq!(binary.right.get_expr_type(), ExprType::Identifier);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    let body = parse_body("a = b = 3;");
    let Statement::Expression(stmt) = &body[0] else {
        panic!("expected expression statement");
    };

    match &stmt.expression {
        Expression::Assignment(outer) => {
            assert_eq!(outer.left.as_identifier(), Some("a"));
            assert_eq!(outer.right.get_expr_type(), ExprType::Assignment);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    match parse_expression("-a * b") {
        Expression::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Multiply);
            assert!(matches!(
                *binary.left,
                Expression::Unary(ref unary) if unary.operator == UnaryOperator::Negate
            ));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(parse_expression("!done").get_expr_type(), ExprType::Unary);
}

#[test]
fn test_coalesce_is_right_associative_and_loose() {
    match parse_expression("a ?? b ?? c || d") {
        Expression::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Coalesce);
            assert_eq!(binary.left.as_identifier(), Some("a"));
            assert!(matches!(
                *binary.right,
                Expression::Binary(ref inner) if inner.operator == BinaryOperator::Coalesce
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_literals() {
    let literal = |expr: Expression| match expr {
        Expression::Literal(literal) => literal.value,
        other => panic!("unexpected {:?}", other),
    };

    assert_eq!(literal(parse_expression("42")), LiteralValue::Number(42.0));
    assert_eq!(literal(parse_expression("3.5")), LiteralValue::Number(3.5));
    assert_eq!(
        literal(parse_expression(r#""a\"b\n""#)),
        LiteralValue::String(String::from("a\"b\n"))
    );
    assert_eq!(
        literal(parse_expression("'x'")),
        LiteralValue::String(String::from("x"))
    );
    assert_eq!(literal(parse_expression("true")), LiteralValue::Boolean(true));
    assert_eq!(literal(parse_expression("null")), LiteralValue::Null);
}

#[test]
fn test_call_and_member_chain() {
    match parse_expression("a.b(1, 2).c[0]") {
        Expression::MemberAccess(index) => {
            assert!(index.computed);
            match *index.object {
                Expression::MemberAccess(member) => {
                    assert_eq!(member.property_name(), Some("c"));
                    match *member.object {
                        Expression::Call(call) => {
                            assert_eq!(call.arguments.len(), 2);
                            assert_eq!(call.callee.get_expr_type(), ExprType::MemberAccess);
                        }
                        other => panic!("unexpected {:?}", other),
                    }
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_this_base_and_postfix_update() {
    assert_eq!(parse_expression("this.x").get_expr_type(), ExprType::MemberAccess);

    let body = parse_body("base.Speak(); count++; i--;");
    let Statement::Expression(call) = &body[0] else {
        panic!("expected expression statement");
    };
    match &call.expression {
        Expression::Call(call) => match call.callee.as_ref() {
            Expression::MemberAccess(member) => {
                assert_eq!(member.object.get_expr_type(), ExprType::Base)
            }
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }

    for stmt in &body[1..] {
        let Statement::Expression(stmt) = stmt else {
            panic!("expected expression statement");
        };
        assert_eq!(stmt.expression.get_expr_type(), ExprType::Update);
    }
}

#[test]
fn test_object_creation() {
    match parse_expression("new List<int>(10)") {
        Expression::ObjectCreation(creation) => {
            assert_eq!(creation.type_name.name, "List");
            assert_eq!(creation.arguments.len(), 1);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_host_call() {
    match parse_expression(r#"JS.Call("document.createElement", "button")"#) {
        Expression::HostCall(call) => {
            assert_eq!(call.path, "document.createElement");
            assert_eq!(call.arguments.len(), 1);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_host_call_requires_string_path() {
    let error = parse_source("class T { void M() { JS.Call(path, 1); } }").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::HostCallPathNotString {
            token: String::from("path")
        }
    );
    assert_eq!(error.get_token().unwrap().value, "path");
}

#[test]
fn test_host_set() {
    let body = parse_body(r#"JS.Set(el, "id", "main");"#);
    let Statement::Expression(stmt) = &body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(stmt.expression.get_expr_type(), ExprType::HostPropertySet);

    let error = parse_source("class T { void M() { JS.Set(el, 1); } }").unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::HostSetArity { received: 2 });
}

#[test]
fn test_dom_construct() {
    match parse_expression("new HTMLButtonElement()") {
        Expression::DomConstruct(construct) => {
            assert_eq!(construct.element_name, "HTMLButtonElement");
            assert!(construct.arguments.is_empty());
        }
        other => panic!("unexpected {:?}", other),
    }

    // Unrecognized names are ordinary object creation
    assert_eq!(
        parse_expression("new HTMLMarqueeElement()").get_expr_type(),
        ExprType::ObjectCreation
    );
}

#[test]
fn test_dom_typed_locals() {
    let body = parse_body(
        "var button = new HTMLButtonElement(); button.TextContent = \"Go\"; button.Focus(); other.Focus();",
    );

    let expr = |index: usize| match &body[index] {
        Statement::Expression(stmt) => stmt.expression.clone(),
        other => panic!("unexpected {:?}", other),
    };

    match expr(1) {
        Expression::Assignment(assignment) => match *assignment.left {
            Expression::DomPropertyAccess(access) => assert_eq!(access.property, "TextContent"),
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }

    match expr(2) {
        Expression::DomMethodCall(call) => {
            assert_eq!(call.method, "Focus");
            assert_eq!(call.object.as_identifier(), Some("button"));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(expr(3).get_expr_type(), ExprType::Call);
}

#[test]
fn test_dom_typed_fields_and_parameters() {
    let unit = parse_source(
        "class View {
            HTMLDivElement root = new HTMLDivElement();
            HTMLElement Build() { return root; }
            void Attach(HTMLElement child) { this.root.AppendChild(child); child.Remove(); }
            void Other() { child.Remove(); Build.Remove(); }
        }",
    )
    .unwrap();
    let methods: Vec<_> = unit.classes[0].methods().collect();

    let exprs = |index: usize| -> Vec<Expression> {
        methods[index]
            .body
            .as_ref()
            .unwrap()
            .iter()
            .map(|stmt| match stmt {
                Statement::Expression(stmt) => stmt.expression.clone(),
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    };

    let attach = exprs(1);
    assert_eq!(attach[0].get_expr_type(), ExprType::DomMethodCall);
    assert_eq!(attach[1].get_expr_type(), ExprType::DomMethodCall);

    // Parameters do not leak into other members, and methods are not DOM values
    let other = exprs(2);
    assert_eq!(other[0].get_expr_type(), ExprType::Call);
    assert_eq!(other[1].get_expr_type(), ExprType::Call);
}

#[test]
fn test_plain_locals_hide_dom_members() {
    let unit = parse_source(
        "class A {
            HTMLButtonElement btn;
            void F(string btn) { btn.Trim(); this.btn.Focus(); }
            void G() { var btn = \"x\"; btn.Trim(); }
            void H() { btn.Focus(); }
        }",
    )
    .unwrap();
    let methods: Vec<_> = unit.classes[0].methods().collect();

    let exprs = |index: usize| -> Vec<ExprType> {
        methods[index]
            .body
            .as_ref()
            .unwrap()
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Expression(stmt) => Some(stmt.expression.get_expr_type()),
                _ => None,
            })
            .collect()
    };

    assert_eq!(exprs(0), vec![ExprType::Call, ExprType::DomMethodCall]);
    assert_eq!(exprs(1), vec![ExprType::Call]);
    // The shadowing local is forgotten once its member ends
    assert_eq!(exprs(2), vec![ExprType::DomMethodCall]);
}

#[test]
fn test_control_flow_is_parsed_then_replaced() {
    let body = parse_body(
        "if (a > 1) { x = 1; } else x = 2; while (x < 10) x++; for (int i = 0; i < 3; i++) { } for (;;) { }",
    );

    let constructs: Vec<_> = body
        .iter()
        .map(|stmt| match stmt {
            Statement::Unsupported(stmt) => stmt.construct,
            other => panic!("unexpected {:?}", other),
        })
        .collect();

    assert_eq!(
        constructs,
        vec![
            UnsupportedConstruct::If,
            UnsupportedConstruct::While,
            UnsupportedConstruct::For,
            UnsupportedConstruct::For
        ]
    );
}

#[test]
fn test_control_flow_must_be_well_formed() {
    assert!(parse_source("class T { void M() { if (a > 1 { } } }").is_err());
    assert!(parse_source("class T { void M() { while (true) } }").is_err());
}

#[test]
fn test_nested_blocks() {
    let body = parse_body("{ int x = 10; { int y = 20; } }");
    match &body[0] {
        Statement::Block(block) => {
            assert_eq!(block.body.len(), 2);
            assert_eq!(block.body[1].get_stmt_type(), StmtType::BlockStmt);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_syntax_error_missing_semicolon() {
    let error = parse_source("class T { void M() { int x = 42 } }").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("}"),
            expected: String::from("`;`")
        }
    );
    assert_eq!((error.line(), error.column()), (1, 33));
}

#[test]
fn test_syntax_error_at_end_of_input() {
    let error = parse_source("class T { void M() {").unwrap_err();
    assert_eq!(error.get_token().unwrap().value, "EOF");
    assert!(error.message().contains("end of input"));
}

#[test]
fn test_unknown_character_is_rejected_by_parser() {
    let error = parse_source("class T { int x = 1 # 2; }").unwrap_err();
    assert_eq!(error.get_token().unwrap().value, "#");
}

#[test]
fn test_invalid_member_tail() {
    let error = parse_source("class T { int x + }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_invalid_assignment_target() {
    assert!(parse_source("class T { void M() { 1 = 2; } }").is_err());
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH + 10;
    let source = format!(
        "class T {{ int x = {}1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );

    let error = parse_source(&source).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );

    let shallow = format!("class T {{ int x = {}1{}; }}", "(".repeat(50), ")".repeat(50));
    assert!(parse_source(&shallow).is_ok());
}

#[test]
fn test_operator_chains_count_towards_nesting_limit() {
    let terms = 20_000;
    let chains = [
        vec!["1"; terms].join(" + "),
        vec!["a"; terms].join("."),
        format!("f{}", "()".repeat(terms)),
        format!("x{}", "[0]".repeat(terms)),
    ];

    for chain in chains {
        let source = format!("class T {{ int F() {{ return {}; }} }}", chain);
        let error = parse_source(&source).unwrap_err();
        assert_eq!(
            error.get_impl(),
            &ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );
    }

    let short = vec!["1"; 100].join(" + ");
    let sum = parse_expression(&short);
    assert_eq!(sum.get_expr_type(), ExprType::Binary);
}

#[test]
fn test_spans_cover_declarations() {
    let source = "class A {\n    int x = 1;\n}";
    let unit = parse_source(source).unwrap();
    let field = unit.classes[0].fields().next().unwrap();

    assert_eq!(field.span.start.line, 2);
    assert_eq!(field.span.start.column, 5);
    assert_eq!(field.span.end.column, 15);
    assert_eq!(unit.classes[0].span.end.line, 3);
}
