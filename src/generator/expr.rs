use crate::{
    ast::{
        ast::Expression,
        expressions::{BinaryExpr, BinaryOperator, LiteralValue, UnaryOperator},
    },
    dom::dom_member_name,
};

use super::generator::Generator;

/// Precedence of the emitted form of an expression, lowest first. Used to
/// reinsert the parentheses the parser folded away.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
enum Precedence {
    Assignment,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Member,
    Primary,
}

fn binary_precedence(operator: BinaryOperator) -> Precedence {
    match operator {
        BinaryOperator::Coalesce => Precedence::Coalesce,
        BinaryOperator::Or => Precedence::LogicalOr,
        BinaryOperator::And => Precedence::LogicalAnd,
        BinaryOperator::Equal | BinaryOperator::NotEqual => Precedence::Equality,
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => Precedence::Relational,
        BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Additive,
        BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => {
            Precedence::Multiplicative
        }
    }
}

fn precedence(expression: &Expression) -> Precedence {
    match expression {
        Expression::Assignment(_) => Precedence::Assignment,
        Expression::Binary(binary) => binary_precedence(binary.operator),
        Expression::Unary(_) => Precedence::Unary,
        Expression::Update(_) => Precedence::Postfix,
        Expression::Call(_)
        | Expression::MemberAccess(_)
        | Expression::ObjectCreation(_)
        | Expression::HostCall(_)
        | Expression::HostPropertySet(_)
        | Expression::DomConstruct(_)
        | Expression::DomPropertyAccess(_)
        | Expression::DomMethodCall(_) => Precedence::Member,
        Expression::Identifier(_)
        | Expression::Literal(_)
        | Expression::This { .. }
        | Expression::Base { .. } => Precedence::Primary,
    }
}

fn is_logical(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Binary(BinaryExpr {
            operator: BinaryOperator::And | BinaryOperator::Or,
            ..
        })
    )
}

fn parenthesized(text: String, wrap: bool) -> String {
    if wrap {
        format!("({})", text)
    } else {
        text
    }
}

/// Emits `expression` wrapped in parentheses when its precedence is below `min`.
fn gen_operand(generator: &Generator, expression: &Expression, min: Precedence) -> String {
    parenthesized(gen_expression(generator, expression), precedence(expression) < min)
}

/// Emits the object of a member access or call.
fn gen_object(generator: &Generator, expression: &Expression) -> String {
    // `1.toString` would lex as a decimal literal
    let is_number = matches!(
        expression,
        Expression::Literal(literal) if matches!(literal.value, LiteralValue::Number(_))
    );

    parenthesized(
        gen_expression(generator, expression),
        is_number || precedence(expression) < Precedence::Member,
    )
}

fn gen_binary(generator: &Generator, binary: &BinaryExpr) -> String {
    let own = binary_precedence(binary.operator);
    let coalesce = binary.operator == BinaryOperator::Coalesce;

    // `??` is right associative, everything else left associative. The target
    // also rejects `??` mixed with unparenthesized `&&` or `||`.
    let wrap_left = if coalesce {
        precedence(&binary.left) <= own || is_logical(&binary.left)
    } else {
        precedence(&binary.left) < own
    };
    let wrap_right = if coalesce {
        precedence(&binary.right) < own || is_logical(&binary.right)
    } else {
        precedence(&binary.right) <= own
    };

    format!(
        "{} {} {}",
        parenthesized(gen_expression(generator, &binary.left), wrap_left),
        binary.operator.as_str(),
        parenthesized(gen_expression(generator, &binary.right), wrap_right)
    )
}

pub fn gen_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(value) => quote_string(value),
        LiteralValue::Number(value) if value.is_infinite() => String::from("Infinity"),
        LiteralValue::Number(value) => value.to_string(),
        LiteralValue::Boolean(value) => value.to_string(),
        LiteralValue::Null => String::from("null"),
    }
}

/// Renders `value` as a double-quoted string literal.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            ch if ch.is_control() => quoted.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => quoted.push(ch),
        }
    }

    quoted.push('"');
    quoted
}

fn join_arguments(generator: &Generator, leading: &[String], arguments: &[Expression]) -> String {
    leading
        .iter()
        .cloned()
        .chain(arguments.iter().map(|argument| gen_expression(generator, argument)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generates target text for an expression.
pub fn gen_expression(generator: &Generator, expression: &Expression) -> String {
    match expression {
        Expression::Identifier(identifier) => generator.resolve_identifier(&identifier.name),
        Expression::Literal(literal) => gen_literal(&literal.value),
        Expression::Binary(binary) => gen_binary(generator, binary),
        Expression::Unary(unary) => {
            let operand = gen_operand(generator, &unary.operand, Precedence::Unary);
            // `- -a` must not become `--a`
            let operand = match (unary.operator, operand.starts_with('-')) {
                (UnaryOperator::Negate, true) => format!("({})", operand),
                _ => operand,
            };
            format!("{}{}", unary.operator.as_str(), operand)
        }
        Expression::Update(update) => format!(
            "{}{}",
            gen_operand(generator, &update.operand, Precedence::Postfix),
            update.operator.as_str()
        ),
        Expression::Assignment(assignment) => format!(
            "{} {} {}",
            gen_expression(generator, &assignment.left),
            assignment.operator.as_str(),
            gen_expression(generator, &assignment.right)
        ),
        Expression::Call(call) => format!(
            "{}({})",
            gen_object(generator, &call.callee),
            generator.gen_arguments(&call.arguments)
        ),
        Expression::MemberAccess(member) => {
            let object = gen_object(generator, &member.object);
            match (member.computed, member.property_name()) {
                (false, Some(name)) => format!("{}.{}", object, name),
                _ => format!("{}[{}]", object, gen_expression(generator, &member.property)),
            }
        }
        Expression::This { .. } => String::from("this"),
        Expression::Base { .. } => String::from("super"),
        Expression::ObjectCreation(creation) => format!(
            "new {}({})",
            creation.type_name.name,
            generator.gen_arguments(&creation.arguments)
        ),
        Expression::HostCall(call) => format!(
            "__Interop.call({})",
            join_arguments(generator, &[quote_string(&call.path)], &call.arguments)
        ),
        Expression::HostPropertySet(set) => format!(
            "__Interop.set({}, {}, {})",
            gen_expression(generator, &set.object),
            gen_expression(generator, &set.property),
            gen_expression(generator, &set.value)
        ),
        Expression::DomConstruct(construct) => format!(
            "new __Dom.{}({})",
            construct.element_name,
            generator.gen_arguments(&construct.arguments)
        ),
        Expression::DomPropertyAccess(access) => format!(
            "__Dom.unwrap({}).{}",
            gen_expression(generator, &access.object),
            dom_member_name(&access.property)
        ),
        Expression::DomMethodCall(call) => format!(
            "__Dom.invoke({})",
            join_arguments(
                generator,
                &[
                    gen_expression(generator, &call.object),
                    quote_string(&dom_member_name(&call.method)),
                ],
                &call.arguments
            )
        ),
    }
}
