use crate::{
    ast::{
        ast::Expression,
        expressions::{
            AssignmentExpr, AssignmentOperator, BinaryExpr, BinaryOperator, CallExpr,
            DomConstructExpr, DomMethodCallExpr, DomPropertyExpr, HostCallExpr,
            HostPropertySetExpr, IdentifierExpr, LiteralExpr, LiteralValue, MemberExpr, NewExpr,
            UnaryExpr, UnaryOperator, UpdateExpr, UpdateOperator,
        },
    },
    dom::is_dom_element,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::unescape,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

/// Name of the reserved object whose `Call`/`Set` members are host interop.
const HOST_OBJECT: &str = "JS";

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    parser.enter()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expression"));
    };

    let mut left = nud_fn(parser)?;
    let mut levels = 1;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(&next_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()) {
        if next_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("operator"));
        };

        // Each LED wraps `left` in one more node, so a flat chain nests as deep
        // as a parenthesized one.
        parser.enter()?;
        levels += 1;

        left = led_fn(parser, left, next_bp)?;
    }

    parser.exit_by(levels);
    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance().clone();
    let span = token.span;

    let literal = |value: LiteralValue| -> Result<Expression, Error> {
        Ok(Expression::Literal(LiteralExpr { value, span }))
    };

    match token.kind {
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(number) => literal(LiteralValue::Number(number)),
            Err(_) => Err(Error::at_token(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                &token,
            )),
        },
        // The target has no char type, so char literals become one-character strings
        TokenKind::String | TokenKind::Char => literal(LiteralValue::String(unescape(&token.value))),
        TokenKind::True => literal(LiteralValue::Boolean(true)),
        TokenKind::False => literal(LiteralValue::Boolean(false)),
        TokenKind::Null => literal(LiteralValue::Null),
        TokenKind::Identifier => Ok(Expression::Identifier(IdentifierExpr {
            name: token.value,
            span,
        })),
        TokenKind::This => Ok(Expression::This { span }),
        TokenKind::Base => Ok(Expression::Base { span }),
        _ => Err(Error::at_token(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
                expected: String::from("expression"),
            },
            &token,
        )),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Dash => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::Equals => BinaryOperator::Equal,
        TokenKind::NotEquals => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEquals => BinaryOperator::LessEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEquals => BinaryOperator::GreaterEqual,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Or => BinaryOperator::Or,
        TokenKind::NullCoalesce => BinaryOperator::Coalesce,
        _ => return None,
    })
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let Some(operator) = binary_operator(parser.current_token_kind()) else {
        return Err(parser.unexpected("binary operator"));
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expression::Binary(BinaryExpr {
        span: Span::new(left.get_span().start, right.get_span().end),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

/// `a ?? b ?? c` groups as `a ?? (b ?? c)`.
pub fn parse_coalesce_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.expect(TokenKind::NullCoalesce)?;
    let right = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expression::Binary(BinaryExpr {
        span: Span::new(left.get_span().start, right.get_span().end),
        left: Box::new(left),
        operator: BinaryOperator::Coalesce,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.advance().clone();
    let operator = match operator_token.kind {
        TokenKind::Not => UnaryOperator::Not,
        _ => UnaryOperator::Negate,
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expression::Unary(UnaryExpr {
        span: Span::new(operator_token.span.start, operand.get_span().end),
        operator,
        operand: Box::new(operand),
    }))
}

fn is_assignable(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Identifier(_) | Expression::MemberAccess(_) | Expression::DomPropertyAccess(_)
    )
}

fn invalid_target(operator_token: &Token) -> Error {
    Error::at_token(
        ErrorImpl::UnexpectedTokenDetailed {
            token: operator_token.to_string(),
            message: String::from("left-hand side is not assignable"),
        },
        operator_token,
    )
}

/// Assignment is right associative: the value is parsed at the lowest binding
/// power so `a = b = c` nests to the right.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let operator_token = parser.advance().clone();
    if !is_assignable(&left) {
        return Err(invalid_target(&operator_token));
    }

    let operator = match operator_token.kind {
        TokenKind::PlusEquals => AssignmentOperator::AddAssign,
        TokenKind::MinusEquals => AssignmentOperator::SubtractAssign,
        TokenKind::StarEquals => AssignmentOperator::MultiplyAssign,
        TokenKind::SlashEquals => AssignmentOperator::DivideAssign,
        _ => AssignmentOperator::Assign,
    };

    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(Expression::Assignment(AssignmentExpr {
        span: Span::new(left.get_span().start, right.get_span().end),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_update_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let operator_token = parser.advance().clone();
    if !is_assignable(&left) {
        return Err(invalid_target(&operator_token));
    }

    let operator = match operator_token.kind {
        TokenKind::MinusMinus => UpdateOperator::Decrement,
        _ => UpdateOperator::Increment,
    };

    Ok(Expression::Update(UpdateExpr {
        span: Span::new(left.get_span().start, operator_token.span.end),
        operator,
        operand: Box::new(left),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `'(' (Expression (',' Expression)*)? ')'`
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expression>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_described(TokenKind::CloseParen, "`,` or `)`")?;

    Ok(args)
}

/// Which reserved host form, if any, a callee names.
fn host_member(callee: &Expression) -> Option<&str> {
    let Expression::MemberAccess(member) = callee else {
        return None;
    };

    match member.object.as_identifier() {
        Some(HOST_OBJECT) => member.property_name(),
        _ => None,
    }
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let open_paren = parser.current_token().clone();
    let first_argument = parser.peek(1).clone();

    let mut arguments = parse_arguments(parser)?;
    let span = parser.span_from(left.get_span().start);

    match host_member(&left) {
        Some("Call") => {
            let path = match arguments.first() {
                Some(Expression::Literal(LiteralExpr {
                    value: LiteralValue::String(path),
                    ..
                })) => path.clone(),
                _ => {
                    return Err(Error::at_token(
                        ErrorImpl::HostCallPathNotString {
                            token: first_argument.to_string(),
                        },
                        &first_argument,
                    ))
                }
            };
            arguments.remove(0);

            return Ok(Expression::HostCall(HostCallExpr {
                path,
                arguments,
                span,
            }));
        }
        Some("Set") => {
            let [object, property, value]: [Expression; 3] =
                arguments.try_into().map_err(|arguments: Vec<Expression>| {
                    Error::at_token(
                        ErrorImpl::HostSetArity {
                            received: arguments.len(),
                        },
                        &open_paren,
                    )
                })?;

            return Ok(Expression::HostPropertySet(HostPropertySetExpr {
                object: Box::new(object),
                property: Box::new(property),
                value: Box::new(value),
                span,
            }));
        }
        _ => {}
    }

    match left {
        Expression::DomPropertyAccess(DomPropertyExpr {
            object, property, ..
        }) => Ok(Expression::DomMethodCall(DomMethodCallExpr {
            object,
            method: property,
            arguments,
            span,
        })),
        callee => Ok(Expression::Call(CallExpr {
            callee: Box::new(callee),
            arguments,
            span,
        })),
    }
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.expect(TokenKind::Dot)?;
    let member = parser.expect_described(TokenKind::Identifier, "member name")?;
    let span = Span::new(left.get_span().start, member.span.end);

    if parser.is_dom_value(&left) {
        return Ok(Expression::DomPropertyAccess(DomPropertyExpr {
            object: Box::new(left),
            property: member.value,
            span,
        }));
    }

    Ok(Expression::MemberAccess(MemberExpr {
        object: Box::new(left),
        property: Box::new(Expression::Identifier(IdentifierExpr {
            name: member.value,
            span: member.span,
        })),
        computed: false,
        span,
    }))
}

pub fn parse_computed_member_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let property = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expression::MemberAccess(MemberExpr {
        span: parser.span_from(left.get_span().start),
        object: Box::new(left),
        property: Box::new(property),
        computed: true,
    }))
}

/// `new T(args)`. A recognized DOM element name becomes a DOM construction,
/// anything else an ordinary object creation.
pub fn parse_new_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.expect(TokenKind::New)?.span.start;

    let type_name = parse_type(parser, BindingPower::Default)?;
    let arguments = parse_arguments(parser)?;
    let span = parser.span_from(start);

    let is_element = is_dom_element(&type_name.name)
        && type_name.generic_args.is_empty()
        && !type_name.is_array
        && !type_name.nullable;

    if is_element {
        return Ok(Expression::DomConstruct(DomConstructExpr {
            element_name: type_name.name,
            arguments,
            span,
        }));
    }

    Ok(Expression::ObjectCreation(NewExpr {
        type_name,
        arguments,
        span,
    }))
}
