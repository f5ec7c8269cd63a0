use tracing::trace;

use crate::{
    ast::{
        ast::{Expression, Statement},
        statements::{
            BlockStmt, ExpressionStmt, ReturnStmt, UnsupportedConstruct, UnsupportedStmt,
            VarDeclStmt,
        },
    },
    dom::is_dom_element,
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.enter()?;

    let stmt_fn = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let stmt = match stmt_fn {
        Some(stmt_fn) => stmt_fn(parser)?,
        None if parser.looks_like_declaration() => parse_var_decl_stmt(parser)?,
        None => parse_expression_stmt(parser)?,
    };

    parser.exit();
    Ok(stmt)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Expression(ExpressionStmt {
        span: parser.span_from(expression.get_span().start),
        expression,
    }))
}

/// `Type name ('=' Expression)? ';'`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();

    let var_type = parse_type(parser, BindingPower::Default)?;
    let identifier = parser
        .expect_described(TokenKind::Identifier, "variable name")?
        .value;

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    let is_dom = is_dom_element(&var_type.name)
        || matches!(assigned_value, Some(Expression::DomConstruct(_)));
    parser.declare_local(&identifier, is_dom);

    Ok(Statement::VariableDecl(VarDeclStmt {
        var_type,
        identifier,
        assigned_value,
        span: parser.span_from(start),
    }))
}

/// Parses a braced block into its statements.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::Block(parse_block(parser)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

fn parse_condition(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

fn unsupported(parser: &Parser, construct: UnsupportedConstruct, start: Position) -> Statement {
    trace!(construct = construct.describe(), "control flow parsed without lowering");

    Statement::Unsupported(UnsupportedStmt {
        construct,
        span: parser.span_from(start),
    })
}

/// `if (cond) stmt (else stmt)?`, checked for well-formedness and then
/// replaced by an unsupported marker.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    parse_condition(parser)?;
    parse_stmt(parser)?;

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_stmt(parser)?;
    }

    Ok(unsupported(parser, UnsupportedConstruct::If, start))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;

    parse_condition(parser)?;
    parse_stmt(parser)?;

    Ok(unsupported(parser, UnsupportedConstruct::While, start))
}

/// `for (init? ; cond? ; update?) stmt`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;
    parser.expect(TokenKind::OpenParen)?;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    } else if parser.looks_like_declaration() {
        parse_var_decl_stmt(parser)?;
    } else {
        parse_expression_stmt(parser)?;
    }

    if parser.current_token_kind() != TokenKind::Semicolon {
        parse_expr(parser, BindingPower::Default)?;
    }
    parser.expect(TokenKind::Semicolon)?;

    if parser.current_token_kind() != TokenKind::CloseParen {
        parse_expr(parser, BindingPower::Default)?;
    }
    parser.expect(TokenKind::CloseParen)?;

    parse_stmt(parser)?;

    Ok(unsupported(parser, UnsupportedConstruct::For, start))
}
