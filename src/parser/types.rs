//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Simple and qualified names (`int`, `System.String`)
//! - Generic arguments (`List<string>`, `Dictionary<string, int>`)
//! - Nullable types (`int?`)
//! - Array types (`string[]`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for the postfix type modifiers.

use std::collections::HashMap;

use crate::{ast::types::TypeRef, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeRef, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeRef, BindingPower) -> Result<TypeRef, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Initializes the type parsing lookup tables.
///
/// Registers NUD and LED handlers for parsing type expressions.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::Question, BindingPower::Call, parse_nullable_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

/// `Name(.Name)*(<Type, ...>)?`
pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeRef, Error> {
    let start = parser.get_position();
    let mut name = parser.expect_described(TokenKind::Identifier, "type")?.value;

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        name.push('.');
        name.push_str(&parser.expect(TokenKind::Identifier)?.value);
    }

    let mut generic_args = vec![];
    if parser.current_token_kind() == TokenKind::Less {
        parser.advance();
        loop {
            generic_args.push(parse_type(parser, BindingPower::Default)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
        parser.expect(TokenKind::Greater)?;
    }

    Ok(TypeRef {
        name,
        nullable: false,
        generic_args,
        is_array: false,
        span: parser.span_from(start),
    })
}

pub fn parse_nullable_type(
    parser: &mut Parser,
    mut left: TypeRef,
    _bp: BindingPower,
) -> Result<TypeRef, Error> {
    parser.expect(TokenKind::Question)?;
    left.nullable = true;
    left.span = parser.span_from(left.span.start);

    Ok(left)
}

pub fn parse_array_type(
    parser: &mut Parser,
    mut left: TypeRef,
    _bp: BindingPower,
) -> Result<TypeRef, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;
    left.is_array = true;
    left.span = parser.span_from(left.span.start);

    Ok(left)
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeRef, Error> {
    parser.enter()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("type"));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(&next_bp) = parser.get_type_bp_lookup().get(&parser.current_token_kind()) {
        if next_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let Some(led_fn) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("type"));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    parser.exit();
    Ok(left)
}
