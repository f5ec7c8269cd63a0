//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::{Token, TokenKind};
use crate::{Position, Span};

fn token(kind: TokenKind, value: &str, line: u32, column: u32) -> Token {
    let start = Position::new(line, column, 7);
    Token {
        kind,
        value: value.to_string(),
        span: Span::new(start, Position::new(line, column + value.len() as u32, 7 + value.len())),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnterminatedLiteral { quote: '"' },
        Position::new(1, 10, 9),
    );

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
    assert!(error.get_token().is_none());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "1.2.3".to_string(),
        },
        Position::new(3, 4, 42),
    );

    assert_eq!(error.get_position().offset, 42);
    assert_eq!(error.line(), 3);
    assert_eq!(error.column(), 4);
}

#[test]
fn test_error_at_token_carries_token() {
    let offending = token(TokenKind::CloseCurly, "}", 2, 5);
    let error = Error::at_token(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: "`;`".to_string(),
        },
        &offending,
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.line(), 2);
    assert_eq!(error.column(), 5);
    assert_eq!(error.get_token().map(|t| t.kind), Some(TokenKind::CloseCurly));
}

#[test]
fn test_error_message_and_display() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: "`;`".to_string(),
        },
        Position::new(2, 5, 20),
    );

    assert_eq!(error.message(), "unexpected token \"}\", expected `;`");
    assert_eq!(error.to_string(), "unexpected token \"}\", expected `;` at 2:5");
}

#[test]
fn test_host_call_error_name() {
    let error = Error::new(
        ErrorImpl::HostCallPathNotString {
            token: "path".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "HostCallPathNotString");
}

#[test]
fn test_nesting_error_has_no_tip() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 256 }, Position::null());

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: "identifier".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "expected identifier, found `}`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
