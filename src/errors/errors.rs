use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

/// A fatal compilation error: either an unterminated literal raised by the
/// lexer or a syntax error raised by the parser.
#[derive(Error, Debug, Clone)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    token: Option<Token>,
}

/// Parse failures are reported through the same error type as lexical ones.
pub type ParseError = Error;

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            token: None,
        }
    }

    /// Creates an error positioned at (and carrying) the offending token.
    pub fn at_token(error_impl: ErrorImpl, token: &Token) -> Self {
        Error {
            internal_error: error_impl,
            position: token.span.start,
            token: Some(token.clone()),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::HostCallPathNotString { .. } => "HostCallPathNotString",
            ErrorImpl::HostSetArity { .. } => "HostSetArity",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedLiteral { quote } => ErrorTip::Suggestion(format!(
                "Literal opened with `{}` is never closed",
                quote
            )),
            ErrorImpl::InvalidCharLiteral { literal } => ErrorTip::Suggestion(format!(
                "`{}` must hold exactly one character or escape; use a string literal instead",
                literal
            )),
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "expected {}, found `{}`",
                expected, token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::HostCallPathNotString { .. } => ErrorTip::Suggestion(String::from(
                "The first argument of JS.Call must be a string literal naming the function",
            )),
            ErrorImpl::HostSetArity { .. } => ErrorTip::Suggestion(String::from(
                "JS.Set takes exactly three arguments: target, property and value",
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated literal starting with {quote}")]
    UnterminatedLiteral { quote: char },
    #[error("invalid char literal {literal}")]
    InvalidCharLiteral { literal: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("JS.Call expects a string literal path, found {token:?}")]
    HostCallPathNotString { token: String },
    #[error("JS.Set expects 3 arguments, received {received}")]
    HostSetArity { received: usize },
    #[error("nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },
}
