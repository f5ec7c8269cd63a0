use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("using", TokenKind::Using);
        map.insert("namespace", TokenKind::Namespace);
        map.insert("class", TokenKind::Class);
        map.insert("public", TokenKind::Public);
        map.insert("private", TokenKind::Private);
        map.insert("protected", TokenKind::Protected);
        map.insert("internal", TokenKind::Internal);
        map.insert("static", TokenKind::Static);
        map.insert("virtual", TokenKind::Virtual);
        map.insert("override", TokenKind::Override);
        map.insert("abstract", TokenKind::Abstract);
        map.insert("sealed", TokenKind::Sealed);
        map.insert("readonly", TokenKind::Readonly);
        map.insert("const", TokenKind::Const);
        map.insert("new", TokenKind::New);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("this", TokenKind::This);
        map.insert("base", TokenKind::Base);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    EOF,
    Unknown,
    Number,
    String,
    Char,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    NullCoalesce,  // ??
    QuestionDot,   // ?.
    FatArrow,      // =>

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Using,
    Namespace,
    Class,
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Virtual,
    Override,
    Abstract,
    Sealed,
    Readonly,
    Const,
    New,
    Return,
    If,
    Else,
    While,
    For,
    True,
    False,
    Null,
    This,
    Base,
}

impl TokenKind {
    /// Modifier keywords that may prefix a class or member declaration.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Internal
                | TokenKind::Static
                | TokenKind::Virtual
                | TokenKind::Override
                | TokenKind::Abstract
                | TokenKind::Sealed
                | TokenKind::Readonly
                | TokenKind::Const
        )
    }

    /// How the parser names this kind in an "expected ..." message.
    pub fn describe(&self) -> String {
        let text = match self {
            TokenKind::EOF => return String::from("end of input"),
            TokenKind::Unknown => return String::from("unknown character"),
            TokenKind::Number => return String::from("number"),
            TokenKind::String => return String::from("string literal"),
            TokenKind::Char => return String::from("char literal"),
            TokenKind::Identifier => return String::from("identifier"),
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::NullCoalesce => "??",
            TokenKind::QuestionDot => "?.",
            TokenKind::FatArrow => "=>",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Comma => ",",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::SlashEquals => "/=",
            TokenKind::StarEquals => "*=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            keyword => {
                return RESERVED_LOOKUP
                    .iter()
                    .find(|(_, kind)| *kind == keyword)
                    .map(|(text, _)| format!("`{}`", text))
                    .unwrap_or_else(|| format!("{:?}", keyword));
            }
        };

        format!("`{}`", text)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexed token. `value` is the raw source text of the token, so string and
/// char literals keep their quotes and escape sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == TokenKind::EOF {
            write!(f, "end of input")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// One line per token, used by `--emit tokens`.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Unknown,
        ]) {
            format!("{} {} ({})", self.span.start, self.kind, self.value)
        } else {
            format!("{} {}", self.span.start, self.kind)
        }
    }
}
