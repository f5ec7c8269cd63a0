use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    // Every pattern is anchored so it can only match at the cursor.
    let regex = Regex::new(&format!("^(?:{})", source))
        .unwrap_or_else(|err| panic!("invalid lexer pattern {:?}: {}", source, err));
    RegexPattern { regex, handler }
}

lazy_static! {
    /// Ordered pattern table. The first pattern that matches at the cursor wins,
    /// so two-character operators are listed before their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"\s+", skip_handler),
        pattern(r"//[^\n]*", skip_handler),
        pattern(r"(?s)/\*.*?\*/", skip_handler),
        // Unterminated block comments run to the end of the input.
        pattern(r"(?s)/\*.*", skip_handler),
        pattern(r"[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"[0-9]+(\.[0-9]+)?", number_handler),
        pattern(r#"(?s)"(?:[^"\\]|\\.)*""#, string_handler),
        pattern(r#"""#, unterminated_handler),
        pattern(r"'(?:[^'\\\n]|\\.)'", char_handler),
        // Closed on the same line but empty or longer than one character.
        pattern(r"'(?:[^'\\\n]|\\.)*'", invalid_char_handler),
        pattern(r"'", unterminated_handler),
        pattern(r"==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern(r"!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern(r"<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern(r"\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern(r"\?\?", MK_DEFAULT_HANDLER!(TokenKind::NullCoalesce, "??")),
        pattern(r"\?\.", MK_DEFAULT_HANDLER!(TokenKind::QuestionDot, "?.")),
        pattern(r"=>", MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>")),
        pattern(r"\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        pattern(r"--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        pattern(r"\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern(r"-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern(r"\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern(r"/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern(r"\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern(r"\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern(r"\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern(r"\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern(r"\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern(r"=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern(r"<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(r";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(r"\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
        pattern(r",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

/// Cursor over the source text. Tracks the byte offset together with the
/// 1-based line and column of the next unread character.
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advances past the next `n` bytes, updating line and column counters.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());

        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consumes the text matched by `regex` at the cursor and pushes it as a token of `kind`.
    fn push_matched(&mut self, regex: &Regex, kind: TokenKind) {
        let matched = regex
            .find(self.remainder())
            .map(|m| m.as_str())
            .unwrap_or_default();

        let start = self.position();
        self.advance_n(matched.len());
        self.push(MK_TOKEN!(kind, matched.to_string(), Span::new(start, self.position())));
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(matched);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(regex, TokenKind::Number);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(regex, TokenKind::String);
    Ok(())
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(regex, TokenKind::Char);
    Ok(())
}

fn invalid_char_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let literal = regex
        .find(lexer.remainder())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Err(Error::new(
        ErrorImpl::InvalidCharLiteral { literal },
        lexer.position(),
    ))
}

fn unterminated_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let quote = lexer.at().unwrap_or('"');
    Err(Error::new(
        ErrorImpl::UnterminatedLiteral { quote },
        lexer.position(),
    ))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = regex
        .find(lexer.remainder())
        .map(|m| m.as_str())
        .unwrap_or_default();
    let kind = RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push_matched(regex, kind);
    Ok(())
}

/// Decodes the escape sequences of a raw string or char literal, quotes included.
///
/// Recognized escapes are `\n \t \r \\ \" \'`; any other escape keeps its backslash.
pub fn unescape(raw: &str) -> String {
    let inner = if raw.len() >= 2 { &raw[1..raw.len() - 1] } else { "" };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(_) | None => {
                // Keep the backslash
                result.push(ch);
                continue;
            }
        }
        chars.next();
    }

    result
}

/// Converts source text into tokens. The last token is always `EOF`.
///
/// Unrecognized characters become `Unknown` tokens; the only fatal lexical
/// errors are an unterminated string or char literal and a char literal that
/// does not hold exactly one character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let matched = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match matched {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                let ch = lex.at().unwrap_or_default();
                trace!(%ch, position = %lex.position(), "unrecognised character");

                let start = lex.position();
                lex.advance_n(ch.len_utf8());
                lex.push(MK_TOKEN!(
                    TokenKind::Unknown,
                    ch.to_string(),
                    Span::new(start, lex.position())
                ));
            }
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::new(end, end)));
    Ok(lex.tokens)
}
