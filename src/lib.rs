#![allow(clippy::module_inception)]

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::{
    ast::declarations::CompilationUnit,
    errors::errors::{Error, ErrorTip},
    generator::generator::Generator,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod checker;
pub mod dom;
pub mod errors;
pub mod generator;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A point in the source text. `line` and `column` are 1-based, `offset` is a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Position { line, column, offset }
    }

    pub fn null() -> Self {
        Position::default()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }
}

/// Tokenizes and parses `source` into a [`CompilationUnit`].
///
/// Compilation is all-or-nothing: the first lexical or syntax error aborts
/// and no partial tree is returned.
pub fn compile(source: &str) -> Result<CompilationUnit, Error> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized source");

    let unit = parse(tokens)?;
    debug!(classes = unit.classes.len(), "parsed compilation unit");

    Ok(unit)
}

/// Compiles `source` and generates the target program with default options.
pub fn transpile(source: &str) -> Result<String, Error> {
    let unit = compile(source)?;
    Ok(Generator::new().generate(&unit))
}

/// Finds the line containing byte `offset`.
///
/// Returns the 1-based line number, the line text (including its newline) and
/// the 0-based offset of `offset` within that line.
pub fn get_line_at_position(source: &str, offset: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            return Some((index + 1, line.to_string(), offset - start));
        }

        start = end;
    }

    // Errors reported at EOF point one past the last character.
    if offset == source.len() {
        let last = source.split_inclusive('\n').last().unwrap_or("");
        let line_number = source.split_inclusive('\n').count().max(1);
        return Some((line_number, last.to_string(), last.len()));
    }

    None
}

/// Renders a caret snippet pointing at `position`, headed by `label`:
///
/// ```text
/// Error: UnexpectedToken (expected `;`, found `}`)
/// -> App.cs
///    |
/// 20 | int a = 1 }
///    | ----------^
/// ```
pub fn render_snippet(
    label: &str,
    headline: &str,
    tip: &ErrorTip,
    position: Position,
    source: &str,
    file_name: &str,
) -> String {
    let mut out = String::new();

    if let ErrorTip::None = tip {
        out.push_str(&format!("{}: {}\n", label, headline));
    } else {
        out.push_str(&format!("{}: {} ({})\n", label, headline, tip));
    }
    out.push_str(&format!("-> {}:{}\n", file_name, position));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

/// Renders a parse or lexical error against the source it came from.
pub fn render_error(error: &Error, source: &str, file_name: &str) -> String {
    render_snippet(
        "Error",
        error.get_error_name(),
        &error.get_tip(),
        *error.get_position(),
        source,
        file_name,
    )
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}
