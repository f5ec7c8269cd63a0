//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is a recursive-descent parser for declarations and statements
//! with a Pratt parser (NUD/LED handlers plus binding powers) for expressions.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    ast::{ast::Expression, declarations::CompilationUnit},
    dom::is_dom_element,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    decl::parse_compilation_unit,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    types::{create_token_type_lookups, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler, TypeNUDLookup},
};

/// Deepest expression/statement nesting accepted before parsing is aborted.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// A parser owns one token sequence and a cursor into it. It is single-use:
/// `parse` consumes it.
pub struct Parser {
    /// The list of tokens to parse, ending with EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Current expression/statement nesting depth
    depth: usize,
    /// Name of the class whose members are being parsed
    current_class: Option<String>,
    /// Class members declared with a DOM element type
    dom_members: HashSet<String>,
    /// Parameters and locals of the current member declared with a DOM element type
    dom_locals: HashSet<String>,
    /// Parameters and locals of the current member with any other type; these
    /// hide DOM members of the same name
    plain_locals: HashSet<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    type_nud_lookup: TypeNUDLookup,
    type_led_lookup: TypeLEDLookup,
    type_binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `tokens`, which must end with an EOF token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span::new(end, end),
            });
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            current_class: None,
            dom_members: HashSet::new(),
            dom_locals: HashSet::new(),
            plain_locals: HashSet::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        // The cursor never moves past the trailing EOF token.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token `n` positions ahead without advancing.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    pub fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.current_token_kind() != TokenKind::EOF {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// On a mismatch returns an `UnexpectedToken` error carrying the current
    /// token and an expectation message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_described(expected_kind, &expected_kind.describe())
    }

    /// Like [`Parser::expect`], with a custom description of what was expected.
    pub fn expect_described(
        &mut self,
        expected_kind: TokenKind,
        expected: &str,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected));
        }

        Ok(self.advance().clone())
    }

    /// Builds an `UnexpectedToken` error at the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::at_token(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
                expected: expected.to_string(),
            },
            token,
        )
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::at_token(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.to_string(),
                message: message.to_string(),
            },
            token,
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = match self.pos {
            0 => start,
            pos => self.tokens[(pos - 1).min(self.tokens.len() - 1)].span.end,
        };
        Span::new(start, end)
    }

    /// Enters one level of nesting, failing once the limit is exceeded.
    pub fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::at_token(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current_token(),
            ));
        }
        Ok(())
    }

    pub fn exit(&mut self) {
        self.exit_by(1);
    }

    pub fn exit_by(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type binding power lookup table.
    pub fn get_type_bp_lookup(&self) -> &BPLookup {
        &self.type_binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Returns a reference to the type LED lookup table.
    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Unlike `led`, this does not touch the binding power table: a token
    /// such as `-` or `(` keeps its infix binding power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    pub fn current_class(&self) -> Option<&str> {
        self.current_class.as_deref()
    }

    /// Starts a class body: records its name and the members it declares with
    /// a DOM element type. Must be called with the cursor just past the `{`.
    pub fn begin_class(&mut self, name: &str) {
        self.current_class = Some(name.to_string());
        self.dom_members = self.scan_dom_members();
        self.begin_member();
    }

    pub fn end_class(&mut self) {
        self.current_class = None;
        self.dom_members.clear();
        self.begin_member();
    }

    /// Starts a member body; locals from the previous member are forgotten.
    pub fn begin_member(&mut self) {
        self.dom_locals.clear();
        self.plain_locals.clear();
    }

    /// Records whether local `name` holds a DOM element. The latest
    /// declaration of a name wins, and a non-DOM local hides a DOM member.
    pub fn declare_local(&mut self, name: &str, is_dom: bool) {
        if is_dom {
            self.plain_locals.remove(name);
            self.dom_locals.insert(name.to_string());
        } else {
            self.dom_locals.remove(name);
            self.plain_locals.insert(name.to_string());
        }
    }

    /// Whether `expression` is statically known to evaluate to a DOM element.
    pub fn is_dom_value(&self, expression: &Expression) -> bool {
        match expression {
            Expression::Identifier(identifier) => {
                self.dom_locals.contains(&identifier.name)
                    || (!self.plain_locals.contains(&identifier.name)
                        && self.dom_members.contains(&identifier.name))
            }
            Expression::MemberAccess(member) => {
                matches!(member.object.as_ref(), Expression::This { .. })
                    && member
                        .property_name()
                        .is_some_and(|name| self.dom_members.contains(name))
            }
            Expression::DomConstruct(_) => true,
            _ => false,
        }
    }

    /// Looks ahead through the class body for fields and properties declared
    /// as `DomType name`. Method return types and parameters are skipped.
    fn scan_dom_members(&self) -> HashSet<String> {
        let mut members = HashSet::new();
        let mut depth = 0usize;
        let mut parens = 0usize;
        let mut index = self.pos;

        let kind_at = |i: usize| self.tokens.get(i).map_or(TokenKind::EOF, |token| token.kind);

        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly if depth == 0 => break,
                TokenKind::CloseCurly => depth -= 1,
                TokenKind::OpenParen => parens += 1,
                TokenKind::CloseParen => parens = parens.saturating_sub(1),
                TokenKind::EOF => break,
                TokenKind::Identifier
                    if depth == 0
                        && parens == 0
                        && is_dom_element(&token.value)
                        && kind_at(index + 1) == TokenKind::Identifier
                        && kind_at(index + 2) != TokenKind::OpenParen =>
                {
                    members.insert(self.tokens[index + 1].value.clone());
                }
                _ => {}
            }
            index += 1;
        }

        members
    }

    /// Non-consuming check for `Type name` at the cursor, where `Type` may be
    /// qualified, generic, nullable or an array. Used to tell a local variable
    /// declaration apart from an expression statement.
    pub fn looks_like_declaration(&self) -> bool {
        let kind = |i: usize| self.peek_kind(i);
        let mut i = 0;

        if kind(i) != TokenKind::Identifier {
            return false;
        }
        i += 1;

        while kind(i) == TokenKind::Dot && kind(i + 1) == TokenKind::Identifier {
            i += 2;
        }

        if kind(i) == TokenKind::Less {
            let mut depth = 0usize;
            loop {
                match kind(i) {
                    TokenKind::Less => depth += 1,
                    TokenKind::Greater => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    TokenKind::Identifier
                    | TokenKind::Comma
                    | TokenKind::Dot
                    | TokenKind::Question
                    | TokenKind::OpenBracket
                    | TokenKind::CloseBracket => {}
                    _ => return false,
                }
                i += 1;
            }
        }

        if kind(i) == TokenKind::Question {
            i += 1;
        }

        while kind(i) == TokenKind::OpenBracket && kind(i + 1) == TokenKind::CloseBracket {
            i += 2;
        }

        kind(i) == TokenKind::Identifier
    }
}

/// Parses a token sequence into a [`CompilationUnit`].
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses the whole unit. The first error
/// aborts the parse; no partial tree is returned.
pub fn parse(tokens: Vec<Token>) -> Result<CompilationUnit, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let unit = parse_compilation_unit(&mut parser)?;
    debug!(
        imports = unit.imports.len(),
        classes = unit.classes.len(),
        "parsed compilation unit"
    );

    Ok(unit)
}
