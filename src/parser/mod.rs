//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses recursive descent for declarations
//! and statements and a Pratt parser for expressions, and handles:
//!
//! - Declaration parsing (using directives, namespaces, classes, members)
//! - Statement parsing (locals, returns, blocks, unlowered control flow)
//! - Expression parsing (binary ops, calls, member access, interop and DOM forms)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. The
//! first error aborts the parse; there is no recovery.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
