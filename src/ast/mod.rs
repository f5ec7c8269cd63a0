//! Abstract Syntax Tree (AST) definitions.
//!
//! This module contains the data structures that make up the AST, organized
//! as one closed sum type per category so every consumer matches exhaustively:
//!
//! - `ast`: the `Statement` and `Expression` enums and their discriminants
//! - `expressions`: expression node payloads
//! - `statements`: statement node payloads
//! - `declarations`: compilation unit, classes and class members
//! - `types`: type references as written in the source
//!
//! The tree is strictly owned top-down and every node carries a source span.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
