use std::slice::Iter;

use serde::Serialize;

use crate::Span;

use super::{
    ast::{Expression, Statement},
    types::TypeRef,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BlockStmt {
    pub body: Vec<Statement>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStmt {
    pub expression: Expression,
    pub span: Span,
}

/// `Type name (= value)?;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclStmt {
    pub var_type: TypeRef,
    pub identifier: String,
    pub assigned_value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnsupportedConstruct {
    If,
    While,
    For,
}

impl UnsupportedConstruct {
    pub fn describe(&self) -> &'static str {
        match self {
            UnsupportedConstruct::If => "if statement",
            UnsupportedConstruct::While => "while loop",
            UnsupportedConstruct::For => "for loop",
        }
    }
}

/// Control flow that is parsed for well-formedness but not lowered.
/// The parsed condition and body are discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedStmt {
    pub construct: UnsupportedConstruct,
    pub span: Span,
}
