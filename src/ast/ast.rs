use serde::Serialize;

use crate::Span;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, DomConstructExpr, DomMethodCallExpr,
        DomPropertyExpr, HostCallExpr, HostPropertySetExpr, IdentifierExpr, LiteralExpr,
        MemberExpr, NewExpr, UnaryExpr, UpdateExpr,
    },
    statements::{BlockStmt, ExpressionStmt, ReturnStmt, UnsupportedStmt, VarDeclStmt},
};

/// Statement Types
///
/// Discriminant of [`Statement`], for callers that only need the kind.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    BlockStmt,
    ExpressionStmt,
    VarDeclStmt,
    ReturnStmt,
    UnsupportedStmt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    VariableDecl(VarDeclStmt),
    Return(ReturnStmt),
    Unsupported(UnsupportedStmt),
}

impl Statement {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Statement::Block(_) => StmtType::BlockStmt,
            Statement::Expression(_) => StmtType::ExpressionStmt,
            Statement::VariableDecl(_) => StmtType::VarDeclStmt,
            Statement::Return(_) => StmtType::ReturnStmt,
            Statement::Unsupported(_) => StmtType::UnsupportedStmt,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Statement::Block(stmt) => &stmt.span,
            Statement::Expression(stmt) => &stmt.span,
            Statement::VariableDecl(stmt) => &stmt.span,
            Statement::Return(stmt) => &stmt.span,
            Statement::Unsupported(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
///
/// Discriminant of [`Expression`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Identifier,
    Literal,
    Binary,
    Unary,
    Update,
    Assignment,
    Call,
    MemberAccess,
    This,
    Base,
    ObjectCreation,
    HostCall,
    HostPropertySet,
    DomConstruct,
    DomPropertyAccess,
    DomMethodCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(IdentifierExpr),
    Literal(LiteralExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Update(UpdateExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    MemberAccess(MemberExpr),
    This { span: Span },
    Base { span: Span },
    ObjectCreation(NewExpr),
    HostCall(HostCallExpr),
    HostPropertySet(HostPropertySetExpr),
    DomConstruct(DomConstructExpr),
    DomPropertyAccess(DomPropertyExpr),
    DomMethodCall(DomMethodCallExpr),
}

impl Expression {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expression::Identifier(_) => ExprType::Identifier,
            Expression::Literal(_) => ExprType::Literal,
            Expression::Binary(_) => ExprType::Binary,
            Expression::Unary(_) => ExprType::Unary,
            Expression::Update(_) => ExprType::Update,
            Expression::Assignment(_) => ExprType::Assignment,
            Expression::Call(_) => ExprType::Call,
            Expression::MemberAccess(_) => ExprType::MemberAccess,
            Expression::This { .. } => ExprType::This,
            Expression::Base { .. } => ExprType::Base,
            Expression::ObjectCreation(_) => ExprType::ObjectCreation,
            Expression::HostCall(_) => ExprType::HostCall,
            Expression::HostPropertySet(_) => ExprType::HostPropertySet,
            Expression::DomConstruct(_) => ExprType::DomConstruct,
            Expression::DomPropertyAccess(_) => ExprType::DomPropertyAccess,
            Expression::DomMethodCall(_) => ExprType::DomMethodCall,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Identifier(expr) => &expr.span,
            Expression::Literal(expr) => &expr.span,
            Expression::Binary(expr) => &expr.span,
            Expression::Unary(expr) => &expr.span,
            Expression::Update(expr) => &expr.span,
            Expression::Assignment(expr) => &expr.span,
            Expression::Call(expr) => &expr.span,
            Expression::MemberAccess(expr) => &expr.span,
            Expression::This { span } | Expression::Base { span } => span,
            Expression::ObjectCreation(expr) => &expr.span,
            Expression::HostCall(expr) => &expr.span,
            Expression::HostPropertySet(expr) => &expr.span,
            Expression::DomConstruct(expr) => &expr.span,
            Expression::DomPropertyAccess(expr) => &expr.span,
            Expression::DomMethodCall(expr) => &expr.span,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(identifier) => Some(&identifier.name),
            _ => None,
        }
    }
}
