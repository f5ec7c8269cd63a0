use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::Span;

use super::{ast::Expression, types::TypeRef};

/// Identifier Expression
/// Represents a bare name: a local, a parameter, a member or a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    pub fn kind(&self) -> LiteralKind {
        match self {
            LiteralValue::String(_) => LiteralKind::String,
            LiteralValue::Number(_) => LiteralKind::Number,
            LiteralValue::Boolean(_) => LiteralKind::Boolean,
            LiteralValue::Null => LiteralKind::Null,
        }
    }
}

/// Literal Expression
/// The literal kind is derived from the stored value, so the two always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub span: Span,
}

impl LiteralExpr {
    pub fn kind(&self) -> LiteralKind {
        self.value.kind()
    }
}

impl Serialize for LiteralExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LiteralExpr", 3)?;
        match &self.value {
            LiteralValue::String(value) => state.serialize_field("value", value)?,
            LiteralValue::Number(value) => state.serialize_field("value", value)?,
            LiteralValue::Boolean(value) => state.serialize_field("value", value)?,
            LiteralValue::Null => state.serialize_field("value", &())?,
        }
        state.serialize_field("literal_kind", &self.kind())?;
        state.serialize_field("span", &self.span)?;
        state.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Coalesce,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Coalesce => "??",
        }
    }
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
        }
    }
}

/// Prefix `!` or `-` applied to an operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Postfix `++` or `--`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpr {
    pub operator: UpdateOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
        }
    }
}

/// Assignment Expression
/// Right associative: `a = b = c` assigns `c` to `b` first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpr {
    pub left: Box<Expression>,
    pub operator: AssignmentOperator,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Member Expression
/// `object.property` when not computed (the property is an identifier),
/// `object[property]` when computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpr {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    pub span: Span,
}

impl MemberExpr {
    /// The property name of a non-computed access.
    pub fn property_name(&self) -> Option<&str> {
        match (self.computed, self.property.as_ref()) {
            (false, Expression::Identifier(identifier)) => Some(&identifier.name),
            _ => None,
        }
    }
}

/// `new T(args)` for a type that is not a recognized DOM element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpr {
    pub type_name: TypeRef,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// `JS.Call("path.to.function", args...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostCallExpr {
    pub path: String,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// `JS.Set(object, property, value)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostPropertySetExpr {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

/// `new HTMLButtonElement(args)` for a recognized element name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomConstructExpr {
    pub element_name: String,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Property access on a value known to be a DOM element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomPropertyExpr {
    pub object: Box<Expression>,
    pub property: String,
    pub span: Span,
}

/// Method call on a value known to be a DOM element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomMethodCallExpr {
    pub object: Box<Expression>,
    pub method: String,
    pub arguments: Vec<Expression>,
    pub span: Span,
}
