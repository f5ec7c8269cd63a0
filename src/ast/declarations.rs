use serde::Serialize;

use crate::Span;

use super::{ast::Expression, statements::BlockStmt, types::TypeRef};

/// Root of the tree for one parsed source string.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompilationUnit {
    pub imports: Vec<String>,
    pub namespace: Option<String>,
    pub classes: Vec<ClassDecl>,
    pub span: Span,
}

impl CompilationUnit {
    /// Canonical structured projection of the whole tree.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|class| class.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Private,
    Protected,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub base_class: Option<String>,
    pub interfaces: Vec<String>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub members: Vec<Member>,
    pub span: Span,
}

impl ClassDecl {
    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Property(property) => Some(property),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MemberType {
    Method,
    Property,
    Field,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Member {
    Method(MethodDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Constructor(ConstructorDecl),
}

impl Member {
    pub fn get_member_type(&self) -> MemberType {
        match self {
            Member::Method(_) => MemberType::Method,
            Member::Property(_) => MemberType::Property,
            Member::Field(_) => MemberType::Field,
            Member::Constructor(_) => MemberType::Constructor,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Member::Method(method) => &method.name,
            Member::Property(property) => &property.name,
            Member::Field(field) => &field.name,
            Member::Constructor(constructor) => &constructor.name,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Member::Method(method) => method.is_static,
            Member::Property(property) => property.is_static,
            Member::Field(field) => field.is_static,
            Member::Constructor(constructor) => constructor.is_static,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Member::Method(method) => &method.span,
            Member::Property(property) => &property.span,
            Member::Field(field) => &field.span,
            Member::Constructor(constructor) => &constructor.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDecl {
    pub name: String,
    pub param_type: TypeRef,
    pub default_value: Option<Expression>,
    pub span: Span,
}

/// A method. `body` is `None` for abstract (bodiless) declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: TypeRef,
    pub parameters: Vec<ParameterDecl>,
    pub body: Option<BlockStmt>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_abstract: bool,
    pub span: Span,
}

/// An auto-implemented property. Block-bodied accessors are accepted but their
/// bodies are skipped; the generator always emits a plain get/set pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub property_type: TypeRef,
    pub has_getter: bool,
    pub has_setter: bool,
    pub initializer: Option<Expression>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_abstract: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: TypeRef,
    pub initializer: Option<Expression>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_const: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InitializerTarget {
    Base,
    This,
}

/// `: base(args)` or `: this(args)` after a constructor's parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorInitializer {
    pub target: InitializerTarget,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorDecl {
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
    pub initializer: Option<ConstructorInitializer>,
    pub body: BlockStmt,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub span: Span,
}
