//! Declaration parsing: using directives, namespaces, classes and members.

use tracing::trace;

use crate::{
    ast::{
        ast::Statement,
        declarations::{
            Accessibility, ClassDecl, CompilationUnit, ConstructorDecl, ConstructorInitializer,
            FieldDecl, InitializerTarget, Member, MethodDecl, ParameterDecl, PropertyDecl,
        },
        statements::{BlockStmt, ExpressionStmt, ReturnStmt},
        types::TypeRef,
    },
    dom::is_dom_element,
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    expr::{parse_arguments, parse_expr},
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_block,
    types::parse_type,
};

/// Modifier keywords collected ahead of a class or member declaration.
#[derive(Debug, Default, Clone, Copy)]
struct Modifiers {
    accessibility: Option<Accessibility>,
    is_static: bool,
    is_virtual: bool,
    is_override: bool,
    is_abstract: bool,
    is_sealed: bool,
    is_readonly: bool,
    is_const: bool,
}

fn parse_modifiers(parser: &mut Parser) -> Modifiers {
    let mut modifiers = Modifiers::default();

    while parser.current_token_kind().is_modifier() {
        match parser.advance().kind {
            TokenKind::Public => modifiers.accessibility = Some(Accessibility::Public),
            TokenKind::Private => modifiers.accessibility = Some(Accessibility::Private),
            TokenKind::Protected => modifiers.accessibility = Some(Accessibility::Protected),
            TokenKind::Internal => modifiers.accessibility = Some(Accessibility::Internal),
            TokenKind::Static => modifiers.is_static = true,
            TokenKind::Virtual => modifiers.is_virtual = true,
            TokenKind::Override => modifiers.is_override = true,
            TokenKind::Abstract => modifiers.is_abstract = true,
            TokenKind::Sealed => modifiers.is_sealed = true,
            TokenKind::Readonly => modifiers.is_readonly = true,
            TokenKind::Const => modifiers.is_const = true,
            _ => {}
        }
    }

    modifiers
}

/// `Identifier ('.' Identifier)*`
fn parse_dotted_name(parser: &mut Parser) -> Result<String, Error> {
    let mut name = parser.expect(TokenKind::Identifier)?.value;

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        name.push('.');
        name.push_str(&parser.expect(TokenKind::Identifier)?.value);
    }

    Ok(name)
}

pub fn parse_compilation_unit(parser: &mut Parser) -> Result<CompilationUnit, Error> {
    let start = parser.get_position();
    let mut unit = CompilationUnit::default();

    while parser.has_tokens() {
        parse_top_level(parser, &mut unit)?;
    }

    unit.span = parser.span_from(start);
    Ok(unit)
}

fn parse_top_level(parser: &mut Parser, unit: &mut CompilationUnit) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Using => {
            let import = parse_using(parser)?;
            unit.imports.push(import);
        }
        TokenKind::Namespace => parse_namespace(parser, unit)?,
        _ => {
            let class = parse_class_decl(parser)?;
            unit.classes.push(class);
        }
    }

    Ok(())
}

/// `'using' Name ';'`
pub fn parse_using(parser: &mut Parser) -> Result<String, Error> {
    parser.expect(TokenKind::Using)?;
    let name = parse_dotted_name(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(name)
}

/// `'namespace' Name ';'` or `'namespace' Name '{' ... '}'`. Classes inside
/// a namespace are flattened into the unit.
fn parse_namespace(parser: &mut Parser, unit: &mut CompilationUnit) -> Result<(), Error> {
    parser.expect(TokenKind::Namespace)?;
    let name = parse_dotted_name(parser)?;
    if unit.namespace.is_none() {
        unit.namespace = Some(name);
    }

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        return Ok(());
    }

    parser.expect_described(TokenKind::OpenCurly, "`{` or `;`")?;
    parser.enter()?;
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        parse_top_level(parser, unit)?;
    }
    parser.exit();
    parser.expect(TokenKind::CloseCurly)?;

    Ok(())
}

/// `Modifiers 'class' Name (':' BaseList)? '{' Member* '}'`
///
/// A single name after `:` is always the base class; two or more names are
/// all interfaces.
pub fn parse_class_decl(parser: &mut Parser) -> Result<ClassDecl, Error> {
    let start = parser.get_position();
    let modifiers = parse_modifiers(parser);

    parser.expect(TokenKind::Class)?;
    let name = parser
        .expect_described(TokenKind::Identifier, "class name")?
        .value;

    let mut base_class = None;
    let mut interfaces = vec![];

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();

        let mut bases = vec![parse_type(parser, BindingPower::Default)?.name];
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            bases.push(parse_type(parser, BindingPower::Default)?.name);
        }

        if bases.len() == 1 {
            base_class = bases.pop();
        } else {
            interfaces = bases;
        }
    }

    parser.expect(TokenKind::OpenCurly)?;
    parser.begin_class(&name);

    let mut members = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        members.push(parse_member(parser, &name)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    parser.end_class();

    trace!(class = %name, members = members.len(), "parsed class");

    Ok(ClassDecl {
        name,
        base_class,
        interfaces,
        accessibility: modifiers.accessibility.unwrap_or(Accessibility::Internal),
        is_static: modifiers.is_static,
        is_abstract: modifiers.is_abstract,
        is_sealed: modifiers.is_sealed,
        members,
        span: parser.span_from(start),
    })
}

/// `Modifiers Type Name MemberTail`, or a constructor when the type is the
/// class name followed directly by `(`.
pub fn parse_member(parser: &mut Parser, class_name: &str) -> Result<Member, Error> {
    let start = parser.get_position();
    let modifiers = parse_modifiers(parser);
    parser.begin_member();

    if parser.current_token_kind() == TokenKind::Identifier
        && parser.current_token().value == class_name
        && parser.peek_kind(1) == TokenKind::OpenParen
    {
        return parse_constructor(parser, modifiers, start);
    }

    let member_type = parse_type(parser, BindingPower::Default)?;
    let name = parser
        .expect_described(TokenKind::Identifier, "member name")?
        .value;

    match parser.current_token_kind() {
        TokenKind::OpenParen => parse_method(parser, modifiers, member_type, name, start),
        TokenKind::OpenCurly => parse_property(parser, modifiers, member_type, name, start),
        TokenKind::Semicolon | TokenKind::Assignment => {
            parse_field(parser, modifiers, member_type, name, start)
        }
        _ => Err(parser.unexpected_detailed("expected `(`, `{`, `;` or `=` after member name")),
    }
}

/// `'(' (Type Name ('=' Expression)?)* ')'`. DOM-typed parameters are
/// recorded as DOM locals of the member being parsed.
fn parse_parameters(parser: &mut Parser) -> Result<Vec<ParameterDecl>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let start = parser.get_position();
        let param_type = parse_type(parser, BindingPower::Default)?;
        let name = parser
            .expect_described(TokenKind::Identifier, "parameter name")?
            .value;

        let default_value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        parser.declare_local(&name, is_dom_element(&param_type.name));
        parameters.push(ParameterDecl {
            name,
            param_type,
            default_value,
            span: parser.span_from(start),
        });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_described(TokenKind::CloseParen, "`,` or `)`")?;

    Ok(parameters)
}

fn parse_constructor(
    parser: &mut Parser,
    modifiers: Modifiers,
    start: Position,
) -> Result<Member, Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;
    let parameters = parse_parameters(parser)?;

    let initializer = if parser.current_token_kind() == TokenKind::Colon {
        let initializer_start = parser.advance().span.start;
        let target = match parser.current_token_kind() {
            TokenKind::Base => InitializerTarget::Base,
            TokenKind::This => InitializerTarget::This,
            _ => return Err(parser.unexpected("`base` or `this`")),
        };
        parser.advance();
        let arguments = parse_arguments(parser)?;

        Some(ConstructorInitializer {
            target,
            arguments,
            span: parser.span_from(initializer_start),
        })
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Member::Constructor(ConstructorDecl {
        name,
        parameters,
        initializer,
        body,
        accessibility: modifiers.accessibility.unwrap_or(Accessibility::Private),
        is_static: modifiers.is_static,
        span: parser.span_from(start),
    }))
}

fn parse_method(
    parser: &mut Parser,
    modifiers: Modifiers,
    return_type: TypeRef,
    name: String,
    start: Position,
) -> Result<Member, Error> {
    let parameters = parse_parameters(parser)?;

    let body = match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            None
        }
        TokenKind::FatArrow => Some(parse_expression_body(parser, return_type.is_void())?),
        _ => Some(parse_block(parser)?),
    };

    Ok(Member::Method(MethodDecl {
        name,
        return_type,
        parameters,
        body,
        accessibility: modifiers.accessibility.unwrap_or(Accessibility::Private),
        is_static: modifiers.is_static,
        is_virtual: modifiers.is_virtual,
        is_override: modifiers.is_override,
        is_abstract: modifiers.is_abstract,
        span: parser.span_from(start),
    }))
}

/// `'=>' Expression ';'` as the body of a method: a return of the expression,
/// or a plain expression statement for `void` methods.
fn parse_expression_body(parser: &mut Parser, is_void: bool) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::FatArrow)?.span.start;
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let span = parser.span_from(start);
    let statement = if is_void {
        Statement::Expression(ExpressionStmt { expression, span })
    } else {
        Statement::Return(ReturnStmt {
            value: Some(expression),
            span,
        })
    };

    Ok(BlockStmt {
        body: vec![statement],
        span,
    })
}

/// `'{' Accessor* '}' ('=' Expression ';')?` where an accessor is
/// `Modifiers ('get' | 'set') (';' | Block | '=>' Expression ';')`.
/// Accessor bodies are checked for balance and skipped.
fn parse_property(
    parser: &mut Parser,
    modifiers: Modifiers,
    property_type: TypeRef,
    name: String,
    start: Position,
) -> Result<Member, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut has_getter = false;
    let mut has_setter = false;

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        parse_modifiers(parser);

        let accessor = parser.current_token().clone();
        match (accessor.kind, accessor.value.as_str()) {
            (TokenKind::Identifier, "get") => has_getter = true,
            (TokenKind::Identifier, "set") => has_setter = true,
            _ => return Err(parser.unexpected("`get` or `set`")),
        }
        parser.advance();

        match parser.current_token_kind() {
            TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::OpenCurly => skip_braced(parser)?,
            TokenKind::FatArrow => {
                parser.advance();
                parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::Semicolon)?;
            }
            _ => return Err(parser.unexpected("`;`, `{` or `=>`")),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;
        Some(value)
    } else {
        None
    };

    Ok(Member::Property(PropertyDecl {
        name,
        property_type,
        has_getter,
        has_setter,
        initializer,
        accessibility: modifiers.accessibility.unwrap_or(Accessibility::Private),
        is_static: modifiers.is_static,
        is_virtual: modifiers.is_virtual,
        is_override: modifiers.is_override,
        is_abstract: modifiers.is_abstract,
        span: parser.span_from(start),
    }))
}

/// Consumes a balanced `{ ... }` region without interpreting it.
fn skip_braced(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut depth = 1usize;

    while depth > 0 {
        match parser.current_token_kind() {
            TokenKind::EOF => return Err(parser.unexpected("`}`")),
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => depth -= 1,
            _ => {}
        }
        parser.advance();
    }

    Ok(())
}

fn parse_field(
    parser: &mut Parser,
    modifiers: Modifiers,
    field_type: TypeRef,
    name: String,
    start: Position,
) -> Result<Member, Error> {
    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Member::Field(FieldDecl {
        name,
        field_type,
        initializer,
        accessibility: modifiers.accessibility.unwrap_or(Accessibility::Private),
        is_static: modifiers.is_static,
        is_readonly: modifiers.is_readonly,
        is_const: modifiers.is_const,
        span: parser.span_from(start),
    }))
}
