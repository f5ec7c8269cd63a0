//! Feature detection: decides which optional runtime snippets a unit needs.
//!
//! Every expression reachable from a member (method and constructor bodies,
//! parameter defaults, constructor initializers, field and property
//! initializers) is visited, so no emitted node refers to a bridge that was
//! left out.

use crate::ast::{
    ast::{Expression, Statement},
    declarations::{CompilationUnit, Member, ParameterDecl},
    statements::BlockStmt,
};

/// Which runtime snippets the generated program depends on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// A `HostCall` or `HostPropertySet` is reachable.
    pub interop: bool,
    /// A `DomConstruct`, `DomPropertyAccess` or `DomMethodCall` is reachable.
    pub dom: bool,
}

pub fn detect_features(unit: &CompilationUnit) -> Features {
    let mut features = Features::default();

    for member in unit.classes.iter().flat_map(|class| class.members.iter()) {
        visit_member(&mut features, member);
    }

    features
}

fn visit_member(features: &mut Features, member: &Member) {
    match member {
        Member::Method(method) => {
            visit_parameters(features, &method.parameters);
            if let Some(body) = &method.body {
                visit_block(features, body);
            }
        }
        Member::Constructor(constructor) => {
            visit_parameters(features, &constructor.parameters);
            if let Some(initializer) = &constructor.initializer {
                for argument in &initializer.arguments {
                    visit_expression(features, argument);
                }
            }
            visit_block(features, &constructor.body);
        }
        Member::Field(field) => {
            if let Some(initializer) = &field.initializer {
                visit_expression(features, initializer);
            }
        }
        Member::Property(property) => {
            if let Some(initializer) = &property.initializer {
                visit_expression(features, initializer);
            }
        }
    }
}

fn visit_parameters(features: &mut Features, parameters: &[ParameterDecl]) {
    for default in parameters.iter().filter_map(|parameter| parameter.default_value.as_ref()) {
        visit_expression(features, default);
    }
}

fn visit_block(features: &mut Features, block: &BlockStmt) {
    for statement in block.iter() {
        visit_statement(features, statement);
    }
}

fn visit_statement(features: &mut Features, statement: &Statement) {
    match statement {
        Statement::Block(block) => visit_block(features, block),
        Statement::Expression(stmt) => visit_expression(features, &stmt.expression),
        Statement::VariableDecl(stmt) => {
            if let Some(value) = &stmt.assigned_value {
                visit_expression(features, value);
            }
        }
        Statement::Return(stmt) => {
            if let Some(value) = &stmt.value {
                visit_expression(features, value);
            }
        }
        Statement::Unsupported(_) => {}
    }
}

fn visit_all(features: &mut Features, expressions: &[Expression]) {
    for expression in expressions {
        visit_expression(features, expression);
    }
}

fn visit_expression(features: &mut Features, expression: &Expression) {
    match expression {
        Expression::Identifier(_)
        | Expression::Literal(_)
        | Expression::This { .. }
        | Expression::Base { .. } => {}
        Expression::Binary(binary) => {
            visit_expression(features, &binary.left);
            visit_expression(features, &binary.right);
        }
        Expression::Unary(unary) => visit_expression(features, &unary.operand),
        Expression::Update(update) => visit_expression(features, &update.operand),
        Expression::Assignment(assignment) => {
            visit_expression(features, &assignment.left);
            visit_expression(features, &assignment.right);
        }
        Expression::Call(call) => {
            visit_expression(features, &call.callee);
            visit_all(features, &call.arguments);
        }
        Expression::MemberAccess(member) => {
            visit_expression(features, &member.object);
            visit_expression(features, &member.property);
        }
        Expression::ObjectCreation(creation) => visit_all(features, &creation.arguments),
        Expression::HostCall(call) => {
            features.interop = true;
            visit_all(features, &call.arguments);
        }
        Expression::HostPropertySet(set) => {
            features.interop = true;
            visit_expression(features, &set.object);
            visit_expression(features, &set.property);
            visit_expression(features, &set.value);
        }
        Expression::DomConstruct(construct) => {
            features.dom = true;
            visit_all(features, &construct.arguments);
        }
        Expression::DomPropertyAccess(access) => {
            features.dom = true;
            visit_expression(features, &access.object);
        }
        Expression::DomMethodCall(call) => {
            features.dom = true;
            visit_expression(features, &call.object);
            visit_all(features, &call.arguments);
        }
    }
}
