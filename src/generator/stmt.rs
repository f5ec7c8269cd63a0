use crate::ast::{ast::Statement, statements::BlockStmt};

use super::{
    expr::gen_expression,
    generator::{binding_name, Generator},
};

/// Emits the statements of `block` at the current indentation, without braces.
pub fn gen_block_body(generator: &mut Generator, block: &BlockStmt) {
    for statement in block.iter() {
        gen_statement(generator, statement);
    }
}

pub fn gen_statement(generator: &mut Generator, statement: &Statement) {
    match statement {
        Statement::Block(block) => {
            generator.write_line("{");
            generator.increase_indent();
            gen_block_body(generator, block);
            generator.decrease_indent();
            generator.write_line("}");
        }
        Statement::Expression(stmt) => {
            let expression = gen_expression(generator, &stmt.expression);
            generator.write_line(&format!("{};", expression));
        }
        Statement::VariableDecl(stmt) => {
            // The initializer is evaluated before the local comes into scope,
            // so `int count = count;` still reads the member.
            let value = stmt
                .assigned_value
                .as_ref()
                .map(|value| gen_expression(generator, value));
            generator.declare_local(&stmt.identifier);
            let name = binding_name(&stmt.identifier);

            match value {
                Some(value) => generator.write_line(&format!("let {} = {};", name, value)),
                None => generator.write_line(&format!("let {};", name)),
            }
        }
        Statement::Return(stmt) => match &stmt.value {
            Some(value) => {
                let value = gen_expression(generator, value);
                generator.write_line(&format!("return {};", value));
            }
            None => generator.write_line("return;"),
        },
        Statement::Unsupported(stmt) => {
            generator.write_line(&format!("/* unsupported: {} */", stmt.construct.describe()))
        }
    }
}
