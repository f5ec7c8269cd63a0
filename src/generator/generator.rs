//! Main code generator module.
//!
//! This module contains the Generator structure and the class-level emission
//! of the target program. It decides which runtime snippets to emit through
//! the feature-detection pass, then lowers every class: fields, the
//! constructor, properties, methods and static initializers.

use std::collections::HashSet;

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::ast::{
    ast::Expression,
    declarations::{
        ClassDecl, CompilationUnit, ConstructorDecl, InitializerTarget, Member, MethodDecl,
        ParameterDecl,
    },
    statements::BlockStmt,
    types::TypeRef,
};

use super::{
    expr::gen_expression,
    features::detect_features,
    runtime::{dom_runtime, CONSOLE_POLYFILL, INTEROP_RUNTIME},
    stmt::gen_block_body,
};

/// Options that control the shape of the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Whether to start the output with a generated-code header comment.
    pub emit_header: bool,
    /// Whether to append a call to the first static `Main` method found.
    pub invoke_main: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            emit_header: true,
            invoke_main: false,
        }
    }
}

/// Names visible inside the member currently being emitted, used to qualify
/// bare references to class members with `this.` or `ClassName.`.
#[derive(Debug, Default, Clone)]
pub struct MemberScope {
    pub class_name: String,
    pub instance_members: HashSet<String>,
    pub static_members: HashSet<String>,
    /// Parameters and locals; these shadow members.
    pub locals: HashSet<String>,
}

lazy_static! {
    /// Words the target rejects as parameter or variable names inside a
    /// class body, which is always strict code.
    static ref RESERVED_WORDS: HashSet<&'static str> = [
        "arguments", "await", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "enum", "eval", "export",
        "extends", "false", "finally", "for", "function", "if", "implements", "import",
        "in", "instanceof", "interface", "let", "new", "null", "package", "private",
        "protected", "public", "return", "static", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with", "yield",
    ]
    .into_iter()
    .collect();
}

/// Name a parameter or local is bound to in the output. Reserved words get
/// a leading underscore.
pub fn binding_name(name: &str) -> String {
    if RESERVED_WORDS.contains(name) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Lowers a [`CompilationUnit`] into target source text.
///
/// The generator holds only per-run state (output buffer, indentation and the
/// current member scope) which is reset at the start of every `generate`.
pub struct Generator {
    output: String,
    indent_level: usize,
    options: GeneratorOptions,
    scope: Option<MemberScope>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            scope: None,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates the whole target program. Never fails.
    pub fn generate(&mut self, unit: &CompilationUnit) -> String {
        self.output.clear();
        self.indent_level = 0;
        self.scope = None;

        let features = detect_features(unit);
        debug!(
            interop = features.interop,
            dom = features.dom,
            classes = unit.classes.len(),
            "generating program"
        );

        if self.options.emit_header {
            self.write_line("// Generated by sharpjs. Do not edit.");
            if let Some(namespace) = &unit.namespace {
                self.write_line(&format!("// namespace {}", namespace));
            }
            self.write_newline();
        }

        self.write_raw(CONSOLE_POLYFILL);
        if features.interop {
            self.write_newline();
            self.write_raw(INTEROP_RUNTIME);
        }
        if features.dom {
            self.write_newline();
            self.write_raw(&dom_runtime());
        }

        for class in &unit.classes {
            self.write_newline();
            self.gen_class(class);
        }

        if self.options.invoke_main {
            let entry = unit.classes.iter().find(|class| {
                class
                    .methods()
                    .any(|method| method.is_static && method.name == "Main")
            });

            if let Some(class) = entry {
                self.write_newline();
                self.write_line(&format!("{}.Main();", class.name));
            }
        }

        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn gen_class(&mut self, class: &ClassDecl) {
        trace!(class = %class.name, members = class.members.len(), "emitting class");

        let class_scope = class_scope(class);

        match &class.base_class {
            Some(base) => self.write_line(&format!("class {} extends {} {{", class.name, base)),
            None => self.write_line(&format!("class {} {{", class.name)),
        }
        self.increase_indent();

        let mut first_entry = true;
        let mut separate = |generator: &mut Self| {
            if !first_entry {
                generator.write_newline();
            }
            first_entry = false;
        };

        // Instance fields and property slots become class fields
        let mut instance_slots = vec![];
        for member in &class.members {
            match member {
                Member::Field(field) if !field.is_static => {
                    instance_slots.push((field.name.clone(), &field.initializer, &field.field_type))
                }
                Member::Property(property) if !property.is_static => instance_slots.push((
                    backing_slot(&property.name),
                    &property.initializer,
                    &property.property_type,
                )),
                _ => {}
            }
        }

        if !instance_slots.is_empty() {
            separate(self);
            self.enter_scope(&class_scope, &[]);
            for (name, initializer, slot_type) in instance_slots {
                let value = self.initial_value(initializer.as_ref(), slot_type);
                self.write_line(&format!("{} = {};", name, value));
            }
            self.scope = None;
        }

        if let Some(constructor) = class.constructors().find(|constructor| !constructor.is_static)
        {
            separate(self);
            self.gen_constructor(class, constructor, &class_scope);
        }

        for property in class.properties() {
            separate(self);
            let prefix = if property.is_static { "static " } else { "" };
            let slot = backing_slot(&property.name);

            self.write_line(&format!("{}get {}() {{", prefix, property.name));
            self.increase_indent();
            self.write_line(&format!("return this.{};", slot));
            self.decrease_indent();
            self.write_line("}");
            self.write_newline();
            self.write_line(&format!("{}set {}(value) {{", prefix, property.name));
            self.increase_indent();
            self.write_line(&format!("this.{} = value;", slot));
            self.decrease_indent();
            self.write_line("}");
        }

        for method in class.methods() {
            separate(self);
            self.gen_method(class, method, &class_scope);
        }

        self.decrease_indent();
        self.write_line("}");

        self.gen_static_initializers(class, &class_scope);
    }

    fn gen_constructor(
        &mut self,
        class: &ClassDecl,
        constructor: &ConstructorDecl,
        class_scope: &MemberScope,
    ) {
        self.enter_scope(class_scope, &constructor.parameters);
        let params = self.gen_parameters(&constructor.parameters);
        self.write_line(&format!("constructor({}) {{", params));
        self.increase_indent();

        match &constructor.initializer {
            // Without `extends` there is no super constructor to call.
            Some(initializer) if initializer.target == InitializerTarget::Base => {
                if class.base_class.is_some() {
                    let args = self.gen_arguments(&initializer.arguments);
                    self.write_line(&format!("super({});", args));
                }
            }
            Some(_) => {
                if class.base_class.is_some() {
                    self.write_line("super();");
                }
                self.write_line("/* unsupported: this(...) constructor initializer */");
            }
            None if class.base_class.is_some() => self.write_line("super();"),
            None => {}
        }

        gen_block_body(self, &constructor.body);

        self.decrease_indent();
        self.write_line("}");
        self.scope = None;
    }

    fn gen_method(&mut self, class: &ClassDecl, method: &MethodDecl, class_scope: &MemberScope) {
        self.enter_scope(class_scope, &method.parameters);
        let params = self.gen_parameters(&method.parameters);
        let prefix = if method.is_static { "static " } else { "" };

        self.write_line(&format!("{}{}({}) {{", prefix, method.name, params));
        self.increase_indent();

        match &method.body {
            Some(body) => gen_block_body(self, body),
            None => self.write_line(&format!(
                "throw new Error(\"{}.{} is not implemented\");",
                class.name, method.name
            )),
        }

        self.decrease_indent();
        self.write_line("}");
        self.scope = None;
    }

    /// Static fields, static property slots and a static constructor body are
    /// emitted after the class so their initializers can be arbitrary
    /// expressions referring to the class itself.
    fn gen_static_initializers(&mut self, class: &ClassDecl, class_scope: &MemberScope) {
        self.enter_scope(class_scope, &[]);

        for member in &class.members {
            match member {
                Member::Field(field) if field.is_static => {
                    let value = self.initial_value(field.initializer.as_ref(), &field.field_type);
                    self.write_line(&format!("{}.{} = {};", class.name, field.name, value));
                }
                Member::Property(property) if property.is_static => {
                    let value =
                        self.initial_value(property.initializer.as_ref(), &property.property_type);
                    self.write_line(&format!(
                        "{}.{} = {};",
                        class.name,
                        backing_slot(&property.name),
                        value
                    ));
                }
                _ => {}
            }
        }

        self.scope = None;

        if let Some(constructor) = class.constructors().find(|constructor| constructor.is_static) {
            self.enter_scope(class_scope, &[]);
            self.gen_detached_block(&constructor.body);
            self.scope = None;
        }
    }

    fn gen_detached_block(&mut self, block: &BlockStmt) {
        self.write_line("{");
        self.increase_indent();
        gen_block_body(self, block);
        self.decrease_indent();
        self.write_line("}");
    }

    fn initial_value(&self, initializer: Option<&Expression>, slot_type: &TypeRef) -> String {
        match initializer {
            Some(expression) => gen_expression(self, expression),
            None => default_value(slot_type).to_string(),
        }
    }

    pub fn gen_parameters(&self, parameters: &[ParameterDecl]) -> String {
        parameters
            .iter()
            .map(|parameter| match &parameter.default_value {
                Some(default) => format!(
                    "{} = {}",
                    binding_name(&parameter.name),
                    gen_expression(self, default)
                ),
                None => binding_name(&parameter.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn gen_arguments(&self, arguments: &[Expression]) -> String {
        arguments
            .iter()
            .map(|argument| gen_expression(self, argument))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ========================================================================
    // Scope
    // ========================================================================

    fn enter_scope(&mut self, class_scope: &MemberScope, parameters: &[ParameterDecl]) {
        let mut scope = class_scope.clone();
        scope
            .locals
            .extend(parameters.iter().map(|parameter| parameter.name.clone()));
        self.scope = Some(scope);
    }

    pub fn declare_local(&mut self, name: &str) {
        if let Some(scope) = &mut self.scope {
            scope.locals.insert(name.to_string());
        }
    }

    /// Qualifies a bare identifier that names a member of the enclosing class.
    pub fn resolve_identifier(&self, name: &str) -> String {
        let Some(scope) = &self.scope else {
            return name.to_string();
        };

        if scope.locals.contains(name) {
            binding_name(name)
        } else if scope.instance_members.contains(name) {
            format!("this.{}", name)
        } else if scope.static_members.contains(name) {
            format!("{}.{}", scope.class_name, name)
        } else {
            name.to_string()
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn write_line(&mut self, line: &str) {
        self.write_indent();
        self.output.push_str(line);
        self.write_newline();
    }

    fn write_raw(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.options.indent_width;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }
}

fn class_scope(class: &ClassDecl) -> MemberScope {
    let mut scope = MemberScope {
        class_name: class.name.clone(),
        ..MemberScope::default()
    };

    for member in &class.members {
        if matches!(member, Member::Constructor(_)) {
            continue;
        }

        let name = member.name().to_string();
        if member.is_static() {
            scope.static_members.insert(name);
        } else {
            scope.instance_members.insert(name);
        }
    }

    scope
}

/// Hidden per-instance slot holding an auto-property's value.
pub fn backing_slot(property: &str) -> String {
    format!("__{}", property)
}

/// The value a field or property holds before any assignment.
pub fn default_value(slot_type: &TypeRef) -> &'static str {
    if slot_type.is_numeric() {
        "0"
    } else if slot_type.is_bool() {
        "false"
    } else {
        "null"
    }
}
