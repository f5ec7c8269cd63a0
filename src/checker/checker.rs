use std::{collections::HashMap, fmt::Display};

use regex::Regex;
use tracing::debug;

use crate::{
    ast::declarations::{ClassDecl, CompilationUnit, InitializerTarget, Member, MemberType},
    errors::errors::ErrorTip,
    get_line_at_position, render_snippet, Position, Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A finding of the diagnostics pass. Diagnostics never stop generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: String, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message,
            span,
        }
    }

    pub fn warning(message: String, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message,
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn render(&self, source: &str, file_name: &str) -> String {
        render_snippet(
            &self.severity.to_string(),
            &self.message,
            &ErrorTip::None,
            self.span.start,
            source,
            file_name,
        )
    }
}

/// Names declared so far in one class.
#[derive(Debug, Default)]
struct ClassSymbols {
    /// Method name and parameter count, the overload key.
    methods: HashMap<(String, usize), Span>,
    /// Every field, property and method name with the kind that declared it first.
    members: HashMap<String, MemberType>,
    constructor: Option<Span>,
}

impl ClassSymbols {
    fn declare_member(&mut self, class: &ClassDecl, member: &Member, span: Span) -> Option<Diagnostic> {
        let name = member.name().to_string();

        match member {
            Member::Constructor(constructor) if constructor.is_static => None,
            Member::Constructor(_) => match self.constructor {
                Some(_) => Some(Diagnostic::warning(
                    format!(
                        "`{}` declares more than one constructor; only the first is generated",
                        class.name
                    ),
                    span,
                )),
                None => {
                    self.constructor = Some(span);
                    None
                }
            },
            Member::Method(method) => {
                let key = (name.clone(), method.parameters.len());
                let clash = match self.members.get(&name) {
                    Some(MemberType::Field) | Some(MemberType::Property) => true,
                    _ => self.methods.contains_key(&key),
                };

                self.methods.entry(key).or_insert(span);
                self.members.entry(name.clone()).or_insert(MemberType::Method);

                clash.then(|| {
                    Diagnostic::error(
                        format!("`{}.{}` is already declared", class.name, name),
                        span,
                    )
                })
            }
            Member::Field(_) | Member::Property(_) => {
                let clash = self.members.contains_key(&name);
                self.members.entry(name.clone()).or_insert(member.get_member_type());

                clash.then(|| {
                    Diagnostic::error(
                        format!("`{}.{}` is already declared", class.name, name),
                        span,
                    )
                })
            }
        }
    }
}

#[derive(Debug)]
pub struct Checker<'a> {
    source: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    pub fn new(source: &'a str) -> Self {
        Checker {
            source,
            diagnostics: Vec::new(),
        }
    }

    pub fn check_unit(mut self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut classes: HashMap<&str, &ClassDecl> = HashMap::new();

        for class in &unit.classes {
            if classes.contains_key(class.name.as_str()) {
                let span = self.name_span(&class.name, class.span);
                self.report(Diagnostic::error(
                    format!("class `{}` is already declared", class.name),
                    span,
                ));
            } else {
                classes.insert(&class.name, class);
            }

            self.check_class(class);
        }

        self.diagnostics
    }

    fn check_class(&mut self, class: &ClassDecl) {
        let mut symbols = ClassSymbols::default();

        for member in &class.members {
            let span = self.name_span(member.name(), *member.get_span());

            if let Some(diagnostic) = symbols.declare_member(class, member, span) {
                self.report(diagnostic);
            }

            if let Member::Method(method) = member {
                if method.is_abstract && !class.is_abstract {
                    self.report(Diagnostic::error(
                        format!(
                            "abstract method `{}.{}` in a class that is not abstract",
                            class.name, method.name
                        ),
                        span,
                    ));
                }
            }

            if let Member::Constructor(constructor) = member {
                match &constructor.initializer {
                    Some(initializer)
                        if initializer.target == InitializerTarget::Base
                            && class.base_class.is_none() =>
                    {
                        self.report(Diagnostic::warning(
                            format!(
                                "`{}` has no base class; the `base(...)` call is dropped",
                                class.name
                            ),
                            self.name_span("base", initializer.span),
                        ));
                    }
                    _ => {}
                }
            }

            if class.is_static && !member.is_static() {
                self.report(Diagnostic::error(
                    format!(
                        "static class `{}` cannot declare instance member `{}`",
                        class.name,
                        member.name()
                    ),
                    span,
                ));
            }
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Narrows a declaration span to the first whole-word occurrence of
    /// `name` inside it, falling back to the whole span.
    fn name_span(&self, name: &str, span: Span) -> Span {
        let Some(text) = self.source.get(span.start.offset..span.end.offset) else {
            return span;
        };
        let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(name))) else {
            return span;
        };
        let Some(found) = pattern.find(text) else {
            return span;
        };

        let start = span.start.offset + found.start();
        let end = span.start.offset + found.end();

        match (self.position_at(start), self.position_at(end)) {
            (Some(start), Some(end)) => Span::new(start, end),
            _ => span,
        }
    }

    fn position_at(&self, offset: usize) -> Option<Position> {
        let (line, line_text, line_pos) = get_line_at_position(self.source, offset)?;
        let column = line_text.get(..line_pos)?.chars().count() + 1;

        Some(Position::new(line as u32, column as u32, offset))
    }
}

/// Runs the diagnostics pass over a parsed unit.
///
/// `source` must be the text `unit` was compiled from; it is used to point
/// diagnostics at the offending name.
pub fn check(unit: &CompilationUnit, source: &str) -> Vec<Diagnostic> {
    let diagnostics = Checker::new(source).check_unit(unit);
    debug!(diagnostics = diagnostics.len(), "checked compilation unit");

    diagnostics
}
