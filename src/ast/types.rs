use std::fmt::Display;

use serde::Serialize;

use crate::Span;

/// A type as written in the source. Generic arguments are recorded but not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeRef {
    pub name: String,
    pub nullable: bool,
    pub generic_args: Vec<TypeRef>,
    pub is_array: bool,
    pub span: Span,
}

impl TypeRef {
    pub fn named(name: &str, span: Span) -> Self {
        TypeRef {
            name: name.to_string(),
            nullable: false,
            generic_args: vec![],
            is_array: false,
            span,
        }
    }

    pub fn is_void(&self) -> bool {
        self.name == "void" && !self.is_array
    }

    /// Whether a value of this type defaults to `0` rather than `null`.
    pub fn is_numeric(&self) -> bool {
        !self.nullable
            && !self.is_array
            && matches!(
                self.name.as_str(),
                "int" | "long" | "short" | "byte" | "sbyte" | "uint" | "ulong" | "ushort"
                    | "float" | "double" | "decimal"
            )
    }

    pub fn is_bool(&self) -> bool {
        !self.nullable && !self.is_array && self.name == "bool"
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;

        if !self.generic_args.is_empty() {
            let args: Vec<String> = self.generic_args.iter().map(|arg| arg.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        if self.is_array {
            write!(f, "[]")?;
        }

        Ok(())
    }
}
