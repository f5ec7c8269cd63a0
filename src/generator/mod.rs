//! Code generation module.
//!
//! This module contains the generator that lowers the AST into target
//! source text. It handles:
//!
//! - Feature detection deciding which runtime snippets to emit
//! - The runtime snippets themselves (console, interop and DOM bridges)
//! - Class lowering: fields, constructor, properties, methods, statics
//! - Statement and expression emission
//!
//! Generation is total: every parsed unit produces text.

pub mod expr;
pub mod features;
pub mod generator;
pub mod runtime;
pub mod stmt;
