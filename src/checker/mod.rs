//! Diagnostics pass.
//!
//! Walks a parsed unit and reports declaration problems the generator
//! silently tolerates: duplicate classes and members, dropped constructors,
//! misplaced abstract methods and instance members of static classes.

pub mod checker;

#[cfg(test)]
mod tests;
