//! Lowering of program trees into the assembly-like instruction form.
//!
//! Statements lower in `stmt`, expressions in `expr`. Expressions leave their
//! result in a variable of the symbol table, usually a fresh temporary.

pub mod compiler;
pub mod expr;
pub mod instruction;
pub mod program;
pub mod stmt;

#[cfg(test)]
mod tests;
