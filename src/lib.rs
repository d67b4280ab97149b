#![allow(clippy::module_inception)]

//! Typed program trees for a small Pascal-like language.
//!
//! A [`Statement`](ast::ast::Statement) tree is built against a
//! [`SymbolTable`](symbols::symbol_table::SymbolTable), checked, and then
//! either interpreted directly or lowered into an assembly-like
//! [`Program`](compiler::program::Program). The emitted text can be read back
//! with [`Listing`](listing::listing::Listing).

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod interpreter;
pub mod listing;
pub mod macros;
pub mod symbols;
pub mod type_checker;

extern crate regex;

/// Renders an error for the user: the error name, the tip when there is one,
/// and the message.
///
/// ```text
/// Error: VariableNotDeclared (Variable `x` not declared)
/// -> variable "x" not declared
/// ```
pub fn format_error(error: &Error) -> String {
    let header = match error.get_tip() {
        ErrorTip::None => format!("Error: {}", error.get_error_name()),
        tip => format!("Error: {} ({})", error.get_error_name(), tip),
    };

    format!("{}\n-> {}", header, error)
}
