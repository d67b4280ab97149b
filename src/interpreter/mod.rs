//! Tree-walking interpreter.
//!
//! Evaluates a checked tree directly against the symbol table, writing the
//! output of `write`/`writeln` to a caller-supplied writer.

pub mod interpreter;
