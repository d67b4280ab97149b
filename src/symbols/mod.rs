//! Variable storage.
//!
//! This module holds the storage layer shared by every pass:
//!
//! - `Variable`, a named slot with a fixed declared type and a current value
//! - `VarHandle`, the reference tree nodes and instructions hold to a variable
//! - `SymbolTable`, the per-compilation registry that declares variables,
//!   hands out uniquely named temporaries and dumps the declarations block

pub mod symbol_table;
pub mod variable;

#[cfg(test)]
mod tests;
