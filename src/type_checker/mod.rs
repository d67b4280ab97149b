//! Type checking and semantic analysis module.
//!
//! This module computes static types and validates the tree before it is
//! interpreted or lowered:
//!
//! - Static types of every node, derived from the children's types
//! - Boolean conditions for `if` and `while`
//! - Assignment compatibility, including Integer to Real widening
//! - Operand compatibility for each operator category

pub mod type_checker;
