//! Error types and error handling for the compiler.
//!
//! This module defines the error types shared by every pass over the tree:
//!
//! - Error structures wrapping one concrete failure
//! - Error categories (type mismatch, redeclaration, undeclared variable,
//!   unsupported operation, and the program/IO failures)
//! - Helpful error messages and suggestions

pub mod errors;
