//! Runtime values.
//!
//! A [`Value`] holds exactly one concrete kind, fixed at construction.
//! Accessors fail with a type mismatch when asked for a different kind,
//! except that an Integer can always be read as a Real.

use std::{fmt::Display, io::Write};

use crate::errors::errors::{Error, ErrorImpl};

use super::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
}

/// A numeric view of a value, used for generic numeric dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn kind(&self) -> Type {
        match self {
            Number::Integer(_) => Type::Integer,
            Number::Real(_) => Type::Real,
        }
    }

    pub fn as_real(&self) -> f64 {
        match self {
            Number::Integer(integer) => *integer as f64,
            Number::Real(real) => *real,
        }
    }
}

impl Value {
    /// Returns the zero value of `ty` (false, 0, 0.0 or the empty string),
    /// or `None` for `Type::None`.
    pub fn zero(ty: Type) -> Option<Value> {
        match ty {
            Type::Boolean => Some(Value::Boolean(false)),
            Type::Integer => Some(Value::Integer(0)),
            Type::Real => Some(Value::Real(0.0)),
            Type::String => Some(Value::String(String::new())),
            Type::None => None,
        }
    }

    pub fn kind(&self) -> Type {
        match self {
            Value::Boolean(_) => Type::Boolean,
            Value::Integer(_) => Type::Integer,
            Value::Real(_) => Type::Real,
            Value::String(_) => Type::String,
        }
    }

    pub fn get_boolean(&self) -> Result<bool, Error> {
        match self {
            Value::Boolean(boolean) => Ok(*boolean),
            _ => Err(self.mismatch(Type::Boolean)),
        }
    }

    pub fn get_integer(&self) -> Result<i64, Error> {
        match self {
            Value::Integer(integer) => Ok(*integer),
            _ => Err(self.mismatch(Type::Integer)),
        }
    }

    /// Integers are widened; every other non-real kind fails.
    pub fn get_real(&self) -> Result<f64, Error> {
        match self {
            Value::Real(real) => Ok(*real),
            Value::Integer(integer) => Ok(*integer as f64),
            _ => Err(self.mismatch(Type::Real)),
        }
    }

    pub fn get_string(&self) -> Result<&str, Error> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(self.mismatch(Type::String)),
        }
    }

    pub fn get_number(&self) -> Result<Number, Error> {
        match self {
            Value::Integer(integer) => Ok(Number::Integer(*integer)),
            Value::Real(real) => Ok(Number::Real(*real)),
            _ => Err(Error::new(ErrorImpl::TypeMismatch {
                expected: String::from("numeric"),
                received: self.kind().to_string(),
            })),
        }
    }

    /// Writes the textual rendering of the value to `out`.
    pub fn print(&self, out: &mut dyn Write) -> Result<(), Error> {
        write!(out, "{}", self)?;
        Ok(())
    }

    fn mismatch(&self, expected: Type) -> Error {
        Error::new(ErrorImpl::TypeMismatch {
            expected: expected.to_string(),
            received: self.kind().to_string(),
        })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::Integer(integer) => write!(f, "{}", integer),
            // Debug keeps the fractional part of integral reals (`1.0`, not `1`) and
            // switches to exponent form outside 1e-4..1e16: `1e16`, `1.5e-7`
            Value::Real(real) => write!(f, "{:?}", real),
            Value::String(string) => write!(f, "{}", string),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
