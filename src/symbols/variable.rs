use crate::{
    ast::{types::Type, value::Value},
    errors::errors::{Error, ErrorImpl},
};

/// A named storage slot.
///
/// The declared type is set once, when the variable is created, and the
/// current value always has that kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    declared_type: Type,
    value: Value,
}

impl Variable {
    /// Creates a variable of type `ty` holding that type's zero value.
    pub fn new(name: impl Into<String>, ty: Type) -> Result<Self, Error> {
        let name = name.into();
        match Value::zero(ty) {
            Some(value) => Ok(Variable {
                name,
                declared_type: ty,
                value,
            }),
            None => Err(Error::new(ErrorImpl::UntypedVariable { variable: name })),
        }
    }

    /// Creates a variable whose type is the kind of `value`.
    pub fn with_value(name: impl Into<String>, value: Value) -> Self {
        Variable {
            name: name.into(),
            declared_type: value.kind(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Type {
        self.declared_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the current value. No widening happens here: a Real
    /// variable rejects an Integer value.
    pub fn set_value(&mut self, value: Value) -> Result<(), Error> {
        if value.kind() != self.declared_type {
            return Err(Error::new(ErrorImpl::TypeMismatch {
                expected: self.declared_type.to_string(),
                received: value.kind().to_string(),
            }));
        }

        self.value = value;
        Ok(())
    }

    pub fn handle(&self) -> VarHandle {
        VarHandle {
            name: self.name.clone(),
            ty: self.declared_type,
        }
    }
}

/// Reference to a variable registered in a [`SymbolTable`](super::symbol_table::SymbolTable).
///
/// Carries the declared type so the static type of a reference never needs
/// the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarHandle {
    name: String,
    ty: Type,
}

impl VarHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Type {
        self.ty
    }
}
