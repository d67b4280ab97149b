//! Static type tags.
//!
//! Every node of the tree and every variable carries one of these. `None`
//! marks statements that do not produce a value.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    None,
    Boolean,
    Integer,
    Real,
    String,
}

impl Type {
    /// Name used for this type in the declarations block of a program.
    pub fn type_name(&self) -> &'static str {
        match self {
            Type::None => "no-type",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Real => "Real",
            Type::String => "String",
        }
    }

    /// Inverse of [`Type::type_name`].
    pub fn from_type_name(name: &str) -> Option<Type> {
        match name {
            "no-type" => Some(Type::None),
            "Boolean" => Some(Type::Boolean),
            "Integer" => Some(Type::Integer),
            "Real" => Some(Type::Real),
            "String" => Some(Type::String),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Real)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
