use std::fmt::Display;

use thiserror::Error;

/// Compilation error.
///
/// Wraps the concrete failure in [`ErrorImpl`] and exposes the helpers the
/// driver uses for reporting.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
}

impl Error {
    pub fn new(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
        }
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::ConditionNotBoolean { .. }
            | ErrorImpl::InvalidAssignment { .. }
            | ErrorImpl::MissingValue { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::VariableAlreadyDeclared { .. } => ErrorKind::Redeclaration,
            ErrorImpl::VariableNotDeclared { .. } => ErrorKind::UndeclaredVariable,
            ErrorImpl::UnsupportedOperation { .. }
            | ErrorImpl::UntypedVariable { .. }
            | ErrorImpl::OperandShapeMismatch { .. } => ErrorKind::UnsupportedOperation,
            ErrorImpl::DivisionByZero => ErrorKind::DivisionByZero,
            ErrorImpl::DanglingLabel { .. }
            | ErrorImpl::DuplicateLabel { .. }
            | ErrorImpl::MalformedListing { .. } => ErrorKind::MalformedProgram,
            ErrorImpl::Io { .. } => ErrorKind::Io,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::InvalidAssignment { .. } => "InvalidAssignment",
            ErrorImpl::MissingValue { .. } => "MissingValue",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::UntypedVariable { .. } => "UntypedVariable",
            ErrorImpl::OperandShapeMismatch { .. } => "OperandShapeMismatch",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::DanglingLabel { .. } => "DanglingLabel",
            ErrorImpl::DuplicateLabel { .. } => "DuplicateLabel",
            ErrorImpl::MalformedListing { .. } => "MalformedListing",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected a `{}` value, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperands { operator, message } => {
                ErrorTip::Suggestion(format!("Operator `{}`: {}", operator, message))
            }
            ErrorImpl::ConditionNotBoolean { construct, .. } => ErrorTip::Suggestion(format!(
                "The `{}` condition must be a Boolean expression",
                construct
            )),
            ErrorImpl::InvalidAssignment {
                variable,
                expected,
                ..
            } => ErrorTip::Suggestion(format!(
                "`{}` only accepts `{}` values (or Integer, if it is Real)",
                variable, expected
            )),
            ErrorImpl::MissingValue { construct } => ErrorTip::Suggestion(format!(
                "`{}` needs an expression that produces a value",
                construct
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UnsupportedOperation { .. } => ErrorTip::None,
            ErrorImpl::UntypedVariable { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` needs one of Boolean, Integer, Real or String",
                variable
            )),
            ErrorImpl::OperandShapeMismatch { .. } => ErrorTip::None,
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::DanglingLabel { label } => ErrorTip::Suggestion(format!(
                "No instruction carries `label{}%`",
                label
            )),
            ErrorImpl::DuplicateLabel { label } => ErrorTip::Suggestion(format!(
                "`label{}%` is attached to more than one instruction",
                label
            )),
            ErrorImpl::MalformedListing { line, .. } => {
                ErrorTip::Suggestion(format!("Check line {} of the program text", line))
            }
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl From<ErrorImpl> for Error {
    fn from(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorImpl::Io {
            message: error.to_string(),
        })
    }
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    Redeclaration,
    UndeclaredVariable,
    UnsupportedOperation,
    DivisionByZero,
    MalformedProgram,
    Io,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("type mismatch: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("invalid operands for {operator}: {message}")]
    InvalidOperands { operator: String, message: String },
    #[error("{construct} condition requires a Boolean expression, received {received}")]
    ConditionNotBoolean { construct: String, received: String },
    #[error("invalid assignment to {variable:?}: expected {expected}, received {received}")]
    InvalidAssignment {
        variable: String,
        expected: String,
        received: String,
    },
    #[error("{construct} requires an expression with a value")]
    MissingValue { construct: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("unsupported operation {operation} on {operand}")]
    UnsupportedOperation { operation: String, operand: String },
    #[error("variable {variable:?} cannot be given a non-supported type")]
    UntypedVariable { variable: String },
    #[error("{opcode} expects {expected} operands, received {received}")]
    OperandShapeMismatch {
        opcode: String,
        expected: String,
        received: String,
    },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("label{label}% is used as a jump target but never attached")]
    DanglingLabel { label: u64 },
    #[error("label{label}% is attached to more than one instruction")]
    DuplicateLabel { label: u64 },
    #[error("malformed program text at line {line}: {text:?}")]
    MalformedListing { line: usize, text: String },
    #[error("output error: {message}")]
    Io { message: String },
}
