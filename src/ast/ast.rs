use std::fmt::Display;

use crate::symbols::variable::VarHandle;

use super::value::Value;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperation {
    Not,
}

impl Display for UnaryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperation::Not => write!(f, "not"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperation {
    Equals,
    NotEquals,
    Lesser,
    LesserEquals,
    Greater,
    GreaterEquals,
    Plus,
    Minus,
    Star,
    Slash,
    Div,
    Mod,
    And,
    Or,
}

/// The groups binary operators are checked, evaluated and lowered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCategory {
    Comparison,
    /// `+`, `-` and `*`
    Arithmetic,
    /// `/`, always real
    RealDivision,
    /// `div` and `mod`
    IntegerOnly,
    Logical,
}

impl BinaryOperation {
    pub fn category(&self) -> OperationCategory {
        match self {
            BinaryOperation::Equals
            | BinaryOperation::NotEquals
            | BinaryOperation::Lesser
            | BinaryOperation::LesserEquals
            | BinaryOperation::Greater
            | BinaryOperation::GreaterEquals => OperationCategory::Comparison,
            BinaryOperation::Plus | BinaryOperation::Minus | BinaryOperation::Star => {
                OperationCategory::Arithmetic
            }
            BinaryOperation::Slash => OperationCategory::RealDivision,
            BinaryOperation::Div | BinaryOperation::Mod => OperationCategory::IntegerOnly,
            BinaryOperation::And | BinaryOperation::Or => OperationCategory::Logical,
        }
    }
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperation::Equals => "=",
            BinaryOperation::NotEquals => "<>",
            BinaryOperation::Lesser => "<",
            BinaryOperation::LesserEquals => "<=",
            BinaryOperation::Greater => ">",
            BinaryOperation::GreaterEquals => ">=",
            BinaryOperation::Plus => "+",
            BinaryOperation::Minus => "-",
            BinaryOperation::Star => "*",
            BinaryOperation::Slash => "/",
            BinaryOperation::Div => "div",
            BinaryOperation::Mod => "mod",
            BinaryOperation::And => "and",
            BinaryOperation::Or => "or",
        };
        write!(f, "{}", symbol)
    }
}

/// A node of the program tree.
///
/// Each node owns its children. `Clone` deep-copies the whole subtree;
/// variables are shared only through their [`VarHandle`], which names a slot
/// in the symbol table rather than owning it.
///
/// The four passes over the tree live next to the code they mirror:
/// `static_type` and `check` in `type_checker`, `compute` in `interpreter`,
/// and `to_assembly` in `compiler`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If {
        condition: Box<Statement>,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    While {
        condition: Box<Statement>,
        body: Box<Statement>,
    },
    Block(Vec<Statement>),
    VariableRef(VarHandle),
    Assign {
        target: VarHandle,
        value: Box<Statement>,
    },
    UnaryOp {
        operation: UnaryOperation,
        operand: Box<Statement>,
    },
    BinaryOp {
        operation: BinaryOperation,
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Constant(Value),
    Print {
        expression: Box<Statement>,
        newline: bool,
    },
}

impl Statement {
    pub fn if_then(condition: Statement, then_branch: Statement) -> Self {
        Statement::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn if_then_else(condition: Statement, then_branch: Statement, else_branch: Statement) -> Self {
        Statement::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    pub fn while_loop(condition: Statement, body: Statement) -> Self {
        Statement::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::Block(statements)
    }

    pub fn variable(handle: VarHandle) -> Self {
        Statement::VariableRef(handle)
    }

    pub fn assign(target: VarHandle, value: Statement) -> Self {
        Statement::Assign {
            target,
            value: Box::new(value),
        }
    }

    pub fn not(operand: Statement) -> Self {
        Statement::UnaryOp {
            operation: UnaryOperation::Not,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operation: BinaryOperation, left: Statement, right: Statement) -> Self {
        Statement::BinaryOp {
            operation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Statement::Constant(value.into())
    }

    /// `write(expression)`, or `writeln(expression)` when `newline` is set.
    pub fn print(expression: Statement, newline: bool) -> Self {
        Statement::Print {
            expression: Box::new(expression),
            newline,
        }
    }
}
