use crate::{
    ast::{
        ast::{BinaryOperation, OperationCategory, Statement, UnaryOperation},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

impl Statement {
    /// Returns the type the node produces, or `Type::None` for statements
    /// without a value.
    ///
    /// Depends only on the static types of the children, so it can be asked
    /// repeatedly, including during lowering.
    pub fn static_type(&self) -> Type {
        match self {
            Statement::If { .. }
            | Statement::While { .. }
            | Statement::Block(_)
            | Statement::Assign { .. }
            | Statement::Print { .. } => Type::None,
            Statement::VariableRef(handle) => handle.ty(),
            Statement::UnaryOp { operation, .. } => match operation {
                UnaryOperation::Not => Type::Boolean,
            },
            Statement::BinaryOp {
                operation,
                left,
                right,
            } => binary_type(*operation, left.static_type(), right.static_type()),
            Statement::Constant(value) => value.kind(),
        }
    }

    /// Verifies the subtree is semantically proper, children first.
    pub fn check(&self) -> Result<(), Error> {
        match self {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                check_condition("if", condition)?;
                then_branch.check()?;
                if let Some(else_branch) = else_branch {
                    else_branch.check()?;
                }
                Ok(())
            }
            Statement::While { condition, body } => {
                check_condition("while", condition)?;
                body.check()
            }
            Statement::Block(statements) => {
                for statement in statements {
                    statement.check()?;
                }
                Ok(())
            }
            Statement::VariableRef(_) | Statement::Constant(_) => Ok(()),
            Statement::Assign { target, value } => {
                value.check()?;
                let received = value.static_type();
                if is_assignable(target.ty(), received) {
                    Ok(())
                } else {
                    Err(Error::new(ErrorImpl::InvalidAssignment {
                        variable: target.name().to_string(),
                        expected: target.ty().to_string(),
                        received: received.to_string(),
                    }))
                }
            }
            Statement::UnaryOp { operation, operand } => {
                operand.check()?;
                match operation {
                    UnaryOperation::Not if operand.static_type() != Type::Boolean => {
                        Err(Error::new(ErrorImpl::InvalidOperands {
                            operator: operation.to_string(),
                            message: String::from("NOT requires a boolean operand"),
                        }))
                    }
                    UnaryOperation::Not => Ok(()),
                }
            }
            Statement::BinaryOp {
                operation,
                left,
                right,
            } => {
                left.check()?;
                right.check()?;
                check_binary_operands(*operation, left.static_type(), right.static_type())
            }
            Statement::Print { expression, .. } => {
                expression.check()?;
                if expression.static_type() == Type::None {
                    return Err(Error::new(ErrorImpl::MissingValue {
                        construct: String::from("write"),
                    }));
                }
                Ok(())
            }
        }
    }
}

/// Checks `statement` before it is interpreted or lowered.
#[tracing::instrument(level = "debug", skip_all)]
pub fn type_check(statement: &Statement) -> Result<(), Error> {
    let result = statement.check();
    if let Err(error) = &result {
        tracing::debug!(%error, "semantic check failed");
    }
    result
}

/// Whether a value of type `received` may be stored into a variable of type
/// `expected`. Integer widens into Real; nothing else converts.
pub fn is_assignable(expected: Type, received: Type) -> bool {
    expected == received || (expected == Type::Real && received == Type::Integer)
}

fn binary_type(operation: BinaryOperation, left: Type, right: Type) -> Type {
    match operation.category() {
        OperationCategory::Comparison | OperationCategory::Logical => Type::Boolean,
        OperationCategory::RealDivision => Type::Real,
        OperationCategory::IntegerOnly => Type::Integer,
        OperationCategory::Arithmetic => {
            if left == Type::Integer && right == Type::Integer {
                Type::Integer
            } else {
                Type::Real
            }
        }
    }
}

fn check_condition(construct: &str, condition: &Statement) -> Result<(), Error> {
    condition.check()?;
    let received = condition.static_type();
    if received != Type::Boolean {
        return Err(Error::new(ErrorImpl::ConditionNotBoolean {
            construct: construct.to_string(),
            received: received.to_string(),
        }));
    }
    Ok(())
}

fn check_binary_operands(operation: BinaryOperation, left: Type, right: Type) -> Result<(), Error> {
    if left == Type::None || right == Type::None {
        return Err(Error::new(ErrorImpl::MissingValue {
            construct: operation.to_string(),
        }));
    }

    let message = match operation.category() {
        OperationCategory::Comparison => {
            if left == right || (left.is_numeric() && right.is_numeric()) {
                return Ok(());
            }
            "comparisons require compatible operands"
        }
        OperationCategory::Arithmetic | OperationCategory::RealDivision => {
            if left.is_numeric() && right.is_numeric() {
                return Ok(());
            }
            "+, -, * and / require numeric operands"
        }
        OperationCategory::IntegerOnly => {
            if left == Type::Integer && right == Type::Integer {
                return Ok(());
            }
            "DIV and MOD require integer operands"
        }
        OperationCategory::Logical => {
            if left == Type::Boolean && right == Type::Boolean {
                return Ok(());
            }
            "boolean operators require boolean operands"
        }
    };

    Err(Error::new(ErrorImpl::InvalidOperands {
        operator: operation.to_string(),
        message: String::from(message),
    }))
}
