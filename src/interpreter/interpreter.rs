use std::{cmp::Ordering, io::Write};

use crate::{
    ast::{
        ast::{BinaryOperation, OperationCategory, Statement, UnaryOperation},
        types::Type,
        value::Value,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::symbol_table::SymbolTable,
    type_checker::type_checker::type_check,
};

impl Statement {
    /// Interprets the node.
    ///
    /// Returns the value of an expression, or `None` for statements. Both
    /// operands of a binary operator are always evaluated, `and`/`or`
    /// included.
    pub fn compute(&self, symbols: &mut SymbolTable, out: &mut dyn Write) -> Result<Option<Value>, Error> {
        match self {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if compute_value(condition, "if", symbols, out)?.get_boolean()? {
                    then_branch.compute(symbols, out)?;
                } else if let Some(else_branch) = else_branch {
                    else_branch.compute(symbols, out)?;
                }
                Ok(None)
            }
            Statement::While { condition, body } => {
                while compute_value(condition, "while", symbols, out)?.get_boolean()? {
                    body.compute(symbols, out)?;
                }
                Ok(None)
            }
            Statement::Block(statements) => {
                for statement in statements {
                    statement.compute(symbols, out)?;
                }
                Ok(None)
            }
            Statement::VariableRef(handle) => Ok(Some(symbols.value_of(handle)?.clone())),
            Statement::Assign { target, value } => {
                let value = match compute_value(value, ":=", symbols, out)? {
                    Value::Integer(integer) if target.ty() == Type::Real => Value::Real(integer as f64),
                    value => value,
                };
                symbols.assign(target, value)?;
                Ok(None)
            }
            Statement::UnaryOp { operation, operand } => {
                let value = compute_value(operand, &operation.to_string(), symbols, out)?;
                match operation {
                    UnaryOperation::Not => Ok(Some(Value::Boolean(!value.get_boolean()?))),
                }
            }
            Statement::BinaryOp {
                operation,
                left,
                right,
            } => {
                let construct = operation.to_string();
                let left_value = compute_value(left, &construct, symbols, out)?;
                let right_value = compute_value(right, &construct, symbols, out)?;
                compute_binary(*operation, self.static_type(), &left_value, &right_value).map(Some)
            }
            Statement::Constant(value) => Ok(Some(value.clone())),
            Statement::Print {
                expression,
                newline,
            } => {
                let value = compute_value(expression, "write", symbols, out)?;
                value.print(out)?;
                if *newline {
                    writeln!(out)?;
                }
                Ok(None)
            }
        }
    }
}

/// Checks `statement`, then interprets it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn interpret(statement: &Statement, symbols: &mut SymbolTable, out: &mut dyn Write) -> Result<(), Error> {
    type_check(statement)?;
    statement.compute(symbols, out)?;
    out.flush()?;
    tracing::debug!("interpretation finished");
    Ok(())
}

fn compute_value(
    statement: &Statement,
    construct: &str,
    symbols: &mut SymbolTable,
    out: &mut dyn Write,
) -> Result<Value, Error> {
    match statement.compute(symbols, out)? {
        Some(value) => Ok(value),
        None => Err(Error::new(ErrorImpl::MissingValue {
            construct: construct.to_string(),
        })),
    }
}

fn compute_binary(operation: BinaryOperation, result_type: Type, left: &Value, right: &Value) -> Result<Value, Error> {
    match operation.category() {
        OperationCategory::Comparison => compare(operation, left, right).map(Value::Boolean),
        OperationCategory::IntegerOnly => {
            let (lhs, rhs) = (left.get_integer()?, right.get_integer()?);
            if rhs == 0 {
                return Err(Error::new(ErrorImpl::DivisionByZero));
            }
            match operation {
                BinaryOperation::Div => Ok(Value::Integer(lhs.wrapping_div(rhs))),
                _ => Ok(Value::Integer(lhs.wrapping_rem(rhs))),
            }
        }
        OperationCategory::Arithmetic if result_type == Type::Integer => {
            let (lhs, rhs) = (left.get_integer()?, right.get_integer()?);
            let result = match operation {
                BinaryOperation::Plus => lhs.wrapping_add(rhs),
                BinaryOperation::Minus => lhs.wrapping_sub(rhs),
                _ => lhs.wrapping_mul(rhs),
            };
            Ok(Value::Integer(result))
        }
        OperationCategory::Arithmetic | OperationCategory::RealDivision => {
            let (lhs, rhs) = (left.get_real()?, right.get_real()?);
            let result = match operation {
                BinaryOperation::Plus => lhs + rhs,
                BinaryOperation::Minus => lhs - rhs,
                BinaryOperation::Star => lhs * rhs,
                _ => lhs / rhs,
            };
            Ok(Value::Real(result))
        }
        OperationCategory::Logical => {
            let (lhs, rhs) = (left.get_boolean()?, right.get_boolean()?);
            match operation {
                BinaryOperation::And => Ok(Value::Boolean(lhs && rhs)),
                _ => Ok(Value::Boolean(lhs || rhs)),
            }
        }
    }
}

/// Dispatches on the runtime kind of the left operand.
fn compare(operation: BinaryOperation, left: &Value, right: &Value) -> Result<bool, Error> {
    match left {
        Value::Boolean(lhs) => {
            let rhs = right.get_boolean()?;
            match operation {
                BinaryOperation::Equals => Ok(*lhs == rhs),
                BinaryOperation::NotEquals => Ok(*lhs != rhs),
                _ => Err(Error::new(ErrorImpl::UnsupportedOperation {
                    operation: operation.to_string(),
                    operand: Type::Boolean.to_string(),
                })),
            }
        }
        Value::String(lhs) => Ok(ordering_holds(operation, lhs.as_str().cmp(right.get_string()?))),
        Value::Integer(lhs) if right.kind() == Type::Integer => {
            Ok(ordering_holds(operation, lhs.cmp(&right.get_integer()?)))
        }
        _ => {
            let (lhs, rhs) = (left.get_real()?, right.get_real()?);
            Ok(match operation {
                BinaryOperation::Equals => lhs == rhs,
                BinaryOperation::NotEquals => lhs != rhs,
                BinaryOperation::Lesser => lhs < rhs,
                BinaryOperation::LesserEquals => lhs <= rhs,
                BinaryOperation::Greater => lhs > rhs,
                _ => lhs >= rhs,
            })
        }
    }
}

fn ordering_holds(operation: BinaryOperation, ordering: Ordering) -> bool {
    match operation {
        BinaryOperation::Equals => ordering == Ordering::Equal,
        BinaryOperation::NotEquals => ordering != Ordering::Equal,
        BinaryOperation::Lesser => ordering == Ordering::Less,
        BinaryOperation::LesserEquals => ordering != Ordering::Greater,
        BinaryOperation::Greater => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    }
}
