use crate::{
    ast::{
        ast::{BinaryOperation, OperationCategory, Statement, UnaryOperation},
        types::Type,
        value::Value,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::variable::VarHandle,
};

use super::{
    compiler::Compiler,
    instruction::{Instruction, Opcode},
};

/// A reference lowers to its own variable. No instruction is emitted.
pub fn gen_variable(compiler: &mut Compiler, handle: &VarHandle) -> Result<VarHandle, Error> {
    compiler.symbols.lookup(handle.name())
}

pub fn gen_constant(compiler: &mut Compiler, value: &Value) -> VarHandle {
    compiler.symbols.obtain_temp_with_value(value.clone())
}

pub fn gen_unary(
    compiler: &mut Compiler,
    operation: UnaryOperation,
    operand: &Statement,
) -> Result<VarHandle, Error> {
    let operand = compiler.lower_value(operand, &operation.to_string())?;

    match operation {
        UnaryOperation::Not => {
            let result = compiler.symbols.obtain_temp(Type::Boolean)?;
            compiler.emit(Instruction::var_var(Opcode::LogicNot, result.clone(), operand)?);
            Ok(result)
        }
    }
}

pub fn gen_binary(
    compiler: &mut Compiler,
    node: &Statement,
    operation: BinaryOperation,
    left: &Statement,
    right: &Statement,
) -> Result<VarHandle, Error> {
    let construct = operation.to_string();
    let left = compiler.lower_value(left, &construct)?;
    let right = compiler.lower_value(right, &construct)?;
    let result = compiler.symbols.obtain_temp(node.static_type())?;

    match operation.category() {
        OperationCategory::Comparison => {
            let (left, right) = promote_mixed(compiler, left, right)?;
            let opcode = comparison_opcode(operation, left.ty())?;
            compiler.emit(Instruction::var_var_var(opcode, result.clone(), left, right)?);
        }
        OperationCategory::Arithmetic => {
            let (left, right) = promote_mixed(compiler, left, right)?;
            let (copy, accumulate) = arithmetic_opcodes(operation, result.ty());
            compiler.emit(Instruction::var_var(copy, result.clone(), left)?);
            compiler.emit(Instruction::var_var(accumulate, result.clone(), right)?);
        }
        OperationCategory::RealDivision => {
            let left = to_real(compiler, left)?;
            let right = to_real(compiler, right)?;
            compiler.emit(Instruction::var_var_var(Opcode::RealDiv, result.clone(), left, right)?);
        }
        OperationCategory::IntegerOnly => {
            let opcode = match operation {
                BinaryOperation::Mod => Opcode::Mod,
                _ => Opcode::IntDiv,
            };
            compiler.emit(Instruction::var_var_var(opcode, result.clone(), left, right)?);
        }
        OperationCategory::Logical => {
            let opcode = match operation {
                BinaryOperation::Or => Opcode::LogicOr,
                _ => Opcode::LogicAnd,
            };
            compiler.emit(Instruction::var_var_var(opcode, result.clone(), left, right)?);
        }
    }

    Ok(result)
}

/// When exactly one side is Integer and the other Real, converts the Integer
/// side into a fresh Real temporary.
fn promote_mixed(
    compiler: &mut Compiler,
    left: VarHandle,
    right: VarHandle,
) -> Result<(VarHandle, VarHandle), Error> {
    match (left.ty(), right.ty()) {
        (Type::Integer, Type::Real) => Ok((to_real(compiler, left)?, right)),
        (Type::Real, Type::Integer) => Ok((left, to_real(compiler, right)?)),
        _ => Ok((left, right)),
    }
}

fn to_real(compiler: &mut Compiler, var: VarHandle) -> Result<VarHandle, Error> {
    if var.ty() != Type::Integer {
        return Ok(var);
    }

    let converted = compiler.symbols.obtain_temp(Type::Real)?;
    compiler.emit(Instruction::var_var(Opcode::IntToReal, converted.clone(), var)?);
    Ok(converted)
}

fn comparison_opcode(operation: BinaryOperation, operand_type: Type) -> Result<Opcode, Error> {
    let opcode = match (operation, operand_type) {
        (BinaryOperation::Equals, Type::Integer) => Opcode::IntEqual,
        (BinaryOperation::Equals, Type::Real) => Opcode::RealEqual,
        (BinaryOperation::NotEquals, Type::Integer) => Opcode::IntNotEqual,
        (BinaryOperation::NotEquals, Type::Real) => Opcode::RealNotEqual,
        (BinaryOperation::Lesser, Type::Integer) => Opcode::IntLesser,
        (BinaryOperation::Lesser, Type::Real) => Opcode::RealLesser,
        (BinaryOperation::LesserEquals, Type::Integer) => Opcode::IntLesserEqual,
        (BinaryOperation::LesserEquals, Type::Real) => Opcode::RealLesserEqual,
        (BinaryOperation::Greater, Type::Integer) => Opcode::IntGreater,
        (BinaryOperation::Greater, Type::Real) => Opcode::RealGreater,
        (BinaryOperation::GreaterEquals, Type::Integer) => Opcode::IntGreaterEqual,
        (BinaryOperation::GreaterEquals, Type::Real) => Opcode::RealGreaterEqual,
        // No instruction compares Boolean or String operands
        _ => {
            return Err(Error::new(ErrorImpl::UnsupportedOperation {
                operation: operation.to_string(),
                operand: operand_type.to_string(),
            }))
        }
    };
    Ok(opcode)
}

/// The copy and accumulate opcodes for `+`, `-` and `*` producing `result_type`.
fn arithmetic_opcodes(operation: BinaryOperation, result_type: Type) -> (Opcode, Opcode) {
    let integer = result_type == Type::Integer;
    let accumulate = match (operation, integer) {
        (BinaryOperation::Minus, true) => Opcode::IntSubVarVar,
        (BinaryOperation::Minus, false) => Opcode::RealSubVarVar,
        (BinaryOperation::Star, true) => Opcode::IntMulVarVar,
        (BinaryOperation::Star, false) => Opcode::RealMulVarVar,
        (_, true) => Opcode::IntAddVarVar,
        (_, false) => Opcode::RealAddVarVar,
    };

    if integer {
        (Opcode::IntCopy, accumulate)
    } else {
        (Opcode::RealCopy, accumulate)
    }
}
