use crate::{
    ast::{ast::Statement, types::Type},
    errors::errors::{Error, ErrorImpl},
    symbols::variable::VarHandle,
};

use super::{
    compiler::{Compiler, IfLowering},
    instruction::{Instruction, Opcode},
};

pub fn gen_if(
    compiler: &mut Compiler,
    condition: &Statement,
    then_branch: &Statement,
    else_branch: Option<&Statement>,
) -> Result<(), Error> {
    let condition = compiler.lower_value(condition, "if")?;

    match compiler.options.if_lowering {
        IfLowering::Structured => {
            let else_label = compiler.next_label();
            let end_label = else_branch.map(|_| compiler.next_label());

            compiler.emit(Instruction::var_addr(Opcode::IfFalseGoto, condition, else_label)?);
            then_branch.to_assembly(compiler)?;

            match (else_branch, end_label) {
                (Some(else_branch), Some(end_label)) => {
                    compiler.emit(Instruction::addr(Opcode::Goto, end_label)?);
                    compiler.attach(else_label);
                    else_branch.to_assembly(compiler)?;
                    compiler.attach(end_label);
                }
                _ => compiler.attach(else_label),
            }
        }
        IfLowering::Legacy => {
            let else_start = compiler.next_label();
            let if_end = else_branch.map(|_| compiler.next_label());

            compiler.emit(Instruction::var_addr(Opcode::IfFalseGoto, condition, else_start)?);
            then_branch.to_assembly(compiler)?;

            // The else branch itself is not emitted, and else_start stays unattached
            if let Some(if_end) = if_end {
                compiler.emit(Instruction::addr(Opcode::Goto, if_end)?);
                compiler.attach(if_end);
            }
        }
    }

    Ok(())
}

pub fn gen_while(compiler: &mut Compiler, condition: &Statement, body: &Statement) -> Result<(), Error> {
    let begin = compiler.next_label();
    let end = compiler.next_label();

    compiler.attach(begin);
    let condition = compiler.lower_value(condition, "while")?;
    compiler.emit(Instruction::var_addr(Opcode::IfFalseGoto, condition, end)?);
    body.to_assembly(compiler)?;
    compiler.emit(Instruction::addr(Opcode::Goto, begin)?);
    compiler.attach(end);

    Ok(())
}

pub fn gen_assign(compiler: &mut Compiler, target: &VarHandle, value: &Statement) -> Result<(), Error> {
    let source = compiler.lower_value(value, ":=")?;

    let opcode = match (target.ty(), source.ty()) {
        (Type::Real, Type::Real) => Opcode::RealCopy,
        (Type::Integer, Type::Integer) => Opcode::IntCopy,
        (Type::Real, Type::Integer) => Opcode::IntToReal,
        (expected, received) if expected == received => Opcode::IdeaCopy,
        (expected, received) => {
            return Err(Error::new(ErrorImpl::InvalidAssignment {
                variable: target.name().to_string(),
                expected: expected.to_string(),
                received: received.to_string(),
            }))
        }
    };

    compiler.emit(Instruction::var_var(opcode, target.clone(), source)?);
    Ok(())
}

pub fn gen_print(compiler: &mut Compiler, expression: &Statement, newline: bool) -> Result<(), Error> {
    let var = compiler.lower_value(expression, if newline { "writeln" } else { "write" })?;
    let opcode = if newline {
        Opcode::StdOutPrintLn
    } else {
        Opcode::StdOutPrint
    };

    compiler.emit(Instruction::var(opcode, var)?);
    Ok(())
}
