//! Unit tests for lowering and the instruction model.

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{BinaryOperation, Statement},
        types::Type,
        value::Value,
    },
    errors::errors::{ErrorImpl, ErrorKind},
    symbols::symbol_table::SymbolTable,
};

use super::{
    compiler::{compile, CompilerOptions, IfLowering},
    instruction::{Instruction, Label, LabelAllocator, OperandShape, Opcode},
    program::{validate_labels, Program},
};

fn lines(program: &Program) -> Vec<String> {
    program.instructions.iter().map(|i| i.to_string()).collect()
}

fn compile_default(statement: &Statement, symbols: &mut SymbolTable) -> Program {
    compile(statement, symbols, CompilerOptions::default()).unwrap()
}

fn binary(operation: BinaryOperation, left: impl Into<Value>, right: impl Into<Value>) -> Statement {
    Statement::binary(operation, Statement::constant(left), Statement::constant(right))
}

#[test]
fn test_writeln_of_mixed_sum() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(&Statement::print(binary(BinaryOperation::Plus, 1, 2.5), true), &mut symbols);

    assert_eq!(
        lines(&program),
        vec![
            "\tintToRealOp\t@_tempVar3,@_tempVar0",
            "\trealCopyOp\t@_tempVar2,@_tempVar3",
            "\trealAddVarVarOp\t@_tempVar2,@_tempVar1",
            "\tstdOutPrintLnOp\t@_tempVar2",
        ]
    );
    assert_eq!(
        symbols.serialize(),
        "  %beginVarDecl\n\
         \x20   %var\t@_tempVar0,Integer,1\n\
         \x20   %var\t@_tempVar1,Real,2.5\n\
         \x20   %var\t@_tempVar2,Real,0.0\n\
         \x20   %var\t@_tempVar3,Real,0.0\n\
         \x20 %endVarDecl\n"
    );
}

#[test]
fn test_program_text_is_declarations_then_instructions() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(&Statement::print(Statement::constant("hi"), false), &mut symbols);

    assert_eq!(
        program.to_string(),
        "  %beginVarDecl\n    %var\t@_tempVar0,String,\"hi\"\n  %endVarDecl\n\tstdOutPrintOp\t@_tempVar0\n"
    );
}

#[test]
fn test_while_loop_layout() {
    let mut symbols = SymbolTable::new();
    let i = symbols.declare("i", Type::Integer).unwrap();
    let statement = Statement::while_loop(
        Statement::binary(BinaryOperation::Lesser, Statement::variable(i.clone()), Statement::constant(3)),
        Statement::assign(
            i.clone(),
            Statement::binary(BinaryOperation::Plus, Statement::variable(i), Statement::constant(1)),
        ),
    );

    let program = compile_default(&statement, &mut symbols);
    assert_eq!(
        lines(&program),
        vec![
            "label0% :\tnoOp",
            "\tintLesserOp\t@_tempVar1,@i,@_tempVar0",
            "\tifFalseGotoOp\t@_tempVar1,label1%",
            "\tintCopyOp\t@_tempVar3,@i",
            "\tintAddVarVarOp\t@_tempVar3,@_tempVar2",
            "\tintCopyOp\t@i,@_tempVar3",
            "\tgotoOp\tlabel0%",
            "label1% :\tnoOp",
        ]
    );

    let labeled = program.instructions.iter().filter(|i| i.label().is_some()).count();
    assert_eq!(labeled, 2);
    assert!(validate_labels(&program.instructions).is_ok());
}

fn if_else(symbols: &mut SymbolTable) -> Statement {
    let flag = symbols.declare("flag", Type::Boolean).unwrap();
    Statement::if_then_else(
        Statement::variable(flag),
        Statement::print(Statement::constant(1), true),
        Statement::print(Statement::constant(2), true),
    )
}

#[test]
fn test_structured_if_else() {
    let mut symbols = SymbolTable::new();
    let statement = if_else(&mut symbols);

    let program = compile_default(&statement, &mut symbols);
    assert_eq!(
        lines(&program),
        vec![
            "\tifFalseGotoOp\t@flag,label0%",
            "\tstdOutPrintLnOp\t@_tempVar0",
            "\tgotoOp\tlabel1%",
            "label0% :\tnoOp",
            "\tstdOutPrintLnOp\t@_tempVar1",
            "label1% :\tnoOp",
        ]
    );
}

#[test]
fn test_structured_if_without_else() {
    let mut symbols = SymbolTable::new();
    let flag = symbols.declare("flag", Type::Boolean).unwrap();
    let statement = Statement::if_then(Statement::variable(flag), Statement::print(Statement::constant(1), false));

    let program = compile_default(&statement, &mut symbols);
    assert_eq!(
        lines(&program),
        vec![
            "\tifFalseGotoOp\t@flag,label0%",
            "\tstdOutPrintOp\t@_tempVar0",
            "label0% :\tnoOp",
        ]
    );
}

#[test]
fn test_legacy_if_leaves_the_false_jump_dangling() {
    let mut symbols = SymbolTable::new();
    let statement = if_else(&mut symbols);
    let options = CompilerOptions::default().with_if_lowering(IfLowering::Legacy);

    let error = compile(&statement, &mut symbols.clone(), options).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MalformedProgram);
    assert_eq!(error.get_error(), &ErrorImpl::DanglingLabel { label: 0 });

    let program = compile(&statement, &mut symbols, options.with_validate_labels(false)).unwrap();
    assert_eq!(
        lines(&program),
        vec![
            "\tifFalseGotoOp\t@flag,label0%",
            "\tstdOutPrintLnOp\t@_tempVar0",
            "\tgotoOp\tlabel1%",
            "label1% :\tnoOp",
        ]
    );
    // The else branch was never lowered, so its constant has no temporary
    assert!(symbols.lookup("_tempVar1").is_err());
}

#[test]
fn test_assignment_copies() {
    let mut symbols = SymbolTable::new();
    let r = symbols.declare("r", Type::Real).unwrap();
    let n = symbols.declare("n", Type::Integer).unwrap();
    let s = symbols.declare("s", Type::String).unwrap();
    let b = symbols.declare("b", Type::Boolean).unwrap();

    let statement = Statement::block(vec![
        Statement::assign(r.clone(), Statement::variable(n.clone())),
        Statement::assign(r.clone(), Statement::variable(r.clone())),
        Statement::assign(n.clone(), Statement::variable(n)),
        Statement::assign(s.clone(), Statement::variable(s)),
        Statement::assign(b.clone(), Statement::variable(b)),
    ]);

    let program = compile_default(&statement, &mut symbols);
    assert_eq!(
        lines(&program),
        vec![
            "\tintToRealOp\t@r,@n",
            "\trealCopyOp\t@r,@r",
            "\tintCopyOp\t@n,@n",
            "\tideaCopyOp\t@s,@s",
            "\tideaCopyOp\t@b,@b",
        ]
    );
    // References allocate nothing
    assert_eq!(symbols.len(), 4);
}

#[test]
fn test_mixed_comparison_converts_the_integer_side() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(
        &Statement::print(binary(BinaryOperation::Lesser, 1, 2.5), true),
        &mut symbols,
    );

    assert_eq!(
        &lines(&program)[..2],
        &[
            "\tintToRealOp\t@_tempVar3,@_tempVar0",
            "\trealLesserOp\t@_tempVar2,@_tempVar3,@_tempVar1",
        ]
    );
    assert_eq!(symbols.lookup("_tempVar2").unwrap().ty(), Type::Boolean);
}

#[test]
fn test_integer_comparison_needs_no_conversion() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(
        &Statement::print(binary(BinaryOperation::GreaterEquals, 1, 2), true),
        &mut symbols,
    );

    assert_eq!(lines(&program)[0], "\tintGreaterEqualOp\t@_tempVar2,@_tempVar0,@_tempVar1");
}

#[test]
fn test_slash_converts_both_integer_sides() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(&Statement::print(binary(BinaryOperation::Slash, 7, 2), true), &mut symbols);

    assert_eq!(
        lines(&program),
        vec![
            "\tintToRealOp\t@_tempVar3,@_tempVar0",
            "\tintToRealOp\t@_tempVar4,@_tempVar1",
            "\trealDivOp\t@_tempVar2,@_tempVar3,@_tempVar4",
            "\tstdOutPrintLnOp\t@_tempVar2",
        ]
    );
}

#[test]
fn test_integer_only_and_logical_operators() {
    let cases = [
        (binary(BinaryOperation::Div, 7, 2), "intDivOp"),
        (binary(BinaryOperation::Mod, 7, 2), "modOp"),
        (binary(BinaryOperation::And, true, false), "logicAndOp"),
        (binary(BinaryOperation::Or, true, false), "logicOrOp"),
    ];

    for (expression, mnemonic) in cases {
        let mut symbols = SymbolTable::new();
        let program = compile_default(&Statement::print(expression, true), &mut symbols);
        assert_eq!(
            lines(&program)[0],
            format!("\t{}\t@_tempVar2,@_tempVar0,@_tempVar1", mnemonic)
        );
    }
}

#[test]
fn test_integer_arithmetic_copies_then_accumulates() {
    let cases = [
        (BinaryOperation::Plus, "intAddVarVarOp"),
        (BinaryOperation::Minus, "intSubVarVarOp"),
        (BinaryOperation::Star, "intMulVarVarOp"),
    ];

    for (operation, mnemonic) in cases {
        let mut symbols = SymbolTable::new();
        let program = compile_default(&Statement::print(binary(operation, 6, 3), true), &mut symbols);
        assert_eq!(
            &lines(&program)[..2],
            &[
                String::from("\tintCopyOp\t@_tempVar2,@_tempVar0"),
                format!("\t{}\t@_tempVar2,@_tempVar1", mnemonic),
            ]
        );
    }
}

#[test]
fn test_not() {
    let mut symbols = SymbolTable::new();
    let program = compile_default(&Statement::print(Statement::not(Statement::constant(true)), true), &mut symbols);

    assert_eq!(
        lines(&program),
        vec!["\tlogicNotOp\t@_tempVar1,@_tempVar0", "\tstdOutPrintLnOp\t@_tempVar1"]
    );
}

#[test]
fn test_string_comparison_is_not_lowered() {
    let mut symbols = SymbolTable::new();
    let statement = Statement::print(binary(BinaryOperation::Equals, "a", "b"), true);

    // Well typed, but no instruction compares strings
    assert!(statement.check().is_ok());
    let error = compile(&statement, &mut symbols, CompilerOptions::default()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_compile_rejects_ill_typed_trees_before_lowering() {
    let mut symbols = SymbolTable::new();
    let x = symbols.declare("x", Type::Integer).unwrap();

    let error = compile(
        &Statement::assign(x, Statement::constant("text")),
        &mut symbols,
        CompilerOptions::default(),
    )
    .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(symbols.len(), 1);
}

#[test]
fn test_reference_to_foreign_variable_fails() {
    let mut other = SymbolTable::new();
    let stray = other.declare("stray", Type::Integer).unwrap();

    let mut symbols = SymbolTable::new();
    let error = compile(
        &Statement::print(Statement::variable(stray), true),
        &mut symbols,
        CompilerOptions::default(),
    )
    .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UndeclaredVariable);
}

#[test]
fn test_labels_increase() {
    let mut labels = LabelAllocator::new();
    assert_eq!(labels.next_label(), Label(0));
    assert_eq!(labels.next_label(), Label(1));
    assert_eq!(labels.next_label().to_string(), "label2%");
}

#[test]
fn test_instruction_shapes_are_checked() {
    let mut symbols = SymbolTable::new();
    let n = symbols.declare("n", Type::Integer).unwrap();

    let error = Instruction::var(Opcode::Goto, n.clone()).unwrap_err();
    assert_eq!(error.get_error_name(), "OperandShapeMismatch");
    assert!(Instruction::var_var(Opcode::IntClear, n.clone(), n.clone()).is_err());
    assert!(Instruction::var(Opcode::IntClear, n).is_ok());
}

#[test]
fn test_instruction_text() {
    let mut symbols = SymbolTable::new();
    let n = symbols.declare("n", Type::Integer).unwrap();

    assert_eq!(Instruction::no_op().to_string(), "\tnoOp");
    assert_eq!(Instruction::no_op().with_label(Label(3)).to_string(), "label3% :\tnoOp");
    assert_eq!(
        Instruction::var_addr(Opcode::IfTrueGoto, n.clone(), Label(4)).unwrap().to_string(),
        "\tifTrueGotoOp\t@n,label4%"
    );
    assert_eq!(
        Instruction::var(Opcode::IntClear, n).unwrap().with_label(Label(1)).to_string(),
        "label1% :\tintClearOp\t@n"
    );
}

#[test]
fn test_mnemonic_lookup() {
    for opcode in Opcode::ALL {
        assert_eq!(Opcode::from_mnemonic(opcode.mnemonic()), Some(*opcode));
    }
    assert_eq!(Opcode::ALL.len(), 38);
    assert_eq!(Opcode::from_mnemonic("jumpOp"), None);
    assert_eq!(Opcode::IfFalseGoto.shape(), OperandShape::VarAddr);
    assert_eq!(Opcode::NoOp.shape(), OperandShape::Nothing);
}

#[test]
fn test_validate_labels() {
    let attached = Instruction::no_op().with_label(Label(0));
    let jump = Instruction::addr(Opcode::Goto, Label(0)).unwrap();

    assert!(validate_labels(&[jump.clone(), attached.clone()]).is_ok());
    assert_eq!(
        validate_labels(&[jump.clone()]).unwrap_err().get_error(),
        &ErrorImpl::DanglingLabel { label: 0 }
    );
    assert_eq!(
        validate_labels(&[attached.clone(), jump, attached]).unwrap_err().get_error(),
        &ErrorImpl::DuplicateLabel { label: 0 }
    );
    assert!(validate_labels(&[]).is_ok());
}
