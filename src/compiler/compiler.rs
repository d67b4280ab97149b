//! Lowering context.
//!
//! The [`Compiler`] borrows the symbol table of the compilation unit and
//! collects instructions as the tree is walked. Temporaries and labels are
//! allocated through it, so two compilations never share naming state
//! unless they share a table.

use crate::{
    ast::ast::Statement,
    errors::errors::{Error, ErrorImpl},
    symbols::{symbol_table::SymbolTable, variable::VarHandle},
    type_checker::type_checker::type_check,
};

use super::{
    expr::{gen_binary, gen_constant, gen_unary, gen_variable},
    instruction::{Instruction, Label, LabelAllocator},
    program::Program,
    stmt::{gen_assign, gen_if, gen_print, gen_while},
};

/// How `if` statements are lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IfLowering {
    /// Both branches are emitted and every jump target is attached.
    #[default]
    Structured,
    /// The historical layout: the else branch is never emitted and the
    /// false-jump target is never attached.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    pub if_lowering: IfLowering,
    /// Run the label check on the finished program.
    pub validate_labels: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            if_lowering: IfLowering::Structured,
            validate_labels: true,
        }
    }
}

impl CompilerOptions {
    pub fn with_if_lowering(mut self, if_lowering: IfLowering) -> Self {
        self.if_lowering = if_lowering;
        self
    }

    pub fn with_validate_labels(mut self, validate_labels: bool) -> Self {
        self.validate_labels = validate_labels;
        self
    }
}

pub struct Compiler<'a> {
    pub symbols: &'a mut SymbolTable,
    pub labels: LabelAllocator,
    pub options: CompilerOptions,
    pub instructions: Vec<Instruction>,
}

impl<'a> Compiler<'a> {
    pub fn new(symbols: &'a mut SymbolTable, options: CompilerOptions) -> Self {
        Compiler {
            symbols,
            labels: LabelAllocator::new(),
            options,
            instructions: vec![],
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        tracing::trace!(%instruction, "emit");
        self.instructions.push(instruction);
    }

    pub fn next_label(&mut self) -> Label {
        let label = self.labels.next_label();
        tracing::debug!(%label, "allocated label");
        label
    }

    /// Emits a no-op carrying `label`.
    pub fn attach(&mut self, label: Label) {
        self.emit(Instruction::no_op().with_label(label));
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn lower(&mut self, statement: &Statement) -> Result<Option<VarHandle>, Error> {
        statement.to_assembly(self)
    }

    /// Lowers an expression that must produce a value.
    pub fn lower_value(&mut self, statement: &Statement, construct: &str) -> Result<VarHandle, Error> {
        match statement.to_assembly(self)? {
            Some(var) => Ok(var),
            None => Err(Error::new(ErrorImpl::MissingValue {
                construct: construct.to_string(),
            })),
        }
    }

    /// Snapshots the symbol table and hands over the instructions.
    pub fn finish(self) -> Program {
        Program {
            declarations: self.symbols.variables().to_vec(),
            instructions: self.instructions,
        }
    }
}

impl Statement {
    /// Appends the instructions of the node to `compiler`.
    ///
    /// Returns the variable holding the result of an expression, or `None`
    /// for statements.
    pub fn to_assembly(&self, compiler: &mut Compiler) -> Result<Option<VarHandle>, Error> {
        match self {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                gen_if(compiler, condition, then_branch, else_branch.as_deref())?;
                Ok(None)
            }
            Statement::While { condition, body } => {
                gen_while(compiler, condition, body)?;
                Ok(None)
            }
            Statement::Block(statements) => {
                for statement in statements {
                    statement.to_assembly(compiler)?;
                }
                Ok(None)
            }
            Statement::Assign { target, value } => {
                gen_assign(compiler, target, value)?;
                Ok(None)
            }
            Statement::Print {
                expression,
                newline,
            } => {
                gen_print(compiler, expression, *newline)?;
                Ok(None)
            }
            Statement::VariableRef(handle) => gen_variable(compiler, handle).map(Some),
            Statement::UnaryOp { operation, operand } => {
                gen_unary(compiler, *operation, operand).map(Some)
            }
            Statement::BinaryOp {
                operation,
                left,
                right,
            } => gen_binary(compiler, self, *operation, left, right).map(Some),
            Statement::Constant(value) => Ok(Some(gen_constant(compiler, value))),
        }
    }
}

/// Type checks `statement` and lowers it against `symbols`.
///
/// Temporaries are registered in `symbols`, so the returned program's
/// declarations include them.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(
    statement: &Statement,
    symbols: &mut SymbolTable,
    options: CompilerOptions,
) -> Result<Program, Error> {
    type_check(statement)?;

    let mut compiler = Compiler::new(symbols, options);
    compiler.lower(statement)?;
    let program = compiler.finish();
    tracing::debug!(
        instructions = program.instructions.len(),
        declarations = program.declarations.len(),
        "lowered program"
    );

    if options.validate_labels {
        program.validate()?;
    }

    Ok(program)
}
