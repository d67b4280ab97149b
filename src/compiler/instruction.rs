use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{
    errors::errors::{Error, ErrorImpl},
    symbols::{symbol_table::VAR_PREFIX_CHAR, variable::VarHandle},
    MK_OPCODES,
};

lazy_static! {
    pub static ref MNEMONIC_LOOKUP: HashMap<&'static str, Opcode> = {
        let mut map = HashMap::new();
        for opcode in Opcode::ALL {
            map.insert(opcode.mnemonic(), *opcode);
        }
        map
    };
}

/// The operand layout an opcode expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    Nothing,
    Var,
    VarVar,
    VarVarVar,
    Addr,
    VarAddr,
}

impl Display for OperandShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            OperandShape::Nothing => "no",
            OperandShape::Var => "one variable",
            OperandShape::VarVar => "two variable",
            OperandShape::VarVarVar => "three variable",
            OperandShape::Addr => "one address",
            OperandShape::VarAddr => "variable and address",
        };
        write!(f, "{}", description)
    }
}

MK_OPCODES! {
    NoOp => "noOp", Nothing;

    BoolClear => "boolClearOp", Var;
    IntClear => "intClearOp", Var;
    RealClear => "realClearOp", Var;
    StdOutPrint => "stdOutPrintOp", Var;
    StdOutPrintLn => "stdOutPrintLnOp", Var;

    IntCopy => "intCopyOp", VarVar;
    RealCopy => "realCopyOp", VarVar;
    IdeaCopy => "ideaCopyOp", VarVar;
    IntAddVarVar => "intAddVarVarOp", VarVar;
    RealAddVarVar => "realAddVarVarOp", VarVar;
    IntSubVarVar => "intSubVarVarOp", VarVar;
    RealSubVarVar => "realSubVarVarOp", VarVar;
    IntMulVarVar => "intMulVarVarOp", VarVar;
    RealMulVarVar => "realMulVarVarOp", VarVar;
    LogicNot => "logicNotOp", VarVar;
    IntToReal => "intToRealOp", VarVar;

    IntDiv => "intDivOp", VarVarVar;
    RealDiv => "realDivOp", VarVarVar;
    Mod => "modOp", VarVarVar;
    LogicAnd => "logicAndOp", VarVarVar;
    LogicOr => "logicOrOp", VarVarVar;
    IntEqual => "intEqualOp", VarVarVar;
    IntNotEqual => "intNotEqualOp", VarVarVar;
    RealEqual => "realEqualOp", VarVarVar;
    RealNotEqual => "realNotEqualOp", VarVarVar;
    IntLesser => "intLesserOp", VarVarVar;
    RealLesser => "realLesserOp", VarVarVar;
    IntLesserEqual => "intLesserEqualOp", VarVarVar;
    RealLesserEqual => "realLesserEqualOp", VarVarVar;
    IntGreater => "intGreaterOp", VarVarVar;
    RealGreater => "realGreaterOp", VarVarVar;
    IntGreaterEqual => "intGreaterEqualOp", VarVarVar;
    RealGreaterEqual => "realGreaterEqualOp", VarVarVar;

    Goto => "gotoOp", Addr;
    AddrLabel => "addrLabelOp", Addr;

    IfFalseGoto => "ifFalseGotoOp", VarAddr;
    IfTrueGoto => "ifTrueGotoOp", VarAddr;
}

impl Opcode {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        MNEMONIC_LOOKUP.get(mnemonic).copied()
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// A jump target. Rendered as `label<N>%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u64);

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "label{}%", self.0)
    }
}

/// Hands out labels with strictly increasing numbers, starting at 0.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u64,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_label(&mut self) -> Label {
        let label = Label(self.next);
        self.next += 1;
        label
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operands {
    Nothing,
    Var(VarHandle),
    VarVar(VarHandle, VarHandle),
    VarVarVar(VarHandle, VarHandle, VarHandle),
    Addr(Label),
    VarAddr(VarHandle, Label),
}

impl Operands {
    pub fn shape(&self) -> OperandShape {
        match self {
            Operands::Nothing => OperandShape::Nothing,
            Operands::Var(_) => OperandShape::Var,
            Operands::VarVar(..) => OperandShape::VarVar,
            Operands::VarVarVar(..) => OperandShape::VarVarVar,
            Operands::Addr(_) => OperandShape::Addr,
            Operands::VarAddr(..) => OperandShape::VarAddr,
        }
    }

    /// Variable operands, in operand order.
    pub fn variables(&self) -> Vec<&VarHandle> {
        match self {
            Operands::Nothing | Operands::Addr(_) => vec![],
            Operands::Var(var) | Operands::VarAddr(var, _) => vec![var],
            Operands::VarVar(dest, src) => vec![dest, src],
            Operands::VarVarVar(dest, left, right) => vec![dest, left, right],
        }
    }

    pub fn address(&self) -> Option<Label> {
        match self {
            Operands::Addr(label) | Operands::VarAddr(_, label) => Some(*label),
            _ => None,
        }
    }
}

impl Display for Operands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self
            .variables()
            .iter()
            .map(|var| format!("{}{}", VAR_PREFIX_CHAR, var.name()))
            .collect();
        if let Some(label) = self.address() {
            parts.push(label.to_string());
        }
        write!(f, "{}", parts.join(","))
    }
}

/// One line of the assembly-like output.
///
/// The operands always match the shape of the opcode; every constructor
/// checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    opcode: Opcode,
    operands: Operands,
    label: Option<Label>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Operands) -> Result<Self, Error> {
        if opcode.shape() != operands.shape() {
            return Err(Error::new(ErrorImpl::OperandShapeMismatch {
                opcode: opcode.to_string(),
                expected: opcode.shape().to_string(),
                received: operands.shape().to_string(),
            }));
        }

        Ok(Instruction {
            opcode,
            operands,
            label: None,
        })
    }

    /// The placeholder instruction labels are attached to.
    pub fn no_op() -> Self {
        Instruction {
            opcode: Opcode::NoOp,
            operands: Operands::Nothing,
            label: None,
        }
    }

    pub fn var(opcode: Opcode, var: VarHandle) -> Result<Self, Error> {
        Self::new(opcode, Operands::Var(var))
    }

    pub fn var_var(opcode: Opcode, dest: VarHandle, src: VarHandle) -> Result<Self, Error> {
        Self::new(opcode, Operands::VarVar(dest, src))
    }

    pub fn var_var_var(
        opcode: Opcode,
        dest: VarHandle,
        left: VarHandle,
        right: VarHandle,
    ) -> Result<Self, Error> {
        Self::new(opcode, Operands::VarVarVar(dest, left, right))
    }

    pub fn addr(opcode: Opcode, target: Label) -> Result<Self, Error> {
        Self::new(opcode, Operands::Addr(target))
    }

    pub fn var_addr(opcode: Opcode, var: VarHandle, target: Label) -> Result<Self, Error> {
        Self::new(opcode, Operands::VarAddr(var, target))
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn operands(&self) -> &Operands {
        &self.operands
    }

    pub fn label(&self) -> Option<Label> {
        self.label
    }

    /// The label this instruction may jump to.
    pub fn jump_target(&self) -> Option<Label> {
        self.operands.address()
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(label) = self.label {
            write!(f, "{} :", label)?;
        }
        write!(f, "\t{}", self.opcode)?;
        if !matches!(self.operands, Operands::Nothing) {
            write!(f, "\t{}", self.operands)?;
        }
        Ok(())
    }
}
