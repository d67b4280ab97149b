//! Reader for emitted program text.
//!
//! Parses the declarations block and the instruction lines back into
//! structured form, checking every mnemonic and operand list on the way.
//! [`Listing::validate`] then checks the program as a whole.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::{
    ast::{types::Type, value::Value},
    compiler::{
        instruction::{Label, OperandShape, Opcode},
        program::check_label_pairing,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::symbol_table::{BEGIN_VAR_DECL, END_VAR_DECL},
};

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(r"^    %var\t@([^,\s]+),([^,]+),(.*)$").unwrap();
    static ref INSTRUCTION: Regex =
        Regex::new(r"^(?:label([0-9]+)% :)?\t([A-Za-z]+)(?:\t(.+))?$").unwrap();
    static ref VARIABLE_OPERAND: Regex = Regex::new(r"^@([^,\s]+)$").unwrap();
    static ref ADDRESS_OPERAND: Regex = Regex::new(r"^label([0-9]+)%$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListedDeclaration {
    pub name: String,
    pub value: Value,
}

impl ListedDeclaration {
    pub fn ty(&self) -> Type {
        self.value.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListedOperand {
    Variable(String),
    Address(Label),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListedInstruction {
    pub label: Option<Label>,
    pub opcode: Opcode,
    pub operands: Vec<ListedOperand>,
}

impl ListedInstruction {
    pub fn jump_target(&self) -> Option<Label> {
        self.operands.iter().find_map(|operand| match operand {
            ListedOperand::Address(label) => Some(*label),
            ListedOperand::Variable(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    pub declarations: Vec<ListedDeclaration>,
    pub instructions: Vec<ListedInstruction>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    Declarations,
    Instructions,
}

impl Listing {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(text: &str) -> Result<Listing, Error> {
        let mut listing = Listing::default();
        let mut section = Section::Preamble;
        let mut line_count = 0;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            line_count = number;
            if line.trim().is_empty() {
                continue;
            }

            match section {
                Section::Preamble if line == BEGIN_VAR_DECL => section = Section::Declarations,
                Section::Preamble => return Err(malformed(number, line)),
                Section::Declarations if line == END_VAR_DECL => section = Section::Instructions,
                Section::Declarations => listing.declarations.push(parse_declaration(number, line)?),
                Section::Instructions => listing.instructions.push(parse_instruction(number, line)?),
            }
        }

        if section != Section::Instructions {
            return Err(malformed(line_count + 1, "<end of text>"));
        }

        tracing::debug!(
            declarations = listing.declarations.len(),
            instructions = listing.instructions.len(),
            "parsed listing"
        );
        Ok(listing)
    }

    /// Checks that every variable operand is declared exactly once and that
    /// the labels pair up.
    pub fn validate(&self) -> Result<(), Error> {
        let mut declared = HashSet::new();
        for declaration in &self.declarations {
            if !declared.insert(declaration.name.as_str()) {
                return Err(Error::new(ErrorImpl::VariableAlreadyDeclared {
                    variable: declaration.name.clone(),
                }));
            }
        }

        for instruction in &self.instructions {
            for operand in &instruction.operands {
                if let ListedOperand::Variable(name) = operand {
                    if !declared.contains(name.as_str()) {
                        return Err(Error::new(ErrorImpl::VariableNotDeclared {
                            variable: name.clone(),
                        }));
                    }
                }
            }
        }

        check_label_pairing(
            self.instructions.iter().filter_map(|instruction| instruction.label),
            self.instructions.iter().filter_map(ListedInstruction::jump_target),
        )
    }
}

fn malformed(line: usize, text: &str) -> Error {
    Error::new(ErrorImpl::MalformedListing {
        line,
        text: text.to_string(),
    })
}

fn parse_declaration(number: usize, line: &str) -> Result<ListedDeclaration, Error> {
    let captures = DECLARATION.captures(line).ok_or_else(|| malformed(number, line))?;

    let value = match Type::from_type_name(&captures[2]) {
        Some(ty) => parse_value(ty, &captures[3]),
        None => None,
    };

    match value {
        Some(value) => Ok(ListedDeclaration {
            name: captures[1].to_string(),
            value,
        }),
        None => Err(malformed(number, line)),
    }
}

fn parse_value(ty: Type, text: &str) -> Option<Value> {
    match ty {
        Type::Boolean => text.parse::<bool>().ok().map(Value::Boolean),
        Type::Integer => text.parse::<i64>().ok().map(Value::Integer),
        Type::Real => text.parse::<f64>().ok().map(Value::Real),
        Type::String => text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .and_then(unescape_string)
            .map(Value::from),
        Type::None => None,
    }
}

/// Inverse of `escape_string`. Unknown escapes and bare quotes are rejected.
fn unescape_string(text: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescaped.push(match chars.next()? {
                '\\' => '\\',
                '"' => '"',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                _ => return None,
            }),
            '"' => return None,
            c => unescaped.push(c),
        }
    }
    Some(unescaped)
}

fn parse_instruction(number: usize, line: &str) -> Result<ListedInstruction, Error> {
    let captures = INSTRUCTION.captures(line).ok_or_else(|| malformed(number, line))?;

    let label = match captures.get(1) {
        Some(digits) => Some(parse_label(digits.as_str()).ok_or_else(|| malformed(number, line))?),
        None => None,
    };
    let opcode = Opcode::from_mnemonic(&captures[2]).ok_or_else(|| malformed(number, line))?;

    let mut operands = vec![];
    if let Some(list) = captures.get(3) {
        for operand in list.as_str().split(',') {
            operands.push(parse_operand(operand).ok_or_else(|| malformed(number, line))?);
        }
    }

    let shape = operand_shape(&operands).ok_or_else(|| malformed(number, line))?;
    if shape != opcode.shape() {
        return Err(Error::new(ErrorImpl::OperandShapeMismatch {
            opcode: opcode.to_string(),
            expected: opcode.shape().to_string(),
            received: shape.to_string(),
        }));
    }

    Ok(ListedInstruction {
        label,
        opcode,
        operands,
    })
}

fn parse_label(digits: &str) -> Option<Label> {
    digits.parse::<u64>().ok().map(Label)
}

fn parse_operand(text: &str) -> Option<ListedOperand> {
    if let Some(captures) = VARIABLE_OPERAND.captures(text) {
        return Some(ListedOperand::Variable(captures[1].to_string()));
    }

    let captures = ADDRESS_OPERAND.captures(text)?;
    parse_label(&captures[1]).map(ListedOperand::Address)
}

fn operand_shape(operands: &[ListedOperand]) -> Option<OperandShape> {
    use ListedOperand::{Address as A, Variable as V};

    match operands {
        [] => Some(OperandShape::Nothing),
        [V(_)] => Some(OperandShape::Var),
        [V(_), V(_)] => Some(OperandShape::VarVar),
        [V(_), V(_), V(_)] => Some(OperandShape::VarVarVar),
        [A(_)] => Some(OperandShape::Addr),
        [V(_), A(_)] => Some(OperandShape::VarAddr),
        _ => None,
    }
}
