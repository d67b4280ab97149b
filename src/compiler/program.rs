use std::{collections::HashSet, fmt::Display};

use crate::{
    errors::errors::{Error, ErrorImpl},
    symbols::{symbol_table::write_declarations, variable::Variable},
};

use super::instruction::{Instruction, Label};

/// The output of one compilation: the declarations block and the
/// instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Variable>,
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Checks the label pairing of the instruction sequence.
    pub fn validate(&self) -> Result<(), Error> {
        validate_labels(&self.instructions)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_declarations(&self.declarations, f)?;
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Every label is attached to at most one instruction, and every jump
/// target is attached to exactly one.
pub fn validate_labels(instructions: &[Instruction]) -> Result<(), Error> {
    check_label_pairing(
        instructions.iter().filter_map(Instruction::label),
        instructions.iter().filter_map(Instruction::jump_target),
    )
}

/// Label check over the attached labels and the jump targets of any
/// instruction sequence, in order.
pub fn check_label_pairing(
    attached: impl IntoIterator<Item = Label>,
    targets: impl IntoIterator<Item = Label>,
) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for label in attached {
        if !seen.insert(label) {
            return Err(Error::new(ErrorImpl::DuplicateLabel { label: label.0 }));
        }
    }

    match targets.into_iter().find(|target| !seen.contains(target)) {
        Some(label) => {
            tracing::debug!(%label, "dangling jump target");
            Err(Error::new(ErrorImpl::DanglingLabel { label: label.0 }))
        }
        None => Ok(()),
    }
}
