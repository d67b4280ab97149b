use std::{collections::HashMap, fmt::Write, slice::Iter};

use crate::{
    ast::{types::Type, value::Value},
    errors::errors::{Error, ErrorImpl},
};

use super::variable::{VarHandle, Variable};

/// Prefix written before every variable name in program text.
pub const VAR_PREFIX_CHAR: char = '@';

pub const DEFAULT_TEMP_PREFIX: &str = "_tempVar";

pub const BEGIN_VAR_DECL: &str = "  %beginVarDecl";
pub const END_VAR_DECL: &str = "  %endVarDecl";
pub const VAR_DECL: &str = "    %var";

/// Registry of every variable of one compilation unit.
///
/// Variables are kept in registration order, which is also the order of the
/// declarations block.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    variables: Vec<Variable>,
    variable_lookup: HashMap<String, usize>,
    temp_prefix: String,
    next_temp_index: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_temp_prefix(DEFAULT_TEMP_PREFIX)
    }

    pub fn with_temp_prefix(prefix: impl Into<String>) -> Self {
        SymbolTable {
            variables: vec![],
            variable_lookup: HashMap::new(),
            temp_prefix: prefix.into(),
            next_temp_index: 0,
        }
    }

    /// Declares `name` with type `ty`, initialised to the type's zero value.
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) -> Result<VarHandle, Error> {
        let name = name.into();
        if self.variable_lookup.contains_key(&name) {
            return Err(Error::new(ErrorImpl::VariableAlreadyDeclared { variable: name }));
        }

        let variable = Variable::new(name, ty)?;
        tracing::debug!(name = variable.name(), ty = %ty, "declared variable");
        Ok(self.register(variable))
    }

    /// Returns the handle of an already declared variable.
    pub fn lookup(&self, name: &str) -> Result<VarHandle, Error> {
        self.get(name).map(Variable::handle)
    }

    pub fn get(&self, name: &str) -> Result<&Variable, Error> {
        match self.variable_lookup.get(name) {
            Some(index) => Ok(&self.variables[*index]),
            None => Err(Error::new(ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            })),
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Variable, Error> {
        match self.variable_lookup.get(name) {
            Some(index) => Ok(&mut self.variables[*index]),
            None => Err(Error::new(ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            })),
        }
    }

    pub fn value_of(&self, handle: &VarHandle) -> Result<&Value, Error> {
        self.get(handle.name()).map(Variable::value)
    }

    /// Stores `value` into the variable behind `handle`.
    pub fn assign(&mut self, handle: &VarHandle, value: Value) -> Result<(), Error> {
        self.get_mut(handle.name())?.set_value(value)
    }

    /// Registers a fresh temporary of type `ty`.
    pub fn obtain_temp(&mut self, ty: Type) -> Result<VarHandle, Error> {
        let name = self.next_temp_name();
        let variable = Variable::new(name, ty)?;
        tracing::debug!(name = variable.name(), ty = %ty, "obtained temporary");
        Ok(self.register(variable))
    }

    /// Registers a fresh temporary initialised to `value`.
    pub fn obtain_temp_with_value(&mut self, value: Value) -> VarHandle {
        let name = self.next_temp_name();
        let variable = Variable::with_value(name, value);
        tracing::debug!(name = variable.name(), value = %variable.value(), "obtained temporary");
        self.register(variable)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn iter(&self) -> Iter<'_, Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Renders the declarations block for every registered variable.
    pub fn serialize(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = self.write_declarations(&mut text);
        text
    }

    pub fn write_declarations(&self, out: &mut impl Write) -> std::fmt::Result {
        write_declarations(&self.variables, out)
    }

    fn register(&mut self, variable: Variable) -> VarHandle {
        let handle = variable.handle();
        self.variable_lookup
            .insert(variable.name().to_string(), self.variables.len());
        self.variables.push(variable);
        handle
    }

    fn next_temp_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.temp_prefix, self.next_temp_index);
            self.next_temp_index += 1;
            if !self.variable_lookup.contains_key(&name) {
                return name;
            }
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the declarations block for `variables`, markers included.
pub fn write_declarations<'v>(
    variables: impl IntoIterator<Item = &'v Variable>,
    out: &mut impl Write,
) -> std::fmt::Result {
    writeln!(out, "{}", BEGIN_VAR_DECL)?;
    for variable in variables {
        writeln!(out, "{}", declaration_line(variable))?;
    }
    writeln!(out, "{}", END_VAR_DECL)
}

/// One `%var` line of the declarations block. String values are quoted and
/// escaped so each declaration stays on one line.
pub fn declaration_line(variable: &Variable) -> String {
    let value = match variable.value() {
        Value::String(string) => format!("\"{}\"", escape_string(string)),
        value => value.to_string(),
    };

    format!(
        "{}\t{}{},{},{}",
        VAR_DECL,
        VAR_PREFIX_CHAR,
        variable.name(),
        variable.ty().type_name(),
        value
    )
}

/// Escapes `\`, `"`, line breaks and tabs with a backslash.
pub fn escape_string(string: &str) -> String {
    let mut escaped = String::with_capacity(string.len());
    for c in string.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
