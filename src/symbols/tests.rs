//! Unit tests for variables and the symbol table.

use std::collections::HashSet;

use crate::{
    ast::{types::Type, value::Value},
    errors::errors::ErrorKind,
};

use super::{symbol_table::SymbolTable, variable::Variable};

#[test]
fn test_declare_initialises_zero_values() {
    let mut symbols = SymbolTable::new();
    let flag = symbols.declare("flag", Type::Boolean).unwrap();
    let count = symbols.declare("count", Type::Integer).unwrap();
    let ratio = symbols.declare("ratio", Type::Real).unwrap();
    let name = symbols.declare("name", Type::String).unwrap();

    assert_eq!(symbols.value_of(&flag).unwrap(), &Value::Boolean(false));
    assert_eq!(symbols.value_of(&count).unwrap(), &Value::Integer(0));
    assert_eq!(symbols.value_of(&ratio).unwrap(), &Value::Real(0.0));
    assert_eq!(symbols.value_of(&name).unwrap(), &Value::String(String::new()));
    assert_eq!(count.ty(), Type::Integer);
}

#[test]
fn test_redeclaration_fails() {
    let mut symbols = SymbolTable::new();
    symbols.declare("x", Type::Integer).unwrap();

    let error = symbols.declare("x", Type::Integer).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Redeclaration);

    // A different type does not make it a new variable
    let error = symbols.declare("x", Type::Real).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Redeclaration);
    assert_eq!(symbols.lookup("x").unwrap().ty(), Type::Integer);
}

#[test]
fn test_lookup_of_undeclared_name_fails() {
    let symbols = SymbolTable::new();
    let error = symbols.lookup("missing").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UndeclaredVariable);
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_declaring_without_a_type_fails() {
    let mut symbols = SymbolTable::new();
    let error = symbols.declare("nothing", Type::None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnsupportedOperation);
    assert!(symbols.lookup("nothing").is_err());
}

#[test]
fn test_set_value_never_changes_the_type() {
    let mut variable = Variable::new("r", Type::Real).unwrap();

    variable.set_value(Value::Real(2.5)).unwrap();
    assert_eq!(variable.value(), &Value::Real(2.5));

    let error = variable.set_value(Value::Integer(2)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(variable.ty(), Type::Real);
    assert_eq!(variable.value(), &Value::Real(2.5));

    assert!(variable.set_value(Value::Boolean(true)).is_err());
    assert!(variable.set_value(Value::from("text")).is_err());
    assert_eq!(variable.ty(), Type::Real);
}

#[test]
fn test_assign_through_handle() {
    let mut symbols = SymbolTable::new();
    let x = symbols.declare("x", Type::Integer).unwrap();

    symbols.assign(&x, Value::Integer(7)).unwrap();
    assert_eq!(symbols.value_of(&x).unwrap(), &Value::Integer(7));
    assert!(symbols.assign(&x, Value::Real(7.0)).is_err());
}

#[test]
fn test_temporaries_are_unique() {
    let mut symbols = SymbolTable::new();
    let mut names = HashSet::new();

    for _ in 0..50 {
        let temp = symbols.obtain_temp(Type::Integer).unwrap();
        assert!(names.insert(temp.name().to_string()));
    }
    let valued = symbols.obtain_temp_with_value(Value::Real(1.5));
    assert!(names.insert(valued.name().to_string()));

    assert_eq!(symbols.len(), 51);
}

#[test]
fn test_temporary_names_follow_the_counter() {
    let mut symbols = SymbolTable::new();

    assert_eq!(symbols.obtain_temp(Type::Boolean).unwrap().name(), "_tempVar0");
    assert_eq!(symbols.obtain_temp_with_value(Value::Integer(4)).name(), "_tempVar1");
    assert_eq!(symbols.obtain_temp(Type::Real).unwrap().name(), "_tempVar2");
}

#[test]
fn test_temporaries_skip_user_names() {
    let mut symbols = SymbolTable::new();
    symbols.declare("_tempVar0", Type::Integer).unwrap();

    let temp = symbols.obtain_temp(Type::Integer).unwrap();
    assert_eq!(temp.name(), "_tempVar1");
}

#[test]
fn test_custom_temp_prefix() {
    let mut symbols = SymbolTable::with_temp_prefix("t");

    assert_eq!(symbols.obtain_temp(Type::Integer).unwrap().name(), "t0");
}

#[test]
fn test_independent_tables_do_not_share_counters() {
    let mut first = SymbolTable::new();
    let mut second = SymbolTable::new();

    first.obtain_temp(Type::Integer).unwrap();
    first.obtain_temp(Type::Integer).unwrap();

    assert_eq!(second.obtain_temp(Type::Integer).unwrap().name(), "_tempVar0");
    assert!(second.lookup("_tempVar1").is_err());
}

#[test]
fn test_serialize_declarations() {
    let mut symbols = SymbolTable::new();
    symbols.declare("x", Type::Integer).unwrap();
    let greeting = symbols.declare("greeting", Type::String).unwrap();
    symbols.assign(&greeting, Value::from("hi there")).unwrap();
    symbols.obtain_temp_with_value(Value::Real(2.5));
    symbols.obtain_temp(Type::Boolean).unwrap();

    assert_eq!(
        symbols.serialize(),
        "  %beginVarDecl\n\
         \x20   %var\t@x,Integer,0\n\
         \x20   %var\t@greeting,String,\"hi there\"\n\
         \x20   %var\t@_tempVar0,Real,2.5\n\
         \x20   %var\t@_tempVar1,Boolean,false\n\
         \x20 %endVarDecl\n"
    );
}

#[test]
fn test_serialize_empty_table() {
    let symbols = SymbolTable::new();

    assert!(symbols.is_empty());
    assert_eq!(symbols.serialize(), "  %beginVarDecl\n  %endVarDecl\n");
}
