/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the program tree
///
/// Submodules:
/// - ast: The statement node kinds and the operators they use
/// - types: The static type tags
/// - value: Runtime values produced by interpretation
pub mod ast;
pub mod types;
pub mod value;
