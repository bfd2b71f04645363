/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the expression tree
///
/// Submodules:
/// - ast: The node shapes and the tree enum
/// - visitor: The double-dispatch contract consumers implement
pub mod ast;
pub mod visitor;
