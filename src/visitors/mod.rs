//! Consumers of expression trees.
//!
//! - evaluator: computes the integer value of a tree
//! - printer: renders a tree as an s-expression or as canonical infix text

pub mod evaluator;
pub mod printer;
