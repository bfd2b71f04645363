//! Parser module for building an expression tree.
//!
//! This module contains the operator-precedence parse engines that transform
//! a stream of tokens into an expression tree. It provides:
//!
//! - The operator table of binding powers and semantics (`lookups`)
//! - A peekable cursor over the token stream (`cursor`)
//! - The `ParseEngine` capability and shared error plumbing (`parser`)
//! - Three interchangeable strategies: recursive precedence climbing,
//!   an explicit-stack rewrite of it, and a shunting yard
//!
//! All strategies produce identical trees and identical errors.

pub mod cursor;
pub mod iterative;
pub mod lookups;
pub mod parser;
pub mod recursive;
pub mod shunting_yard;

#[cfg(test)]
mod tests;
