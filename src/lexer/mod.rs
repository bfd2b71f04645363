//! Lexical analysis module for the calculator.
//!
//! This module contains the lexer (tokenizer) that converts an expression
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization with a single regex of named groups
//! - Recognition of numbers, operator symbols and parentheses
//! - Token position tracking for error reporting
//! - Whitespace skipping and unrecognised-text detection

pub mod lexer;
pub mod tokens;
