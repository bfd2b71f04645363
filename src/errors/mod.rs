//! Error types and error handling for the calculator.
//!
//! This module defines the error types used by every phase:
//!
//! - Error structures with an optional source offset
//! - Specific error variants for tokenizing, parsing and evaluation
//! - Error names and suggestions for diagnostics

pub mod errors;
