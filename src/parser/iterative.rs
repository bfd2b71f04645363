//! Precedence climbing without recursion.
//!
//! Where the recursive parser keeps pending operators in its call frames,
//! this parser keeps them on a heap-allocated stack of continuations. Each
//! frame records the threshold at which it yields to a lower-precedence
//! operator and what to build once its right-hand side is known. Nesting
//! depth is limited only by memory.

use std::fmt::Display;

use crate::{
    ast::ast::Expr,
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    cursor::TokenCursor,
    lookups::{BindingPower, OperatorTable, PAREN_BINDING_POWER, STACK_BASE_BINDING_POWER},
    parser::{
        binary_operator, expected_operator, expected_operator_or_right_paren, parse_literal,
        prefix_operator, unclosed_left_paren, unexpected_atom, unexpected_end_of_input,
        ParseEngine,
    },
};

/// What a pending frame does with its right-hand side.
#[derive(Debug)]
enum Continuation {
    /// Bottom of the stack, hands the finished tree back unchanged.
    Root,
    /// An open parenthesis waiting for its `)`.
    Paren { open: Position },
    Unary { operator: &'static str },
    Binary { operator: &'static str, left: Expr },
}

impl Display for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Continuation::Root => write!(f, "root"),
            Continuation::Paren { open } => write!(f, "paren opened at {}", open.0),
            Continuation::Unary { operator } => write!(f, "unary `{}`", operator),
            Continuation::Binary { operator, .. } => write!(f, "binary `{}`", operator),
        }
    }
}

#[derive(Debug)]
struct Frame {
    threshold: BindingPower,
    continuation: Continuation,
}

impl Frame {
    /// Completes the pending construct with its right-hand side.
    ///
    /// Applying a parenthesis frame means the input ended (or the stack was
    /// drained) before its `)` was seen.
    fn apply(self, operand: Expr) -> Result<Expr, Error> {
        match self.continuation {
            Continuation::Root => Ok(operand),
            Continuation::Paren { open } => Err(unclosed_left_paren(open)),
            Continuation::Unary { operator } => Ok(Expr::unary(operator, operand)),
            Continuation::Binary { operator, left } => Ok(Expr::binary(operator, left, operand)),
        }
    }
}

/// The explicit stack owned by one parse.
#[derive(Debug)]
pub struct ParseState {
    stack: Vec<Frame>,
}

impl ParseState {
    pub fn new() -> Self {
        ParseState {
            stack: vec![Frame {
                threshold: STACK_BASE_BINDING_POWER,
                continuation: Continuation::Root,
            }],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn push(&mut self, threshold: BindingPower, continuation: Continuation) {
        log::trace!("push {} at threshold {} (depth {})", continuation, threshold, self.depth());
        self.stack.push(Frame {
            threshold,
            continuation,
        });
    }

    /// Folds every frame that binds tighter than an operator with the given
    /// left binding power, which is where that operator attaches.
    fn reduce_above(&mut self, left_binding_power: BindingPower, mut operand: Expr) -> Result<Expr, Error> {
        while self
            .stack
            .last()
            .is_some_and(|frame| left_binding_power < frame.threshold)
        {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            log::trace!("pop {} for binding power {}", frame.continuation, left_binding_power);
            operand = frame.apply(operand)?;
        }

        Ok(operand)
    }

    /// Folds frames down to the innermost open parenthesis and removes it.
    ///
    /// Returns `None` when there is no open parenthesis to close.
    fn close_group(&mut self, mut operand: Expr) -> Result<Option<Expr>, Error> {
        while let Some(frame) = self.stack.pop() {
            log::trace!("pop {} while closing group", frame.continuation);
            if matches!(frame.continuation, Continuation::Paren { .. }) {
                return Ok(Some(operand));
            }
            if matches!(frame.continuation, Continuation::Root) {
                return Ok(None);
            }
            operand = frame.apply(operand)?;
        }

        Ok(None)
    }

    /// Folds every remaining frame at end of input.
    fn finish(mut self, mut operand: Expr) -> Result<Expr, Error> {
        while let Some(frame) = self.stack.pop() {
            log::trace!("pop {} at end of input", frame.continuation);
            operand = frame.apply(operand)?;
        }

        Ok(operand)
    }
}

impl Default for ParseState {
    fn default() -> Self {
        ParseState::new()
    }
}

pub struct IterativeParser;

impl ParseEngine for IterativeParser {
    fn name(&self) -> &'static str {
        "Explicit-stack Pratt parsing"
    }

    fn parse_tokens(&self, mut cursor: TokenCursor, table: &OperatorTable) -> Result<Expr, Error> {
        let mut state = ParseState::new();

        'atom: loop {
            // Expecting a number, an open parenthesis or a prefix operator
            let token = cursor.advance().ok_or_else(unexpected_end_of_input)?;
            let mut operand = match token.kind {
                TokenKind::Number => parse_literal(&token)?,
                TokenKind::OpenParen => {
                    state.push(
                        PAREN_BINDING_POWER,
                        Continuation::Paren {
                            open: token.span.start,
                        },
                    );
                    continue;
                }
                TokenKind::Operator => {
                    let entry = prefix_operator(table, &token)?;
                    state.push(
                        entry.right_binding_power,
                        Continuation::Unary {
                            operator: entry.symbol,
                        },
                    );
                    continue;
                }
                TokenKind::CloseParen | TokenKind::Invalid => return Err(unexpected_atom(&token)),
            };

            // Expecting a binary operator, a close parenthesis or the end
            loop {
                let Some(next) = cursor.advance() else {
                    return state.finish(operand);
                };

                if let Some(entry) = binary_operator(table, &next) {
                    let left = state.reduce_above(entry.left_binding_power, operand)?;
                    state.push(
                        entry.right_binding_power,
                        Continuation::Binary {
                            operator: entry.symbol,
                            left,
                        },
                    );
                    continue 'atom;
                }

                match state.close_group(operand)? {
                    None => return Err(expected_operator(&next)),
                    Some(inner) if next.kind == TokenKind::CloseParen => operand = inner,
                    Some(_) => return Err(expected_operator_or_right_paren(&next)),
                }
            }
        }
    }
}
