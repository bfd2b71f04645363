//! Shunting-yard parsing.
//!
//! Instead of an output queue, actions are performed as soon as they would
//! reach it: literals are pushed onto a value stack and operators combine the
//! values on top of it. Pending actions wait on a second stack, ordered by
//! binding power, until a lower-precedence operator, a `)` or the end of
//! input flushes them.

use std::fmt::Display;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    cursor::TokenCursor,
    lookups::{BindingPower, OperatorTable, PAREN_BINDING_POWER, PRIMARY_BINDING_POWER},
    parser::{
        binary_operator, expected_operator, expected_operator_or_right_paren, parse_literal,
        prefix_operator, unclosed_left_paren, unexpected_atom, unexpected_end_of_input,
        ParseEngine,
    },
};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum TokState {
    /// Expecting a binary operator or a close parenthesis
    ExpectOperator,
    /// Expecting a number, an open parenthesis or a prefix operator
    ExpectAtom,
}

#[derive(Debug)]
enum Action {
    PushValue(Expr),
    ApplyUnary(&'static str),
    ApplyBinary(&'static str),
    OpenParen(Position),
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PushValue(_) => write!(f, "push value"),
            Action::ApplyUnary(operator) => write!(f, "apply unary `{}`", operator),
            Action::ApplyBinary(operator) => write!(f, "apply binary `{}`", operator),
            Action::OpenParen(open) => write!(f, "paren opened at {}", open.0),
        }
    }
}

#[derive(Debug)]
struct Pending {
    threshold: BindingPower,
    action: Action,
}

#[derive(Debug, Default)]
struct Stacks {
    values: Vec<Expr>,
    actions: Vec<Pending>,
}

impl Stacks {
    fn pop_value(&mut self) -> Result<Expr, Error> {
        self.values.pop().ok_or_else(|| {
            Error::unpositioned(ErrorImpl::InvalidParserState {
                message: String::from("value stack underflow"),
            })
        })
    }

    fn perform(&mut self, action: Action) -> Result<(), Error> {
        log::trace!("perform {} ({} values)", action, self.values.len());
        match action {
            Action::PushValue(value) => self.values.push(value),
            Action::ApplyUnary(operator) => {
                let operand = self.pop_value()?;
                self.values.push(Expr::unary(operator, operand));
            }
            Action::ApplyBinary(operator) => {
                let right = self.pop_value()?;
                let left = self.pop_value()?;
                self.values.push(Expr::binary(operator, left, right));
            }
            Action::OpenParen(open) => return Err(unclosed_left_paren(open)),
        }
        Ok(())
    }

    /// Performs every pending action that binds tighter than `threshold`.
    fn flush_above(&mut self, threshold: BindingPower) -> Result<(), Error> {
        while self
            .actions
            .last()
            .is_some_and(|pending| threshold < pending.threshold)
        {
            let Some(pending) = self.actions.pop() else {
                break;
            };
            self.perform(pending.action)?;
        }
        Ok(())
    }

    /// Performs pending actions down to the innermost open parenthesis and
    /// drops it. Returns false if there was no open parenthesis.
    fn flush_group(&mut self) -> Result<bool, Error> {
        while let Some(pending) = self.actions.pop() {
            if let Action::OpenParen(_) = pending.action {
                return Ok(true);
            }
            self.perform(pending.action)?;
        }
        Ok(false)
    }
}

pub struct ShuntingYardParser;

impl ParseEngine for ShuntingYardParser {
    fn name(&self) -> &'static str {
        "Shunting yard"
    }

    fn parse_tokens(&self, cursor: TokenCursor, table: &OperatorTable) -> Result<Expr, Error> {
        let mut stacks = Stacks::default();
        let mut tok_state = TokState::ExpectAtom;

        for token in cursor {
            let (to_push, new_threshold) = match tok_state {
                TokState::ExpectAtom => match token.kind {
                    TokenKind::Number => {
                        let value = parse_literal(&token)?;
                        tok_state = TokState::ExpectOperator;
                        (
                            Pending {
                                threshold: PRIMARY_BINDING_POWER,
                                action: Action::PushValue(value),
                            },
                            PRIMARY_BINDING_POWER,
                        )
                    }
                    TokenKind::OpenParen => {
                        stacks.actions.push(Pending {
                            threshold: PAREN_BINDING_POWER,
                            action: Action::OpenParen(token.span.start),
                        });
                        continue;
                    }
                    TokenKind::Operator => {
                        let entry = prefix_operator(table, &token)?;
                        (
                            Pending {
                                threshold: entry.right_binding_power,
                                action: Action::ApplyUnary(entry.symbol),
                            },
                            entry.left_binding_power,
                        )
                    }
                    TokenKind::CloseParen | TokenKind::Invalid => return Err(unexpected_atom(&token)),
                },
                TokState::ExpectOperator => match binary_operator(table, &token) {
                    Some(entry) => {
                        tok_state = TokState::ExpectAtom;
                        (
                            Pending {
                                threshold: entry.right_binding_power,
                                action: Action::ApplyBinary(entry.symbol),
                            },
                            entry.left_binding_power,
                        )
                    }
                    None => {
                        if !stacks.flush_group()? {
                            return Err(expected_operator(&token));
                        }
                        if token.kind == TokenKind::CloseParen {
                            continue;
                        }
                        return Err(expected_operator_or_right_paren(&token));
                    }
                },
            };

            stacks.flush_above(new_threshold)?;
            stacks.actions.push(to_push);
        }

        if tok_state == TokState::ExpectAtom {
            return Err(unexpected_end_of_input());
        }

        while let Some(pending) = stacks.actions.pop() {
            stacks.perform(pending.action)?;
        }

        let result = stacks.pop_value()?;
        if !stacks.values.is_empty() {
            return Err(Error::unpositioned(ErrorImpl::InvalidParserState {
                message: format!("{} values left over", stacks.values.len()),
            }));
        }

        Ok(result)
    }
}
