//! The parse engine capability and the helpers every strategy shares.
//!
//! A strategy turns a `TokenCursor` into an expression tree using the
//! binding powers in an `OperatorTable`. All strategies must agree exactly:
//! the same tree for valid input, and the same error kind at the same offset
//! for invalid input. Atom interpretation and error construction live here
//! and are shared by every strategy.

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    cursor::TokenCursor,
    iterative::IterativeParser,
    lookups::{Arity, OperatorEntry, OperatorTable, OPERATOR_TABLE},
    recursive::RecursiveParser,
    shunting_yard::ShuntingYardParser,
};

pub trait ParseEngine: Sync {
    /// Human readable name, used by the interactive driver.
    fn name(&self) -> &'static str;

    /// Parses every token in `cursor` into a single expression.
    fn parse_tokens(&self, cursor: TokenCursor, table: &OperatorTable) -> Result<Expr, Error>;
}

/// Every available strategy, in display order.
pub static PARSERS: [&dyn ParseEngine; 3] = [&RecursiveParser, &IterativeParser, &ShuntingYardParser];

/// Finds a strategy by its command line name.
pub fn engine_by_name(name: &str) -> Option<&'static dyn ParseEngine> {
    match name {
        "recursive" => Some(&RecursiveParser),
        "iterative" => Some(&IterativeParser),
        "shunting-yard" => Some(&ShuntingYardParser),
        _ => None,
    }
}

/// Parses a stream of tokens with the process-wide operator table.
///
/// # Arguments
///
/// * `tokens` - Tokens produced by `tokenize`
/// * `engine` - The strategy to run
///
/// # Returns
///
/// The expression tree, or the first error the strategy hit.
pub fn parse(tokens: Vec<Token>, engine: &dyn ParseEngine) -> Result<Expr, Error> {
    log::debug!("parsing {} tokens with {}", tokens.len(), engine.name());
    let result = engine.parse_tokens(TokenCursor::new(tokens), &OPERATOR_TABLE);

    match &result {
        Ok(tree) => log::debug!("{} produced a {} expression", engine.name(), tree.get_expr_type()),
        Err(error) => log::debug!("{} failed: {}", engine.name(), error),
    }

    result
}

/// Interprets a `Number` token as a literal node.
pub fn parse_literal(token: &Token) -> Result<Expr, Error> {
    match token.value.parse::<i64>() {
        Ok(value) => Ok(Expr::literal(value)),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start,
        )),
    }
}

/// Looks up the prefix form of an operator token found where an atom was expected.
pub fn prefix_operator<'t>(table: &'t OperatorTable, token: &Token) -> Result<&'t OperatorEntry, Error> {
    table.lookup(&token.value, Arity::Prefix).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownUnaryOperator {
                operator: token.value.clone(),
            },
            token.span.start,
        )
    })
}

/// Looks up the binary form of a token found where an operator was expected.
///
/// Anything that is not a registered binary operator (a number, a
/// parenthesis, or a prefix-only symbol like `~`) yields `None`.
pub fn binary_operator<'t>(table: &'t OperatorTable, token: &Token) -> Option<&'t OperatorEntry> {
    if token.kind != TokenKind::Operator {
        return None;
    }
    table.lookup(&token.value, Arity::Binary)
}

/// The error for a token that cannot start an operand.
///
/// Operators are not handled here since they may be valid prefix operators.
pub fn unexpected_atom(token: &Token) -> Error {
    match token.kind {
        TokenKind::CloseParen => Error::new(ErrorImpl::UnexpectedRightParen, token.span.start),
        _ => Error::new(
            ErrorImpl::UnrecognisedToken {
                token: token.value.clone(),
            },
            token.span.start,
        ),
    }
}

pub fn unexpected_end_of_input() -> Error {
    Error::unpositioned(ErrorImpl::UnexpectedEndOfInput)
}

pub fn unclosed_left_paren(open: Position) -> Error {
    Error::new(ErrorImpl::UnclosedLeftParen, open)
}

pub fn expected_operator(token: &Token) -> Error {
    Error::new(ErrorImpl::ExpectedOperator, token.span.start)
}

pub fn expected_operator_or_right_paren(token: &Token) -> Error {
    Error::new(ErrorImpl::ExpectedOperatorOrRightParen, token.span.start)
}
