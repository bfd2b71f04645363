use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// An error raised while tokenizing, parsing or evaluating an expression.
///
/// Every error is terminal for the expression it came from. Parse errors
/// carry the character offset of the offending token, except for
/// `UnexpectedEndOfInput`, which has nothing to point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// Creates an error that is not tied to a source offset.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedRightParen => "UnexpectedRightParen",
            ErrorImpl::UnknownUnaryOperator { .. } => "UnknownUnaryOperator",
            ErrorImpl::UnclosedLeftParen => "UnclosedLeftParen",
            ErrorImpl::ExpectedOperatorOrRightParen => "ExpectedOperatorOrRightParen",
            ErrorImpl::ExpectedOperator => "ExpectedOperator",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::NegativeExponent => "NegativeExponent",
            ErrorImpl::NegativeShiftCount => "NegativeShiftCount",
            ErrorImpl::Overflow { .. } => "Overflow",
            ErrorImpl::UnknownOperator { .. } => "UnknownOperator",
            ErrorImpl::UnsupportedNode { .. } => "UnsupportedNode",
            ErrorImpl::InvalidParserState { .. } => "InvalidParserState",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "The expression ends where a number, `(` or unary operator was expected",
            )),
            ErrorImpl::UnexpectedRightParen => {
                ErrorTip::Suggestion(String::from("Is there an operand missing before `)`?"))
            }
            ErrorImpl::UnknownUnaryOperator { operator } => ErrorTip::Suggestion(format!(
                "`{}` cannot be used as a prefix operator, only `+`, `-` and `~` can",
                operator
            )),
            ErrorImpl::UnclosedLeftParen => {
                ErrorTip::Suggestion(String::from("Did you forget a closing `)`?"))
            }
            ErrorImpl::ExpectedOperatorOrRightParen => ErrorTip::Suggestion(String::from(
                "Inside parentheses an operand must be followed by an operator or `)`",
            )),
            ErrorImpl::ExpectedOperator => {
                ErrorTip::Suggestion(String::from("Did you miss an operator between operands?"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::NegativeExponent => ErrorTip::Suggestion(String::from(
                "Only non-negative integer exponents are supported",
            )),
            ErrorImpl::NegativeShiftCount => ErrorTip::None,
            ErrorImpl::Overflow { operator } => ErrorTip::Suggestion(format!(
                "The result of `{}` does not fit in a 64-bit integer",
                operator
            )),
            ErrorImpl::UnknownOperator { .. } => ErrorTip::None,
            ErrorImpl::UnsupportedNode { .. } => ErrorTip::None,
            ErrorImpl::InvalidParserState { .. } => ErrorTip::Suggestion(String::from(
                "This is a bug in the parser, please report it",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{} at {}", self.internal_error, position.0),
            None => write!(f, "{}", self.internal_error),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorImpl> for Error {
    fn from(error_impl: ErrorImpl) -> Self {
        Error::unpositioned(error_impl)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognized token `{token}`")]
    UnrecognisedToken { token: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected right parenthesis")]
    UnexpectedRightParen,
    #[error("unknown unary operator `{operator}`")]
    UnknownUnaryOperator { operator: String },
    #[error("unclosed left parenthesis")]
    UnclosedLeftParen,
    #[error("expected operator or right parenthesis")]
    ExpectedOperatorOrRightParen,
    #[error("expected operator")]
    ExpectedOperator,
    #[error("error parsing number `{token}`")]
    NumberParseError { token: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("negative exponent")]
    NegativeExponent,
    #[error("negative shift count")]
    NegativeShiftCount,
    #[error("integer overflow in `{operator}`")]
    Overflow { operator: String },
    #[error("unknown operator `{operator}`")]
    UnknownOperator { operator: String },
    #[error("unsupported {node} node")]
    UnsupportedNode { node: String },
    #[error("invalid parser state: {message}")]
    InvalidParserState { message: String },
}
