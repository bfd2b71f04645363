use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    Operator,
    OpenParen,
    CloseParen,
    /// A run of characters the tokenizer does not recognise.
    Invalid,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single token with its source text and location.
///
/// For `Number` tokens `value` holds the digits, for `Operator` tokens the
/// operator symbol, and for `Invalid` tokens the unrecognised text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}` at {}", self.kind, self.value, self.span.start.0)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::Number, TokenKind::Operator, TokenKind::Invalid]) {
            log::trace!("{} ({})", self.kind, self.value);
        } else {
            log::trace!("{} ()", self.kind);
        }
    }
}
