use crate::{lexer::tokens::Token, Position};

/// A sequential view over a token list.
///
/// The cursor is owned by the parse in progress. Tokens are handed out at
/// most once; running past the end is not an error here, callers see `None`
/// and decide what that means.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    /// The tokens to parse
    tokens: Vec<Token>,
    /// Index of the next unconsumed token
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Checks if there are unconsumed tokens left.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Source offset of the next token, if there is one.
    pub fn get_position(&self) -> Option<Position> {
        self.peek().map(|token| token.span.start)
    }
}

impl Iterator for TokenCursor {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.advance()
    }
}
