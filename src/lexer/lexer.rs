use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{
    errors::errors::{Error, ErrorImpl},
    parser::lookups::OPERATOR_TABLE,
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

lazy_static! {
    /// The single pattern every token is matched with.
    ///
    /// Alternatives are tried left to right, so the operator group lists
    /// longer symbols first (`**` before `*`, `<<` before a hypothetical `<`).
    /// Anything no other group accepts falls through to `lexerr`, which
    /// swallows a whole word so `12abc` is reported as one token.
    static ref TOKEN_PATTERN: Regex = {
        let operators = OPERATOR_TABLE
            .symbols()
            .iter()
            .map(|symbol| regex::escape(symbol))
            .collect::<Vec<String>>()
            .join("|");

        Regex::new(&format!(
            r"(?P<op>{})|(?P<num>[0-9]+\b)|(?P<paren>[()])|(?P<lexerr>\w+|\S)",
            operators
        ))
        .expect("token pattern should be a valid regex")
    };
}

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            tokens: vec![],
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn classify<'h>(captures: &Captures<'h>) -> Option<(TokenKind, regex::Match<'h>)> {
        if let Some(matched) = captures.name("op") {
            Some((TokenKind::Operator, matched))
        } else if let Some(matched) = captures.name("num") {
            Some((TokenKind::Number, matched))
        } else if let Some(matched) = captures.name("paren") {
            let kind = if matched.as_str() == "(" {
                TokenKind::OpenParen
            } else {
                TokenKind::CloseParen
            };
            Some((kind, matched))
        } else {
            captures
                .name("lexerr")
                .map(|matched| (TokenKind::Invalid, matched))
        }
    }

    /// Runs the pattern over the whole source, keeping invalid tokens.
    ///
    /// Spans are character offsets. The regex reports byte offsets, so the
    /// characters skipped since the previous token are counted on the way.
    pub fn scan(mut self) -> Vec<Token> {
        let mut byte_offset = 0;

        for captures in TOKEN_PATTERN.captures_iter(self.source) {
            if let Some((kind, matched)) = Self::classify(&captures) {
                let char_offset = self.tokens.last().map_or(0, |token| token.span.end.0)
                    + self.source[byte_offset..matched.start()].chars().count();
                byte_offset = matched.end();

                self.push(MK_TOKEN!(
                    kind,
                    String::from(matched.as_str()),
                    MK_SPAN!(char_offset, matched.as_str().chars().count())
                ));
            }
        }

        self.tokens
    }
}

/// Splits `source` into tokens, invalid ones included.
pub fn scan(source: &str) -> Vec<Token> {
    Lexer::new(source).scan()
}

/// Splits `source` into tokens, failing on the first unrecognised one.
///
/// # Returns
///
/// The ordered token list, or an `UnrecognisedToken` error positioned at the
/// start of the offending text. The parse engines never see invalid tokens
/// when they are fed through this function.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let tokens = scan(source);

    if let Some(invalid) = tokens.iter().find(|token| token.kind == TokenKind::Invalid) {
        return Err(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: invalid.value.clone(),
            },
            invalid.span.start,
        ));
    }

    log::debug!("tokenized {} tokens from {:?}", tokens.len(), source);
    if log::log_enabled!(log::Level::Trace) {
        tokens.iter().for_each(Token::debug);
    }

    Ok(tokens)
}

