use crate::{
    ast::ast::Expr,
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    cursor::TokenCursor,
    lookups::{BindingPower, OperatorTable, PAREN_BINDING_POWER},
    parser::{
        binary_operator, expected_operator, expected_operator_or_right_paren, parse_literal,
        prefix_operator, unclosed_left_paren, unexpected_atom, unexpected_end_of_input,
        ParseEngine,
    },
};

/// Precedence climbing on the call stack.
pub struct RecursiveParser;

impl ParseEngine for RecursiveParser {
    fn name(&self) -> &'static str {
        "Recursive Pratt parsing"
    }

    fn parse_tokens(&self, mut cursor: TokenCursor, table: &OperatorTable) -> Result<Expr, Error> {
        let expr = parse_expr(&mut cursor, table, PAREN_BINDING_POWER)?;

        if let Some(token) = cursor.peek() {
            return Err(expected_operator(token));
        }

        Ok(expr)
    }
}

pub fn parse_expr(cursor: &mut TokenCursor, table: &OperatorTable, bp: BindingPower) -> Result<Expr, Error> {
    log::trace!("parse_expr: min binding power {}", bp);

    // First parse the operand on the left
    let token = cursor.advance().ok_or_else(unexpected_end_of_input)?;
    let mut left = match token.kind {
        TokenKind::Number => parse_literal(&token)?,
        TokenKind::OpenParen => {
            let inner = parse_expr(cursor, table, PAREN_BINDING_POWER)?;
            match cursor.advance() {
                Some(next) if next.kind == TokenKind::CloseParen => inner,
                Some(next) => return Err(expected_operator_or_right_paren(&next)),
                None => return Err(unclosed_left_paren(token.span.start)),
            }
        }
        TokenKind::Operator => {
            let entry = prefix_operator(table, &token)?;
            let operand = parse_expr(cursor, table, entry.right_binding_power)?;
            Expr::unary(entry.symbol, operand)
        }
        TokenKind::CloseParen | TokenKind::Invalid => return Err(unexpected_atom(&token)),
    };

    // While the next binary operator binds at least as tightly as bp, extend the left operand
    while let Some(entry) = cursor.peek().and_then(|next| binary_operator(table, next)) {
        if entry.left_binding_power < bp {
            break;
        }

        cursor.advance();
        let right = parse_expr(cursor, table, entry.right_binding_power)?;
        left = Expr::binary(entry.symbol, left, right);
    }

    Ok(left)
}
