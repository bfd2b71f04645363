//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - The operator table and its binding-power invariants
//! - The token cursor
//! - Tree shapes for precedence and associativity
//! - Error kinds and offsets
//! - Agreement between all parse strategies

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{
    cursor::TokenCursor,
    iterative::{IterativeParser, ParseState},
    lookups::{
        Arity, OperatorTable, MAX_BINDING_POWER, MIN_BINDING_POWER, OPERATOR_TABLE,
        PAREN_BINDING_POWER, PRIMARY_BINDING_POWER, STACK_BASE_BINDING_POWER,
    },
    parser::{engine_by_name, parse, ParseEngine, PARSERS},
    recursive::RecursiveParser,
    shunting_yard::ShuntingYardParser,
};
use crate::{
    ast::ast::Expr,
    drive_parse,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    visitors::printer::to_sexpr,
    Position,
};

fn sexpr(engine: &dyn ParseEngine, source: &str) -> String {
    match drive_parse(source, engine) {
        Ok(tree) => to_sexpr(&tree),
        Err(error) => panic!("{} failed on {:?}: {}", engine.name(), source, error),
    }
}

fn assert_parses_to(source: &str, expected: &str) {
    for engine in PARSERS {
        assert_eq!(sexpr(engine, source), expected, "{} on {:?}", engine.name(), source);
    }
}

fn assert_fails_with(source: &str, kind: ErrorImpl, position: Option<usize>) {
    for engine in PARSERS {
        let error = match drive_parse(source, engine) {
            Ok(tree) => panic!("{} accepted {:?} as {:?}", engine.name(), source, tree),
            Err(error) => error,
        };
        assert_eq!(error.get_kind(), &kind, "{} on {:?}", engine.name(), source);
        assert_eq!(
            error.get_position(),
            position.map(Position).as_ref(),
            "{} on {:?}",
            engine.name(),
            source
        );
    }
}

// Operator table

#[test]
fn test_binding_powers_are_dense() {
    let mut used = vec![false; (MAX_BINDING_POWER + 1) as usize];
    let entries = OPERATOR_TABLE
        .get_binary_lookup()
        .values()
        .chain(OPERATOR_TABLE.get_prefix_lookup().values());

    for entry in entries {
        for bp in [entry.left_binding_power, entry.right_binding_power] {
            assert!((MIN_BINDING_POWER..=MAX_BINDING_POWER).contains(&bp), "{}", entry.symbol);
            used[bp as usize] = true;
        }
    }

    for bp in MIN_BINDING_POWER..=MAX_BINDING_POWER {
        assert!(used[bp as usize], "binding power {} is unused", bp);
    }
}

#[test]
fn test_sentinels_lie_outside_operator_range() {
    assert!(STACK_BASE_BINDING_POWER < PAREN_BINDING_POWER);
    assert!(PAREN_BINDING_POWER < MIN_BINDING_POWER);
    assert!(PRIMARY_BINDING_POWER > MAX_BINDING_POWER);
}

#[test]
fn test_associativity_invariants() {
    for entry in OPERATOR_TABLE.get_binary_lookup().values() {
        if entry.symbol == "**" {
            assert!(entry.is_right_associative());
        } else {
            assert_eq!(
                entry.right_binding_power,
                entry.left_binding_power + 1,
                "{} should be left associative",
                entry.symbol
            );
        }
    }

    for entry in OPERATOR_TABLE.get_prefix_lookup().values() {
        assert!(entry.is_right_associative(), "{}", entry.symbol);
    }
}

#[test]
fn test_lookup_distinguishes_arity() {
    let binary = OPERATOR_TABLE.lookup("-", Arity::Binary).unwrap();
    let prefix = OPERATOR_TABLE.lookup("-", Arity::Prefix).unwrap();

    assert_eq!(binary.arity(), Arity::Binary);
    assert_eq!(prefix.arity(), Arity::Prefix);
    assert!(prefix.right_binding_power > binary.left_binding_power);

    assert!(OPERATOR_TABLE.lookup("~", Arity::Binary).is_none());
    assert!(OPERATOR_TABLE.lookup("&", Arity::Prefix).is_none());
    assert!(OPERATOR_TABLE.lookup("!", Arity::Binary).is_none());
}

#[test]
fn test_symbols_longest_first() {
    let symbols = OPERATOR_TABLE.symbols();

    assert_eq!(symbols.len(), 12);
    assert_eq!(&symbols[..3], &["**", "<<", ">>"]);
    assert!(symbols.iter().skip(3).all(|symbol| symbol.len() == 1));
}

#[test]
fn test_custom_table() {
    fn first(left: i64, _right: i64) -> Result<i64, ErrorImpl> {
        Ok(left)
    }

    // `+` binds tighter than `*` in this table
    let mut table = OperatorTable::new();
    table.led("*", 1, 2, first);
    table.led("+", 3, 4, first);

    let tokens = tokenize("1 * 2 + 3").unwrap();
    for engine in PARSERS {
        let tree = engine.parse_tokens(TokenCursor::new(tokens.clone()), &table).unwrap();
        assert_eq!(to_sexpr(&tree), "(* 1 (+ 2 3))", "{}", engine.name());
    }
}

// Token cursor

#[test]
fn test_cursor_peek_does_not_consume() {
    let mut cursor = TokenCursor::new(tokenize("1 +").unwrap());

    assert_eq!(cursor.peek().map(|token| token.value.as_str()), Some("1"));
    assert_eq!(cursor.peek().map(|token| token.value.as_str()), Some("1"));
    assert_eq!(cursor.get_position(), Some(Position(0)));

    assert_eq!(cursor.advance().map(|token| token.value), Some("1".to_string()));
    assert_eq!(cursor.get_position(), Some(Position(2)));
    assert!(cursor.has_tokens());
}

#[test]
fn test_cursor_past_end() {
    let mut cursor = TokenCursor::new(tokenize("7").unwrap());

    assert!(cursor.advance().is_some());
    assert!(!cursor.has_tokens());
    assert!(cursor.peek().is_none());
    assert!(cursor.advance().is_none());
    assert!(cursor.advance().is_none());
    assert_eq!(cursor.get_position(), None);
}

#[test]
fn test_cursor_iterates_remaining_tokens() {
    let mut cursor = TokenCursor::new(tokenize("( 1 )").unwrap());
    cursor.advance();

    let rest: Vec<String> = cursor.map(|token| token.value).collect();
    assert_eq!(rest, vec!["1", ")"]);
}

// Tree shapes

#[test]
fn test_single_literal() {
    assert_parses_to("42", "42");
    assert_parses_to("((42))", "42");
}

#[test]
fn test_right_associative_power() {
    assert_parses_to("2**3**2", "(** 2 (** 3 2))");
}

#[test]
fn test_left_associative_subtraction() {
    assert_parses_to("8-4-2", "(- (- 8 4) 2)");
    assert_parses_to("8 / 4 % 3 * 2", "(* (% (/ 8 4) 3) 2)");
}

#[test]
fn test_parentheses_override_associativity() {
    assert_parses_to("( 2   ** 3 ) ** 2", "(** (** 2 3) 2)");
    assert_parses_to("8-(4-2)", "(- 8 (- 4 2))");
}

#[test]
fn test_unary_binds_looser_than_power() {
    assert_parses_to("-2**-3", "(- (** 2 (- 3)))");
    assert_parses_to("-2*3", "(* (- 2) 3)");
    assert_parses_to("~-+1", "(~ (- (+ 1)))");
}

#[test]
fn test_precedence_levels() {
    assert_parses_to("1 | 2 ^ 3 & 4 << 5 + 6 * 7", "(| 1 (^ 2 (& 3 (<< 4 (+ 5 (* 6 7))))))");
    assert_parses_to("1 * 2 + 3 << 4 & 5 ^ 6 | 7", "(| (^ (& (<< (+ (* 1 2) 3) 4) 5) 6) 7)");
    assert_parses_to("1 >> 2 << 3", "(<< (>> 1 2) 3)");
}

#[test]
fn test_binary_minus_after_group() {
    assert_parses_to("(1)-(2)", "(- 1 2)");
    assert_parses_to("-(1)--(2)", "(- (- 1) (- 2))");
}

// Errors, each checked against every strategy

#[test]
fn test_expected_operator() {
    assert_fails_with("4 + 5 9", ErrorImpl::ExpectedOperator, Some(6));
    assert_fails_with("4 + 5 )", ErrorImpl::ExpectedOperator, Some(6));
    assert_fails_with("4 + 5 (", ErrorImpl::ExpectedOperator, Some(6));
    assert_fails_with("(1) 2", ErrorImpl::ExpectedOperator, Some(4));
}

#[test]
fn test_unexpected_end_of_input() {
    assert_fails_with("4 + 5 *", ErrorImpl::UnexpectedEndOfInput, None);
    assert_fails_with("4 + 5 - -", ErrorImpl::UnexpectedEndOfInput, None);
    assert_fails_with("4 + 5 - ~ -", ErrorImpl::UnexpectedEndOfInput, None);
    assert_fails_with("", ErrorImpl::UnexpectedEndOfInput, None);
    assert_fails_with("(", ErrorImpl::UnexpectedEndOfInput, None);
}

#[test]
fn test_expected_operator_or_right_paren() {
    assert_fails_with("(4 + 5 (", ErrorImpl::ExpectedOperatorOrRightParen, Some(7));
    assert_fails_with("(4 + 5 3", ErrorImpl::ExpectedOperatorOrRightParen, Some(7));
    assert_fails_with("((1) 2)", ErrorImpl::ExpectedOperatorOrRightParen, Some(5));
}

#[test]
fn test_unclosed_left_paren() {
    assert_fails_with("(4 + 5", ErrorImpl::UnclosedLeftParen, Some(0));
    assert_fails_with("4 + (5", ErrorImpl::UnclosedLeftParen, Some(4));
    assert_fails_with("(4 + (5", ErrorImpl::UnclosedLeftParen, Some(5));
    assert_fails_with("(4 * (5 - 3)", ErrorImpl::UnclosedLeftParen, Some(0));
}

#[test]
fn test_unexpected_right_paren() {
    assert_fails_with("4 + )5", ErrorImpl::UnexpectedRightParen, Some(4));
    assert_fails_with(")", ErrorImpl::UnexpectedRightParen, Some(0));
    assert_fails_with("()", ErrorImpl::UnexpectedRightParen, Some(1));
}

#[test]
fn test_unknown_unary_operator() {
    assert_fails_with(
        "4 + & 5",
        ErrorImpl::UnknownUnaryOperator {
            operator: "&".to_string(),
        },
        Some(4),
    );
    assert_fails_with(
        "**2",
        ErrorImpl::UnknownUnaryOperator {
            operator: "**".to_string(),
        },
        Some(0),
    );
}

#[test]
fn test_prefix_only_symbol_in_operator_position() {
    assert_fails_with("4 ~ 5", ErrorImpl::ExpectedOperator, Some(2));
    assert_fails_with("(4 ~ 5)", ErrorImpl::ExpectedOperatorOrRightParen, Some(3));
}

#[test]
fn test_number_out_of_range() {
    assert_fails_with(
        "1 + 99999999999999999999",
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        Some(4),
    );
}

#[test]
fn test_invalid_token_reaching_engine() {
    // bypass tokenize so the engine sees the invalid token itself
    let tokens = crate::lexer::lexer::scan("1 + ?");
    for engine in PARSERS {
        let error = parse(tokens.clone(), engine).unwrap_err();
        assert_eq!(
            error.get_kind(),
            &ErrorImpl::UnrecognisedToken {
                token: "?".to_string()
            }
        );
        assert_eq!(error.get_position(), Some(&Position(4)));
    }
}

// Strategies

#[test]
fn test_engine_by_name() {
    assert_eq!(engine_by_name("recursive").map(|engine| engine.name()), Some(RecursiveParser.name()));
    assert_eq!(engine_by_name("iterative").map(|engine| engine.name()), Some(IterativeParser.name()));
    assert_eq!(
        engine_by_name("shunting-yard").map(|engine| engine.name()),
        Some(ShuntingYardParser.name())
    );
    assert!(engine_by_name("pratt").is_none());
}

#[test]
fn test_parse_state_starts_with_root_frame() {
    assert_eq!(ParseState::new().depth(), 1);
    assert_eq!(ParseState::default().depth(), 1);
}

#[test]
fn test_deep_parentheses_without_recursion() {
    let depth = 100_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(drive_parse(&source, &IterativeParser), Ok(Expr::literal(1)));
    assert_eq!(drive_parse(&source, &ShuntingYardParser), Ok(Expr::literal(1)));
}

#[test]
fn test_deep_unclosed_parentheses_without_recursion() {
    let depth = 100_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth - 1));

    for engine in [&IterativeParser as &dyn ParseEngine, &ShuntingYardParser] {
        let error = drive_parse(&source, engine).unwrap_err();
        assert_eq!(error.get_kind(), &ErrorImpl::UnclosedLeftParen);
        assert_eq!(error.get_position(), Some(&Position(0)));
    }
}

#[test]
fn test_long_right_associative_chain() {
    let length = 200_000;
    let source = vec!["1"; length].join("**");

    let iterative = drive_parse(&source, &IterativeParser).unwrap();
    let shunting_yard = drive_parse(&source, &ShuntingYardParser).unwrap();
    assert!(iterative == shunting_yard);
}

#[test]
fn test_long_left_associative_chain() {
    let length = 200_000;
    let source = vec!["1"; length].join("+");

    let mut expected = Expr::literal(1);
    for _ in 1..length {
        expected = Expr::binary("+", expected, Expr::literal(1));
    }

    for engine in [&IterativeParser as &dyn ParseEngine, &ShuntingYardParser] {
        let tree = drive_parse(&source, engine).unwrap();
        assert!(tree == expected, "{}", engine.name());
    }
}

#[test]
fn test_long_prefix_chain() {
    let length = 200_000;
    let source = format!("{}1", "-".repeat(length));

    let mut expected = Expr::literal(1);
    for _ in 0..length {
        expected = Expr::unary("-", expected);
    }

    for engine in [&IterativeParser as &dyn ParseEngine, &ShuntingYardParser] {
        let tree = drive_parse(&source, engine).unwrap();
        assert!(tree == expected, "{}", engine.name());
    }
}

#[test]
fn test_moderate_nesting_agrees_with_recursion() {
    let source = format!("{}2{}", "-(".repeat(200), ")".repeat(200));

    let expected = drive_parse(&source, &RecursiveParser).unwrap();
    for engine in PARSERS {
        assert!(drive_parse(&source, engine).unwrap() == expected, "{}", engine.name());
    }
}

const TOKEN_CHOICES: &[&str] = &[
    "1", "23", "0", "(", ")", "(", ")", "+", "-", "*", "/", "%", "**", "~", "&", "|", "^",
    "<<", ">>",
];

fn arb_token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKEN_CHOICES), 0..24)
        .prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn strategies_agree_on_any_token_sequence(source in arb_token_soup()) {
        let expected = drive_parse(&source, &RecursiveParser);
        prop_assert_eq!(&drive_parse(&source, &IterativeParser), &expected);
        prop_assert_eq!(&drive_parse(&source, &ShuntingYardParser), &expected);
    }

    #[test]
    fn strategies_agree_on_arbitrary_text(source in "[0-9 ()+*~&|^%/<>a-]{0,20}") {
        let expected = drive_parse(&source, &RecursiveParser);
        prop_assert_eq!(&drive_parse(&source, &IterativeParser), &expected);
        prop_assert_eq!(&drive_parse(&source, &ShuntingYardParser), &expected);
    }
}
