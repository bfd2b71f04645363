#![allow(clippy::module_inception)]

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::{parse, ParseEngine},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod visitors;

extern crate regex;

/// A character offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes `source` and parses it with `engine`.
///
/// Unrecognised text is reported before the engine runs.
pub fn drive_parse(source: &str, engine: &dyn ParseEngine) -> Result<Expr, Error> {
    let tokens = tokenize(source)?;
    parse(tokens, engine)
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line. A position at or past the end of the source
/// maps to the end of the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.chars().count();

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        start = end;
        line_number += 1;
    }

    // Past the end: point just after the last line's content
    let last_line = source.split_inclusive('\n').last().unwrap_or("");
    let line_number = line_number.saturating_sub(1).max(1);
    let trimmed = last_line.trim_end_matches('\n');
    (line_number, trimmed.to_string(), trimmed.chars().count())
}


/// Renders an error with the offending line and a caret under the offset.
///
/// ```text
/// Error: ExpectedOperator (Did you miss an operator between operands?)
///   |
/// 1 | 4 + 5 9
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error
        .get_position()
        .map(|position| position.0)
        .unwrap_or(source.chars().count());
    let (line, line_text, line_pos) = get_line_at_position(source, position);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();
    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
