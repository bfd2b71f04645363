//! Utility macros for the calculator.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span from a start offset and a length

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span covering `$len` characters starting at `$start`.
///
/// ```ignore
/// let span = MK_SPAN!(4, 2); // characters 4..6
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $len:expr) => {
        Span {
            start: Position($start),
            end: Position($start + $len),
        }
    };
}
