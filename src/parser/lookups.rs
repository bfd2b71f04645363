use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::errors::ErrorImpl;

/// Integer precedence; higher values bind tighter.
///
/// Operator binding powers occupy the gapless range
/// `MIN_BINDING_POWER..=MAX_BINDING_POWER`, which leaves room for the
/// sentinels below and above it.
pub type BindingPower = i32;

pub const MIN_BINDING_POWER: BindingPower = 1;
pub const MAX_BINDING_POWER: BindingPower = 14;

/// Threshold of a parenthesised group. No operator can close it.
pub const PAREN_BINDING_POWER: BindingPower = MIN_BINDING_POWER - 1;
/// Threshold of the bottom frame of an explicit parse stack.
pub const STACK_BASE_BINDING_POWER: BindingPower = MIN_BINDING_POWER - 2;
/// Binding power of a literal operand. Every operator yields to it.
pub const PRIMARY_BINDING_POWER: BindingPower = MAX_BINDING_POWER + 1;

pub type PrefixFn = fn(i64) -> Result<i64, ErrorImpl>;
pub type InfixFn = fn(i64, i64) -> Result<i64, ErrorImpl>;

/// Binary and prefix-unary forms of the same symbol are separate entries.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Arity {
    Binary,
    Prefix,
}

#[derive(Clone, Copy, Debug)]
pub enum Semantics {
    Prefix(PrefixFn),
    Binary(InfixFn),
}

#[derive(Clone, Copy, Debug)]
pub struct OperatorEntry {
    pub symbol: &'static str,
    pub semantics: Semantics,
    /// Compared against an enclosing parse's threshold to decide whether
    /// this operator extends the operand to its left.
    pub left_binding_power: BindingPower,
    /// Threshold used while parsing this operator's own right operand.
    pub right_binding_power: BindingPower,
}

impl OperatorEntry {
    #[cfg(test)]
    pub(crate) fn arity(&self) -> Arity {
        match self.semantics {
            Semantics::Prefix(_) => Arity::Prefix,
            Semantics::Binary(_) => Arity::Binary,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_right_associative(&self) -> bool {
        self.right_binding_power < self.left_binding_power
    }
}

pub type OperatorLookup = HashMap<&'static str, OperatorEntry>;

/// Registry of operator semantics and binding powers.
///
/// Built once by `create_operator_lookups` and only read afterwards, so a
/// shared reference can be handed to any number of parses.
#[derive(Debug, Default)]
pub struct OperatorTable {
    /// Operators valid between two operands
    binary_lookup: OperatorLookup,
    /// Operators valid in front of an operand
    prefix_lookup: OperatorLookup,
}

impl OperatorTable {
    pub fn new() -> Self {
        OperatorTable::default()
    }

    /// Registers a binary operator.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The operator text
    /// * `left_binding_power` - Binding power towards the left operand
    /// * `right_binding_power` - Threshold for the right operand; one above the
    ///   left power for left associativity, below it for right associativity
    /// * `function` - The numeric meaning of the operator
    pub fn led(
        &mut self,
        symbol: &'static str,
        left_binding_power: BindingPower,
        right_binding_power: BindingPower,
        function: InfixFn,
    ) {
        self.binary_lookup.insert(
            symbol,
            OperatorEntry {
                symbol,
                semantics: Semantics::Binary(function),
                left_binding_power,
                right_binding_power,
            },
        );
    }

    /// Registers a prefix operator.
    ///
    /// The right binding power decides what binds tighter than the prefix
    /// operator itself (exponentiation does, so `-2**2` is `-(2**2)`).
    pub fn nud(
        &mut self,
        symbol: &'static str,
        left_binding_power: BindingPower,
        right_binding_power: BindingPower,
        function: PrefixFn,
    ) {
        self.prefix_lookup.insert(
            symbol,
            OperatorEntry {
                symbol,
                semantics: Semantics::Prefix(function),
                left_binding_power,
                right_binding_power,
            },
        );
    }

    pub fn lookup(&self, symbol: &str, arity: Arity) -> Option<&OperatorEntry> {
        match arity {
            Arity::Binary => self.binary_lookup.get(symbol),
            Arity::Prefix => self.prefix_lookup.get(symbol),
        }
    }

    /// Returns a reference to the binary operator lookup table.
    #[cfg(test)]
    pub(crate) fn get_binary_lookup(&self) -> &OperatorLookup {
        &self.binary_lookup
    }

    /// Returns a reference to the prefix operator lookup table.
    #[cfg(test)]
    pub(crate) fn get_prefix_lookup(&self) -> &OperatorLookup {
        &self.prefix_lookup
    }

    /// Every distinct symbol in the table, longest first.
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<&'static str> = self
            .binary_lookup
            .keys()
            .chain(self.prefix_lookup.keys())
            .copied()
            .collect();

        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        symbols.dedup();
        symbols
    }
}

lazy_static! {
    pub static ref OPERATOR_TABLE: OperatorTable = {
        let mut table = OperatorTable::new();
        create_operator_lookups(&mut table);
        table
    };
}

pub fn create_operator_lookups(table: &mut OperatorTable) {
    // Bitwise
    table.led("|", 1, 2, bit_or);
    table.led("^", 3, 4, bit_xor);
    table.led("&", 5, 6, bit_and);

    // Shifts
    table.led(">>", 7, 8, shift_right);
    table.led("<<", 7, 8, shift_left);

    // Additive and multiplicative
    table.led("+", 9, 10, add);
    table.led("-", 9, 10, subtract);
    table.led("*", 11, 12, multiply);
    table.led("/", 11, 12, floor_divide);
    table.led("%", 11, 12, floor_modulo);

    // Prefix operators and exponentiation are right associative
    table.nud("+", 14, 13, identity);
    table.nud("-", 14, 13, negate);
    table.nud("~", 14, 13, invert);
    table.led("**", 14, 13, power);
}

fn overflow(operator: &str) -> ErrorImpl {
    ErrorImpl::Overflow {
        operator: String::from(operator),
    }
}

fn bit_or(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    Ok(left | right)
}

fn bit_xor(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    Ok(left ^ right)
}

fn bit_and(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    Ok(left & right)
}

fn shift_count(count: i64) -> Result<u32, ErrorImpl> {
    if count < 0 {
        return Err(ErrorImpl::NegativeShiftCount);
    }
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

fn shift_right(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    let count = shift_count(right)?;
    if count >= i64::BITS {
        return Ok(if left < 0 { -1 } else { 0 });
    }
    Ok(left >> count)
}

fn shift_left(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    let count = shift_count(right)?;
    if left == 0 {
        return Ok(0);
    }
    if count >= i64::BITS {
        return Err(overflow("<<"));
    }

    let shifted = left << count;
    // bits shifted out (or into the sign) make the round trip fail
    if shifted >> count != left {
        return Err(overflow("<<"));
    }
    Ok(shifted)
}

fn add(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    left.checked_add(right).ok_or_else(|| overflow("+"))
}

fn subtract(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    left.checked_sub(right).ok_or_else(|| overflow("-"))
}

fn multiply(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    left.checked_mul(right).ok_or_else(|| overflow("*"))
}

/// Division rounding towards negative infinity.
fn floor_divide(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    if right == 0 {
        return Err(ErrorImpl::DivisionByZero);
    }

    let quotient = left.checked_div(right).ok_or_else(|| overflow("/"))?;
    if left % right != 0 && ((left < 0) != (right < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder with the sign of the divisor, matching `floor_divide`.
fn floor_modulo(left: i64, right: i64) -> Result<i64, ErrorImpl> {
    if right == 0 {
        return Err(ErrorImpl::DivisionByZero);
    }

    let remainder = left.wrapping_rem(right);
    if remainder != 0 && ((remainder < 0) != (right < 0)) {
        Ok(remainder + right)
    } else {
        Ok(remainder)
    }
}

fn power(base: i64, exponent: i64) -> Result<i64, ErrorImpl> {
    if exponent < 0 {
        return Err(ErrorImpl::NegativeExponent);
    }

    match u32::try_from(exponent) {
        Ok(exponent) => base.checked_pow(exponent).ok_or_else(|| overflow("**")),
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Err(overflow("**")),
        },
    }
}

fn identity(operand: i64) -> Result<i64, ErrorImpl> {
    Ok(operand)
}

fn negate(operand: i64) -> Result<i64, ErrorImpl> {
    operand.checked_neg().ok_or_else(|| overflow("-"))
}

fn invert(operand: i64) -> Result<i64, ErrorImpl> {
    Ok(!operand)
}
