//! Operators and rounded decimal arithmetic
//!
//! Addition, subtraction and multiplication round to 16 significant digits.
//! Division rounds to 12 fractional digits. Both round half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Significant digits kept by `+`, `−` and `×`
pub const SIGNIFICANT_DIGITS: u32 = 16;

/// Fractional digits kept by `÷`
pub const DIVISION_SCALE: u32 = 12;

/// Finest scale a [`Decimal`] can hold
pub const MAX_SCALE: u32 = 28;

/// The four operators of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the symbol printed on the keypad button
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the ASCII key that selects this operator
    #[must_use]
    pub const fn ascii(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses either the keypad symbol or its ASCII key
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '−' | '-' => Some(Self::Subtract),
            '×' | '*' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Applies `op` to `a` and `b` with the keypad rounding rules
pub fn compute(a: Decimal, b: Decimal, op: Operator) -> CalcResult<Decimal> {
    match op {
        Operator::Add => {
            let sum = a
                .checked_add(b)
                .ok_or_else(|| CalcError::arithmetic("addition overflowed"))?;
            round_significant(sum)
        }
        Operator::Subtract => {
            let difference = a
                .checked_sub(b)
                .ok_or_else(|| CalcError::arithmetic("subtraction overflowed"))?;
            round_significant(difference)
        }
        Operator::Multiply => multiply(a, b),
        Operator::Divide => divide(a, b),
    }
}

fn multiply(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    let product = a
        .checked_mul(b)
        .ok_or_else(|| CalcError::arithmetic("multiplication overflowed"))?;

    // Past MAX_SCALE the library rounds the product; make sure nothing the
    // 16 significant digits need was lost.
    let (a, b) = (a.normalize(), b.normalize());
    if a.scale() + b.scale() > MAX_SCALE && needs_finer_scale(a, b, &product) {
        return Err(CalcError::arithmetic("result too small to represent"));
    }
    round_significant(product)
}

/// True if `a × b` rounded to [`SIGNIFICANT_DIGITS`] needs more than
/// [`MAX_SCALE`] fractional digits.
fn needs_finer_scale(a: Decimal, b: Decimal, product: &Decimal) -> bool {
    if a.is_zero() || b.is_zero() {
        return false;
    }

    let exact = a
        .mantissa()
        .unsigned_abs()
        .checked_mul(b.mantissa().unsigned_abs());
    let Some(mut mantissa) = exact else {
        // Wider than u128: only a product that vanished is known to be lost
        return product.is_zero();
    };

    let mut scale = a.scale() + b.scale();
    let digits = decimal_digits(mantissa);
    if digits > SIGNIFICANT_DIGITS {
        let dropped = digits - SIGNIFICANT_DIGITS;
        let divisor = 10u128.pow(dropped);
        let remainder = mantissa % divisor;
        mantissa /= divisor;
        if remainder * 2 >= divisor {
            mantissa += 1;
        }
        scale -= dropped;
    }
    while scale > MAX_SCALE && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    scale > MAX_SCALE
}

fn divide(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }

    let quotient = a
        .checked_div(b)
        .ok_or_else(|| CalcError::arithmetic("division overflowed"))?;
    Ok(quotient.round_dp_with_strategy(DIVISION_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Rounds to [`SIGNIFICANT_DIGITS`] digits, half away from zero.
///
/// Works on the raw mantissa so integers wider than 16 digits round in their
/// integral part (12345678901234567 becomes 12345678901234570).
fn round_significant(value: Decimal) -> CalcResult<Decimal> {
    let mantissa = value.mantissa();
    let digits = decimal_digits(mantissa.unsigned_abs());
    if digits <= SIGNIFICANT_DIGITS {
        return Ok(value);
    }

    let dropped = digits - SIGNIFICANT_DIGITS;
    let divisor = 10i128.pow(dropped);
    let mut kept = mantissa / divisor;
    let remainder = (mantissa % divisor).abs();
    if remainder * 2 >= divisor {
        kept += mantissa.signum();
    }

    let scale = value.scale();
    let rounded = if dropped <= scale {
        Decimal::try_from_i128_with_scale(kept, scale - dropped)
    } else {
        let widened = kept
            .checked_mul(10i128.pow(dropped - scale))
            .ok_or_else(|| CalcError::arithmetic("rounded result overflowed"))?;
        Decimal::try_from_i128_with_scale(widened, 0)
    };
    rounded.map_err(|e| CalcError::arithmetic(e.to_string()))
}

fn decimal_digits(n: u128) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

/// Renders a value as plain decimal text without trailing zeros
#[must_use]
pub fn render(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ===== Operator tests =====

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::Add.symbol(), "+");
        assert_eq!(Operator::Subtract.symbol(), "−");
        assert_eq!(Operator::Multiply.symbol(), "×");
        assert_eq!(Operator::Divide.symbol(), "÷");
    }

    #[test]
    fn test_operator_from_char_accepts_symbol_and_ascii() {
        for op in Operator::ALL {
            let symbol = op.symbol().chars().next().unwrap();
            assert_eq!(Operator::from_char(symbol), Some(op));
            assert_eq!(Operator::from_char(op.ascii()), Some(op));
        }
        assert_eq!(Operator::from_char('%'), None);
        assert_eq!(Operator::from_char('^'), None);
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::Multiply.to_string(), "×");
    }

    // ===== Add/Subtract/Multiply tests =====

    #[test]
    fn test_add_is_exact_for_short_decimals() {
        let sum = compute(dec("0.1"), dec("0.2"), Operator::Add).unwrap();
        assert_eq!(render(sum), "0.3");
    }

    #[test]
    fn test_subtract_can_go_negative() {
        let diff = compute(dec("3"), dec("5.5"), Operator::Subtract).unwrap();
        assert_eq!(render(diff), "-2.5");
    }

    #[test]
    fn test_multiply() {
        let product = compute(dec("6"), dec("7"), Operator::Multiply).unwrap();
        assert_eq!(render(product), "42");
    }

    #[test]
    fn test_sixteen_significant_digits_fraction() {
        // 0.1234567890123456789 has 19 significant digits
        let sum = compute(dec("0.1234567890123456789"), Decimal::ZERO, Operator::Add).unwrap();
        assert_eq!(render(sum), "0.1234567890123457");
    }

    #[test]
    fn test_sixteen_significant_digits_integer_part() {
        let sum = compute(dec("12345678901234567"), Decimal::ZERO, Operator::Add).unwrap();
        assert_eq!(render(sum), "12345678901234570");
    }

    #[test]
    fn test_round_half_up_on_midpoint() {
        // 17 digits ending in 5 rounds away from zero
        let sum = compute(dec("1.0000000000000005"), Decimal::ZERO, Operator::Add).unwrap();
        assert_eq!(render(sum), "1.000000000000001");

        let neg = compute(dec("-1.0000000000000005"), Decimal::ZERO, Operator::Add).unwrap();
        assert_eq!(render(neg), "-1.000000000000001");
    }

    #[test]
    fn test_round_down_below_midpoint() {
        let sum = compute(dec("1.0000000000000004"), Decimal::ZERO, Operator::Add).unwrap();
        assert_eq!(render(sum), "1");
    }

    #[test]
    fn test_multiply_rounds_product() {
        // 1.1111111111 squared = 1.23456790120987654321
        let product = compute(dec("1.1111111111"), dec("1.1111111111"), Operator::Multiply).unwrap();
        assert_eq!(render(product), "1.234567901209877");
    }

    #[test]
    fn test_multiply_overflow_is_arithmetic_failure() {
        let huge = Decimal::MAX;
        let result = compute(huge, dec("10"), Operator::Multiply);
        assert!(matches!(result, Err(CalcError::ArithmeticFailure(_))));
    }

    #[test]
    fn test_add_overflow_is_arithmetic_failure() {
        let result = compute(Decimal::MAX, Decimal::MAX, Operator::Add);
        assert!(matches!(result, Err(CalcError::ArithmeticFailure(_))));
    }

    #[test]
    fn test_rounding_near_max_overflows() {
        // Rounding MAX to 16 digits carries past the representable range
        let result = compute(Decimal::MAX, Decimal::ZERO, Operator::Add);
        assert!(matches!(result, Err(CalcError::ArithmeticFailure(_))));
    }

    // ===== Multiply underflow tests =====

    #[test]
    fn test_multiply_too_small_is_arithmetic_failure() {
        let tiny = dec("0.000000000000001");
        let result = compute(tiny, tiny, Operator::Multiply);
        assert_eq!(
            result,
            Err(CalcError::arithmetic("result too small to represent"))
        );
    }

    #[test]
    fn test_multiply_losing_a_digit_below_max_scale_fails() {
        let result = compute(dec("0.0000000000000000000000000123"), dec("0.1"), Operator::Multiply);
        assert!(matches!(result, Err(CalcError::ArithmeticFailure(_))));
    }

    #[test]
    fn test_multiply_at_max_scale_is_exact() {
        let tiny = dec("0.00000000000001");
        let product = compute(tiny, tiny, Operator::Multiply).unwrap();
        assert_eq!(render(product), "0.0000000000000000000000000001");
    }

    #[test]
    fn test_multiply_past_max_scale_with_trailing_zero_fits() {
        let product = compute(dec("0.0000000000000000000000000012"), dec("0.5"), Operator::Multiply).unwrap();
        assert_eq!(render(product), "0.0000000000000000000000000006");
    }

    #[test]
    fn test_multiply_past_max_scale_rounds_to_significant_digits() {
        let product = compute(dec("0.1234567890123456789"), dec("0.000000000001"), Operator::Multiply).unwrap();
        assert_eq!(render(product), "0.0000000000001234567890123457");
    }

    #[test]
    fn test_multiply_by_zero_at_high_scale() {
        let product = compute(dec("0.000000000000001"), dec("0.00000000000000000"), Operator::Multiply).unwrap();
        assert_eq!(render(product), "0");
    }

    // ===== Divide tests =====

    #[test]
    fn test_divide_twelve_fraction_digits() {
        let q = compute(dec("1"), dec("3"), Operator::Divide).unwrap();
        assert_eq!(render(q), "0.333333333333");
    }

    #[test]
    fn test_divide_rounds_half_up() {
        let q = compute(dec("2"), dec("3"), Operator::Divide).unwrap();
        assert_eq!(render(q), "0.666666666667");
    }

    #[test]
    fn test_divide_strips_trailing_zeros() {
        let q = compute(dec("10"), dec("4"), Operator::Divide).unwrap();
        assert_eq!(render(q), "2.5");
    }

    #[test]
    fn test_divide_keeps_integer_digits_beyond_sixteen() {
        // Division is bounded by fraction digits only
        let q = compute(dec("123456789012345678"), dec("1"), Operator::Divide).unwrap();
        assert_eq!(render(q), "123456789012345678");
    }

    #[test]
    fn test_divide_by_zero() {
        let result = compute(dec("5"), Decimal::ZERO, Operator::Divide);
        assert_eq!(result, Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_divide_by_zero_with_fraction_digits() {
        let result = compute(dec("5"), dec("0.000"), Operator::Divide);
        assert_eq!(result, Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_divide_overflow_is_arithmetic_failure() {
        let result = compute(Decimal::MAX, dec("0.1"), Operator::Divide);
        assert!(matches!(result, Err(CalcError::ArithmeticFailure(_))));
    }

    // ===== Render tests =====

    #[test]
    fn test_render_plain_text() {
        assert_eq!(render(dec("100")), "100");
        assert_eq!(render(dec("1.500")), "1.5");
        assert_eq!(render(dec("0.000")), "0");
        assert_eq!(render(dec("-0.0")), "0");
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(9_999_999_999_999_999), 16);
    }
}
