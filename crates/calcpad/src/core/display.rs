//! Text of the number being entered
//!
//! The buffer owns the start-new-number flag because every editing rule
//! depends on it: after an operator or a result, the next digit replaces the
//! text instead of extending it.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text shown when nothing has been entered
pub const ZERO_TEXT: &str = "0";

/// Most digits a typed number may hold.
///
/// 28 digits always fit the 96-bit mantissa and the maximum scale of
/// [`Decimal`], so a typed literal can never fail to parse.
pub const MAX_INPUT_DIGITS: usize = 28;

/// Editable decimal literal plus the start-new-number flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBuffer {
    text: String,
    start_new_number: bool,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Creates a buffer showing `"0"` that is waiting for a new number
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: ZERO_TEXT.to_string(),
            start_new_number: true,
        }
    }

    /// Returns the current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the next digit or dot starts a fresh number
    #[must_use]
    pub fn starts_new_number(&self) -> bool {
        self.start_new_number
    }

    /// Marks the shown text as finished so the next digit replaces it
    pub fn begin_new_number(&mut self) {
        self.start_new_number = true;
    }

    /// Resets the text to `"0"` and waits for a new number
    pub fn reset(&mut self) {
        self.text.clear();
        self.text.push_str(ZERO_TEXT);
        self.start_new_number = true;
    }

    /// Appends a digit, or replaces the text when starting fresh or at `"0"`.
    ///
    /// Digits past [`MAX_INPUT_DIGITS`] are refused so the text always
    /// parses. Values above 9 are not digits and are ignored.
    pub fn append_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            tracing::warn!(digit, "ignoring out-of-range digit");
            return;
        };

        if self.start_new_number || self.text == ZERO_TEXT {
            self.text.clear();
        } else if self.digit_count() >= MAX_INPUT_DIGITS {
            tracing::debug!(text = %self.text, "input full, digit refused");
            return;
        }
        self.text.push(ch);
        self.start_new_number = false;
    }

    /// Digits of the literal that land in the decimal mantissa; the `0` of a
    /// leading `"0."` does not count.
    fn digit_count(&self) -> usize {
        let digits = self.text.bytes().filter(u8::is_ascii_digit).count();
        if self.text.starts_with("0.") {
            digits - 1
        } else {
            digits
        }
    }

    /// Returns true if no further digit will be accepted
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.start_new_number && self.digit_count() >= MAX_INPUT_DIGITS
    }

    /// Appends a decimal point; a fresh number starts as `"0."`
    pub fn append_dot(&mut self) {
        if self.start_new_number {
            self.text.clear();
            self.text.push_str("0.");
            self.start_new_number = false;
            return;
        }

        if !self.text.contains('.') {
            self.text.push('.');
        }
    }

    /// Removes the last character of a number that is still being typed
    pub fn backspace(&mut self) {
        if self.start_new_number {
            return;
        }

        self.text.pop();
        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Overwrites the text with a computed result
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Parses the text, falling back to zero if it is not a number.
    ///
    /// The editing rules above never produce unparsable text (see
    /// [`MAX_INPUT_DIGITS`]), so the fallback only fires on an invariant
    /// violation. It is logged, not raised.
    #[must_use]
    pub fn current_value(&self) -> Decimal {
        let literal = self.text.strip_suffix('.').unwrap_or(&self.text);
        match Decimal::from_str(literal) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(text = %self.text, error = %err, "display text is not a number, using zero");
                Decimal::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> DisplayBuffer {
        let mut buffer = DisplayBuffer::new();
        for c in keys.chars() {
            match c {
                '.' => buffer.append_dot(),
                '<' => buffer.backspace(),
                d => buffer.append_digit(d.to_digit(10).unwrap() as u8),
            }
        }
        buffer
    }

    // ===== Constructor tests =====

    #[test]
    fn test_new_buffer() {
        let buffer = DisplayBuffer::new();
        assert_eq!(buffer.text(), "0");
        assert!(buffer.starts_new_number());
    }

    #[test]
    fn test_default_buffer() {
        assert_eq!(DisplayBuffer::default(), DisplayBuffer::new());
    }

    // ===== append_digit tests =====

    #[test]
    fn test_first_digit_replaces_zero() {
        let buffer = typed("7");
        assert_eq!(buffer.text(), "7");
        assert!(!buffer.starts_new_number());
    }

    #[test]
    fn test_digits_append() {
        assert_eq!(typed("123").text(), "123");
    }

    #[test]
    fn test_leading_zeros_collapse() {
        assert_eq!(typed("0007").text(), "7");
    }

    #[test]
    fn test_digit_after_begin_new_number_replaces() {
        let mut buffer = typed("12");
        buffer.begin_new_number();
        buffer.append_digit(3);
        assert_eq!(buffer.text(), "3");
    }

    #[test]
    fn test_digit_after_zero_fraction_appends() {
        assert_eq!(typed("0.05").text(), "0.05");
    }

    // ===== append_dot tests =====

    #[test]
    fn test_dot_on_fresh_number() {
        let buffer = typed(".");
        assert_eq!(buffer.text(), "0.");
        assert!(!buffer.starts_new_number());
    }

    #[test]
    fn test_dot_after_digits() {
        assert_eq!(typed("12.5").text(), "12.5");
    }

    #[test]
    fn test_second_dot_ignored() {
        assert_eq!(typed("1.2.3.").text(), "1.23");
    }

    #[test]
    fn test_dot_after_result_starts_fraction() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_text("42");
        buffer.begin_new_number();
        buffer.append_dot();
        assert_eq!(buffer.text(), "0.");
    }

    // ===== backspace tests =====

    #[test]
    fn test_backspace_removes_last_char() {
        assert_eq!(typed("123<").text(), "12");
    }

    #[test]
    fn test_backspace_removes_dot() {
        assert_eq!(typed("4.<").text(), "4");
    }

    #[test]
    fn test_backspace_to_empty_resets() {
        let buffer = typed("5<");
        assert_eq!(buffer.text(), "0");
        assert!(buffer.starts_new_number());
    }

    #[test]
    fn test_backspace_ignored_on_fresh_number() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_text("99");
        buffer.begin_new_number();
        buffer.backspace();
        assert_eq!(buffer.text(), "99");
    }

    #[test]
    fn test_backspace_on_initial_zero_is_noop() {
        let buffer = typed("<<<");
        assert_eq!(buffer.text(), "0");
        assert!(buffer.starts_new_number());
    }

    // ===== reset / set_text tests =====

    #[test]
    fn test_reset() {
        let mut buffer = typed("3.14");
        buffer.reset();
        assert_eq!(buffer, DisplayBuffer::new());
    }

    #[test]
    fn test_set_text_keeps_flag() {
        let mut buffer = typed("1");
        buffer.set_text("-2.5");
        assert_eq!(buffer.text(), "-2.5");
        assert!(!buffer.starts_new_number());
    }

    // ===== current_value tests =====

    #[test]
    fn test_current_value_integer() {
        assert_eq!(typed("42").current_value(), Decimal::from(42));
    }

    #[test]
    fn test_current_value_fraction() {
        assert_eq!(typed("0.25").current_value(), Decimal::new(25, 2));
    }

    #[test]
    fn test_current_value_trailing_dot() {
        assert_eq!(typed("5.").current_value(), Decimal::from(5));
        assert_eq!(typed(".").current_value(), Decimal::ZERO);
    }

    #[test]
    fn test_current_value_negative_result() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_text("-7.5");
        assert_eq!(buffer.current_value(), Decimal::new(-75, 1));
    }

    #[test]
    fn test_current_value_falls_back_to_zero() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_text("not a number");
        assert_eq!(buffer.current_value(), Decimal::ZERO);
    }

    #[test]
    fn test_current_value_set_text_too_wide_falls_back_to_zero() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_text("123456789012345678901234567890");
        assert_eq!(buffer.current_value(), Decimal::ZERO);
    }

    // ===== Input limit tests =====

    #[test]
    fn test_integer_entry_stops_at_limit() {
        let buffer = typed(&"1".repeat(32));
        assert_eq!(buffer.text(), "1".repeat(MAX_INPUT_DIGITS));
        assert!(buffer.is_full());
        assert_eq!(
            buffer.current_value(),
            Decimal::from_str(&"1".repeat(MAX_INPUT_DIGITS)).unwrap()
        );
    }

    #[test]
    fn test_largest_typed_integer_parses() {
        let buffer = typed(&"9".repeat(40));
        assert_eq!(buffer.text().len(), MAX_INPUT_DIGITS);
        assert!(Decimal::from_str(buffer.text()).is_ok());
    }

    #[test]
    fn test_fraction_entry_stops_at_max_scale() {
        let keys = format!(".{}", "0".repeat(35));
        let buffer = typed(&keys);
        assert_eq!(buffer.text(), format!("0.{}", "0".repeat(MAX_INPUT_DIGITS)));

        let keys = format!(".{}1", "0".repeat(27));
        let buffer = typed(&keys);
        assert_eq!(buffer.current_value(), Decimal::new(1, 28));
    }

    #[test]
    fn test_mixed_entry_counts_every_digit() {
        let keys = format!("{}.{}", "1".repeat(20), "2".repeat(20));
        let buffer = typed(&keys);
        assert_eq!(buffer.text(), format!("{}.{}", "1".repeat(20), "2".repeat(8)));
        assert!(Decimal::from_str(buffer.text()).is_ok());
    }

    #[test]
    fn test_backspace_reopens_full_input() {
        let mut buffer = typed(&"1".repeat(MAX_INPUT_DIGITS));
        buffer.append_digit(2);
        assert!(buffer.text().ends_with('1'));
        buffer.backspace();
        buffer.append_digit(2);
        assert!(buffer.text().ends_with('2'));
        assert!(buffer.is_full());
    }

    #[test]
    fn test_fresh_number_is_never_full() {
        let mut buffer = typed(&"1".repeat(MAX_INPUT_DIGITS));
        buffer.begin_new_number();
        assert!(!buffer.is_full());
        buffer.append_digit(3);
        assert_eq!(buffer.text(), "3");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut buffer = typed("4");
        buffer.append_digit(12);
        assert_eq!(buffer.text(), "4");

        let mut fresh = DisplayBuffer::new();
        fresh.append_digit(10);
        assert_eq!(fresh, DisplayBuffer::new());
    }
}
