//! Calculator drivers
//!
//! A scenario is written once against [`CalculatorDriver`] and then run
//! against every front end: the bare [`Engine`] through [`EngineDriver`] and,
//! with the `tui` feature, the terminal app through [`TuiDriver`].
//!
//! # Example
//!
//! ```rust
//! use calcpad::driver::{verify_chained_operators, CalculatorDriver, EngineDriver};
//!
//! let mut driver = EngineDriver::new();
//! driver.type_keys("2+3+");
//! assert_eq!(driver.display(), "5");
//!
//! driver.clear();
//! verify_chained_operators(&mut driver);
//! ```

use crate::core::{Engine, InputEvent, Operator, RecordingNotifier};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Feeds one input event
    fn press(&mut self, event: InputEvent);

    /// Clicks the keypad button with the given label.
    ///
    /// Returns false if no button carries that label.
    fn click(&mut self, label: &str) -> bool;

    /// Types characters as keyboard input; spaces are skipped
    fn type_keys(&mut self, keys: &str);

    /// Text currently on the display
    fn display(&self) -> String;

    /// Operator waiting for its right operand
    fn pending_operator(&self) -> Option<Operator>;

    /// Drains the error messages reported since the last call, oldest first
    fn take_errors(&mut self) -> Vec<String>;

    /// Resets the calculator
    fn clear(&mut self) {
        self.press(InputEvent::Clear);
    }
}

/// Driver over the bare engine with a `String` display
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: Engine,
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine<String, RecordingNotifier> {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, event: InputEvent) {
        self.engine.handle(event);
    }

    fn click(&mut self, label: &str) -> bool {
        match InputEvent::from_label(label) {
            Some(event) => {
                self.engine.handle(event);
                true
            }
            None => false,
        }
    }

    fn type_keys(&mut self, keys: &str) {
        let events = keys
            .chars()
            .filter(|&c| c != ' ')
            .filter_map(InputEvent::from_char);
        self.engine.handle_all(events);
    }

    fn display(&self) -> String {
        self.engine.display_text().to_string()
    }

    fn pending_operator(&self) -> Option<Operator> {
        self.engine.state().pending_operator()
    }

    fn take_errors(&mut self) -> Vec<String> {
        let notifier = self.engine.notifier_mut();
        std::iter::from_fn(|| notifier.take()).collect()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::CalculatorDriver;
    use crate::core::{InputEvent, Operator};
    use crate::tui::CalculatorApp;

    /// Driver over the terminal app, feeding it real key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        fn key_for(c: char) -> KeyEvent {
            let code = match c {
                '\n' | '\r' => KeyCode::Enter,
                '\u{8}' | '\u{7f}' => KeyCode::Backspace,
                '\u{1b}' => KeyCode::Esc,
                c => KeyCode::Char(c),
            };
            KeyEvent::new(code, KeyModifiers::NONE)
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: InputEvent) {
            self.app.dispatch(event);
        }

        fn click(&mut self, label: &str) -> bool {
            self.app.click_label(label)
        }

        fn type_keys(&mut self, keys: &str) {
            for c in keys.chars().filter(|&c| c != ' ') {
                self.app.handle_key(Self::key_for(c));
            }
        }

        fn display(&self) -> String {
            self.app.display_text().to_string()
        }

        fn pending_operator(&self) -> Option<Operator> {
            self.app.engine().state().pending_operator()
        }

        // Reading the modal also closes it, as a user would.
        fn take_errors(&mut self) -> Vec<String> {
            let errors = self.app.alert().map(str::to_string).into_iter().collect();
            self.app.dismiss_alert();
            errors
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared scenarios =====
// Each works with ANY CalculatorDriver and leaves it cleared.

/// Digit entry, the leading zero, and the single decimal point
pub fn verify_number_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.display(), "0");

    driver.type_keys("007");
    assert_eq!(driver.display(), "7");

    driver.type_keys("1.2.3.");
    assert_eq!(driver.display(), "71.23");
    assert_eq!(driver.display().matches('.').count(), 1);

    driver.clear();
    driver.type_keys(".5");
    assert_eq!(driver.display(), "0.5");
    driver.clear();
}

/// Backspace trims the number and falls back to `"0"`
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("12");
    driver.press(InputEvent::Backspace);
    assert_eq!(driver.display(), "1");
    driver.press(InputEvent::Backspace);
    assert_eq!(driver.display(), "0");

    // Next digit starts a fresh number
    driver.type_keys("9");
    assert_eq!(driver.display(), "9");

    // Results are not editable
    driver.type_keys("+1=");
    assert_eq!(driver.display(), "10");
    driver.press(InputEvent::Backspace);
    assert_eq!(driver.display(), "10");
    driver.clear();
}

/// The four operators through `=`
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [
        ("2+3=", "5"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("3-5=", "-2"),
    ] {
        driver.clear();
        driver.type_keys(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
        assert!(driver.take_errors().is_empty());
    }
    driver.clear();
}

/// Left-to-right chaining and operator substitution
pub fn verify_chained_operators<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("2+3+");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.pending_operator(), Some(Operator::Add));

    driver.type_keys("4=");
    assert_eq!(driver.display(), "9");
    assert_eq!(driver.pending_operator(), None);

    // Substitution: the second operator replaces the first
    driver.clear();
    driver.type_keys("2+*3=");
    assert_eq!(driver.display(), "6");

    // No precedence
    driver.clear();
    driver.type_keys("2+3*4=");
    assert_eq!(driver.display(), "20");
    driver.clear();
}

/// Decimal rounding rules
pub fn verify_decimal_precision<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("0.1+0.2=");
    assert_eq!(driver.display(), "0.3");

    driver.clear();
    driver.type_keys("1/3=");
    assert_eq!(driver.display(), "0.333333333333");

    driver.clear();
    driver.type_keys("2/3=");
    assert_eq!(driver.display(), "0.666666666667");

    driver.clear();
    driver.type_keys("1.50*2=");
    assert_eq!(driver.display(), "3");
    driver.clear();
}

/// Division by zero is reported and recoverable
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("5/0=");
    assert_eq!(
        driver.take_errors(),
        vec!["Division by zero is not allowed.".to_string()]
    );
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.pending_operator(), Some(Operator::Divide));

    // Retry with a new right operand
    driver.type_keys("2=");
    assert_eq!(driver.display(), "2.5");
    assert!(driver.take_errors().is_empty());
    driver.clear();
}

/// Equals with nothing pending changes nothing
pub fn verify_equals_without_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("42=");
    assert_eq!(driver.display(), "42");
    driver.type_keys("=");
    assert_eq!(driver.display(), "42");
    assert!(driver.take_errors().is_empty());
    driver.clear();
}

/// Keypad labels drive the same machine as keys
pub fn verify_keypad_labels<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    for label in ["9", "×", "8", "−", "2", "="] {
        assert!(driver.click(label), "label: {label}");
    }
    assert_eq!(driver.display(), "70");

    assert!(driver.click("←"));
    assert_eq!(driver.display(), "70");
    assert!(driver.click("C"));
    assert_eq!(driver.display(), "0");
    assert!(!driver.click("sqrt"));
}

/// Clear always returns to the initial state
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.type_keys("12+3");
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.pending_operator(), None);
    driver.type_keys("4=");
    assert_eq!(driver.display(), "4");
    driver.clear();
}

/// Over-long numbers stop growing instead of turning into zero
pub fn verify_input_limits<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys(&"1".repeat(32));
    assert_eq!(driver.display(), "1".repeat(28));

    driver.type_keys("+1=");
    assert_eq!(driver.display(), "1111111111111111000000000000");
    assert!(driver.take_errors().is_empty());

    driver.clear();
    driver.type_keys(&format!(".{}1", "0".repeat(31)));
    assert_eq!(driver.display(), format!("0.{}", "0".repeat(28)));
    driver.clear();
}

/// Products finer than the decimal can hold are reported, not zeroed
pub fn verify_underflow<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("0.000000000000001*0.000000000000001=");
    let errors = driver.take_errors();
    assert_eq!(errors, vec!["Arithmetic error: result too small to represent".to_string()]);
    assert_eq!(driver.display(), "0.000000000000001");
    assert_eq!(driver.pending_operator(), Some(Operator::Multiply));

    driver.type_keys("1000=");
    assert_eq!(driver.display(), "0.000000000001");
    driver.clear();
}

/// Runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_number_entry(driver);
    verify_backspace(driver);
    verify_basic_arithmetic(driver);
    verify_chained_operators(driver);
    verify_decimal_precision(driver);
    verify_division_by_zero(driver);
    verify_equals_without_operator(driver);
    verify_keypad_labels(driver);
    verify_input_limits(driver);
    verify_underflow(driver);
    verify_clear(driver);
}
