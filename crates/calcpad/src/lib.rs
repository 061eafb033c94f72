//! calcpad - four-function keypad calculator
//!
//! An accumulator-based state machine over exact decimals, fed one key at a
//! time, with a terminal keypad front end.
//!
//! # Arithmetic
//!
//! - Add, subtract, and multiply round to 16 significant digits, half-up
//! - Divide rounds to 12 fractional digits, half-up
//! - Operators chain left to right with no precedence
//! - Failures (division by zero, results the decimal cannot hold) keep the
//!   previous accumulator
//! - Typed numbers stop growing at 28 digits
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut engine: Engine = Engine::default();
//! engine.handle_all("0.1+0.2=".chars().filter_map(InputEvent::from_char));
//! assert_eq!(engine.display_text(), "0.3");
//!
//! engine.handle_all("/0=".chars().filter_map(InputEvent::from_char));
//! assert_eq!(engine.display_text(), "0.3");
//! assert_eq!(engine.notifier().messages(), ["Division by zero is not allowed."]);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unreadable_literal
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigError, LogFormat};
    pub use crate::core::{
        compute, render, transition, CalcError, CalcResult, DisplayBuffer, Engine, EngineState,
        ErrorNotifier, InputEvent, Operator, RecordingNotifier, TextBuffer,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
    #[cfg(feature = "tui")]
    pub use crate::tui::CalculatorApp;
}
