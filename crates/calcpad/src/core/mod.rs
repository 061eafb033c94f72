//! Calculator core: display buffer, operators, and the input state machine
//!
//! Nothing in here knows about terminals or widgets. The engine talks to the
//! outside world only through [`TextBuffer`] and [`ErrorNotifier`].

pub mod display;
pub mod engine;
mod operations;
pub mod surface;

pub use display::DisplayBuffer;
pub use engine::{transition, Engine, EngineState, InputEvent};
pub use operations::{compute, render, Operator, DIVISION_SCALE, MAX_SCALE, SIGNIFICANT_DIGITS};
pub use surface::{ErrorNotifier, RecordingNotifier, TextBuffer};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures of a single arithmetic operation.
///
/// Neither variant is fatal: the engine abandons the failed operation and
/// keeps its previous accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Divisor was exactly zero
    #[error("Division by zero is not allowed.")]
    DivisionByZero,
    /// Any other failure of the decimal arithmetic (overflow and the like)
    #[error("Arithmetic error: {0}")]
    ArithmeticFailure(String),
}

impl CalcError {
    /// Creates an arithmetic failure with the given detail
    #[must_use]
    pub fn arithmetic(detail: impl Into<String>) -> Self {
        Self::ArithmeticFailure(detail.into())
    }
}
