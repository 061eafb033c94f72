//! The accumulator state machine
//!
//! [`EngineState::handle_event`] is the whole of the calculator's behaviour.
//! [`Engine`] wraps it with the two side effects a front end needs: copying
//! the display text into a [`TextBuffer`] and reporting failures to an
//! [`ErrorNotifier`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::display::DisplayBuffer;
use crate::core::operations::{compute, render, Operator};
use crate::core::surface::{ErrorNotifier, RecordingNotifier, TextBuffer};
use crate::core::CalcError;

/// A discrete input from a button or key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInputEvent")]
pub enum InputEvent {
    /// Reset everything
    Clear,
    /// Delete the last typed character
    Backspace,
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Dot,
    /// Select an operator, evaluating any pending one first
    Operator(Operator),
    /// Evaluate the pending operator
    Equals,
}

/// Wire form of [`InputEvent`] before the digit range is checked
#[derive(Deserialize)]
enum RawInputEvent {
    Clear,
    Backspace,
    Digit(u8),
    Dot,
    Operator(Operator),
    Equals,
}

impl TryFrom<RawInputEvent> for InputEvent {
    type Error = String;

    fn try_from(raw: RawInputEvent) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawInputEvent::Clear => Self::Clear,
            RawInputEvent::Backspace => Self::Backspace,
            RawInputEvent::Digit(d) => {
                Self::digit(d).ok_or_else(|| format!("digit out of range: {d}"))?
            }
            RawInputEvent::Dot => Self::Dot,
            RawInputEvent::Operator(op) => Self::Operator(op),
            RawInputEvent::Equals => Self::Equals,
        })
    }
}

impl InputEvent {
    /// Digit event for `d`, or `None` unless `d` is 0-9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Maps a typed character to an event.
    ///
    /// `*` and `/` select × and ÷, newline selects `=`, and the BS, DEL and
    /// ESC control characters map to backspace and clear.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).and_then(|d| Self::digit(d as u8)),
            '.' => Some(Self::Dot),
            '=' | '\n' | '\r' => Some(Self::Equals),
            '\u{8}' | '\u{7f}' => Some(Self::Backspace),
            '\u{1b}' => Some(Self::Clear),
            _ => Operator::from_char(c).map(Self::Operator),
        }
    }

    /// Maps a keypad button label to an event
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "C" => Some(Self::Clear),
            "←" => Some(Self::Backspace),
            "=" => Some(Self::Equals),
            _ => {
                let mut chars = label.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                match c {
                    '0'..='9' | '.' => Self::from_char(c),
                    _ => Operator::from_char(c).map(Self::Operator),
                }
            }
        }
    }

    /// The keypad label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Clear => "C".to_string(),
            Self::Backspace => "←".to_string(),
            Self::Digit(d) => d.to_string(),
            Self::Dot => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
        }
    }
}

/// Everything the calculator remembers between events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    accumulator: Decimal,
    pending_operator: Option<Operator>,
    display: DisplayBuffer,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineState {
    /// Initial state: zero accumulator, no operator, display `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulator: Decimal::ZERO,
            pending_operator: None,
            display: DisplayBuffer::new(),
        }
    }

    /// The left operand carried between operations
    #[must_use]
    pub fn accumulator(&self) -> Decimal {
        self.accumulator
    }

    /// The operator waiting for its right operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// True if the next digit or dot begins a fresh number
    #[must_use]
    pub fn start_new_number(&self) -> bool {
        self.display.starts_new_number()
    }

    /// The text shown to the user
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.display.text()
    }

    /// The display buffer
    #[must_use]
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Applies one event. On failure the state is left valid and the error is
    /// returned for the caller to report.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), CalcError> {
        match event {
            InputEvent::Clear => {
                self.clear();
                Ok(())
            }
            InputEvent::Backspace => {
                self.display.backspace();
                Ok(())
            }
            InputEvent::Digit(d) => {
                self.display.append_digit(d);
                Ok(())
            }
            InputEvent::Dot => {
                self.display.append_dot();
                Ok(())
            }
            InputEvent::Operator(op) => self.apply_operator(op),
            InputEvent::Equals => self.equals(),
        }
    }

    fn clear(&mut self) {
        self.accumulator = Decimal::ZERO;
        self.pending_operator = None;
        self.display.reset();
    }

    fn apply_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        let outcome = match self.pending_operator {
            None => {
                self.accumulator = self.display.current_value();
                Ok(())
            }
            // A new operand was typed: evaluate the pending expression first
            Some(pending) if !self.display.starts_new_number() => {
                let result = self.evaluate(pending);
                if let Ok(value) = result {
                    self.accumulator = value;
                }
                self.show_accumulator();
                result.map(|_| ())
            }
            // Operator pressed twice in a row: substitute, don't evaluate
            Some(_) => Ok(()),
        };

        self.pending_operator = Some(op);
        self.display.begin_new_number();
        outcome
    }

    fn equals(&mut self) -> Result<(), CalcError> {
        let Some(pending) = self.pending_operator else {
            return Ok(());
        };

        let result = self.evaluate(pending);
        if let Ok(value) = result {
            self.accumulator = value;
            self.pending_operator = None;
        }
        // On failure the operator stays pending so the user can retry
        self.show_accumulator();
        self.display.begin_new_number();
        result.map(|_| ())
    }

    fn evaluate(&self, op: Operator) -> Result<Decimal, CalcError> {
        let rhs = self.display.current_value();
        compute(self.accumulator, rhs, op)
    }

    fn show_accumulator(&mut self) {
        self.display.set_text(&render(self.accumulator));
    }
}

/// Pure form of [`EngineState::handle_event`]: returns the next state and
/// the error raised along the way, if any.
#[must_use]
pub fn transition(state: &EngineState, event: InputEvent) -> (EngineState, Option<CalcError>) {
    let mut next = state.clone();
    let error = next.handle_event(event).err();
    (next, error)
}

/// Engine bound to a display adapter and an error channel
#[derive(Debug)]
pub struct Engine<B = String, N = RecordingNotifier> {
    state: EngineState,
    buffer: B,
    notifier: N,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(String::new(), RecordingNotifier::new())
    }
}

impl<B: TextBuffer, N: ErrorNotifier> Engine<B, N> {
    /// Creates an engine in the initial state and shows `"0"` on `buffer`
    pub fn new(mut buffer: B, notifier: N) -> Self {
        let state = EngineState::new();
        buffer.set_text(state.display_text());
        Self {
            state,
            buffer,
            notifier,
        }
    }

    /// Processes one event to completion
    pub fn handle(&mut self, event: InputEvent) {
        tracing::debug!(?event, "input event");

        let (next, error) = transition(&self.state, event);
        self.state = next;
        self.buffer.set_text(self.state.display_text());

        if let Some(error) = error {
            tracing::warn!(
                %error,
                accumulator = %self.state.accumulator(),
                pending = ?self.state.pending_operator(),
                "operation abandoned"
            );
            self.notifier.notify(&error);
        }
    }

    /// Processes a sequence of events in order
    pub fn handle_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    /// The current state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The text most recently written to the display adapter
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.buffer.text()
    }

    /// The display adapter
    #[must_use]
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// The error channel
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the error channel, e.g. to drain queued messages
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
