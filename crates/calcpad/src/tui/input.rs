//! Keyboard mapping for the terminal front end

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::InputEvent;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an event to the calculator
    Input(InputEvent),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Terminals with keyboard enhancement also report releases
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let event = match code {
            KeyCode::Char(c) => InputEvent::from_char(c),
            KeyCode::Backspace => Some(InputEvent::Backspace),
            KeyCode::Enter => Some(InputEvent::Equals),
            KeyCode::Esc => Some(InputEvent::Clear),
            _ => None,
        };

        event.map_or(KeyAction::None, KeyAction::Input)
    }
}
