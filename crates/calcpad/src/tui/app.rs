//! TUI application state
//!
//! Routes keys and clicks into the engine and holds the error modal. While
//! the modal is open the next key or click only dismisses it.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::core::{Engine, InputEvent, RecordingNotifier};

use super::display::DisplayField;
use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: Engine<DisplayField, RecordingNotifier>,
    keypad: Keypad,
    input_handler: InputHandler,
    alert: Option<String>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app showing `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: Engine::new(DisplayField::new(), RecordingNotifier::new()),
            keypad: Keypad::new(),
            input_handler: InputHandler::new(),
            alert: None,
            should_quit: false,
        }
    }

    /// Returns the display field
    #[must_use]
    pub fn display(&self) -> &DisplayField {
        self.engine.buffer()
    }

    /// Returns the text on the display
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.engine.display_text()
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine<DisplayField, RecordingNotifier> {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the open error message, if any
    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Closes the error modal
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feeds one event to the engine, unless the error modal is open
    pub fn dispatch(&mut self, event: InputEvent) {
        if self.alert.is_some() {
            self.dismiss_alert();
            return;
        }

        self.keypad.highlight(event);
        self.engine.handle(event);

        if let Some(message) = self.engine.notifier_mut().take() {
            self.alert = Some(message);
        }
        self.engine.notifier_mut().clear();
    }

    /// Handles a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key(key) {
            KeyAction::Quit => self.quit(),
            KeyAction::Input(event) => self.dispatch(event),
            KeyAction::None => {
                if self.alert.is_some() {
                    self.dismiss_alert();
                }
            }
        }
    }

    /// Handles a mouse event; `area` is the full frame the UI was drawn in
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        if self.alert.is_some() {
            self.dismiss_alert();
            return;
        }

        let keypad_area = ui::keypad_area(area);
        if let Some(index) = self.keypad.hit_test(keypad_area, mouse.column, mouse.row) {
            if let Some(event) = self.keypad.get_button(index).map(|b| b.event) {
                self.dispatch(event);
            }
        }
    }

    /// Presses the keypad button with the given label.
    ///
    /// Returns false if no button carries that label.
    pub fn click_label(&mut self, label: &str) -> bool {
        let Some(index) = self.keypad.find_button_by_label(label) else {
            return false;
        };
        match self.keypad.get_button(index).map(|b| b.event) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }
}
