//! Terminal front end: keypad, display field, key bindings, error modal

mod app;
mod display;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use display::DisplayField;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI};
