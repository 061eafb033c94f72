//! Numerical keypad for the terminal calculator
//!
//! Buttons can be clicked with the mouse and light up when the matching key
//! is typed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{InputEvent, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text printed on the button
    pub label: &'static str,
    /// Event sent when the button is pressed
    pub event: InputEvent,
    /// Grid row
    pub row: usize,
    /// First grid column
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a one-cell button
    #[must_use]
    pub fn new(label: &'static str, event: InputEvent, row: usize, col: usize) -> Self {
        Self::wide(label, event, row, col, 1)
    }

    /// Creates a button covering `span` columns
    #[must_use]
    pub fn wide(
        label: &'static str,
        event: InputEvent,
        row: usize,
        col: usize,
        span: usize,
    ) -> Self {
        Self {
            label,
            event,
            row,
            col,
            span,
            pressed: false,
        }
    }

    /// Returns true if the button covers the given cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout, 5 rows by 4 columns
/// ```text
/// [ C ] [ ← ] [ ÷ ] [ × ]
/// [ 7 ] [ 8 ] [ 9 ] [ − ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [    0    ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use InputEvent::{Backspace, Clear, Digit, Dot, Equals};
        let op = InputEvent::Operator;

        let buttons = vec![
            KeypadButton::new("C", Clear, 0, 0),
            KeypadButton::new("←", Backspace, 0, 1),
            KeypadButton::new("÷", op(Operator::Divide), 0, 2),
            KeypadButton::new("×", op(Operator::Multiply), 0, 3),
            KeypadButton::new("7", Digit(7), 1, 0),
            KeypadButton::new("8", Digit(8), 1, 1),
            KeypadButton::new("9", Digit(9), 1, 2),
            KeypadButton::new("−", op(Operator::Subtract), 1, 3),
            KeypadButton::new("4", Digit(4), 2, 0),
            KeypadButton::new("5", Digit(5), 2, 1),
            KeypadButton::new("6", Digit(6), 2, 2),
            KeypadButton::new("+", op(Operator::Add), 2, 3),
            KeypadButton::new("1", Digit(1), 3, 0),
            KeypadButton::new("2", Digit(2), 3, 1),
            KeypadButton::new("3", Digit(3), 3, 2),
            KeypadButton::new("=", Equals, 3, 3),
            KeypadButton::wide("0", Digit(0), 4, 0, 2),
            KeypadButton::new(".", Dot, 4, 2),
            KeypadButton::new("=", Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Finds a button by its label (ASCII operator aliases accepted)
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<usize> {
        let event = InputEvent::from_label(label)?;
        self.find_button_by_event(event)
    }

    /// Finds the first button that sends `event`
    #[must_use]
    pub fn find_button_by_event(&self, event: InputEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights every button that sends `event`
    pub fn highlight(&mut self, event: InputEvent) {
        for btn in &mut self.buttons {
            btn.set_pressed(btn.event == event);
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Converts a click position inside `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Account for border (1 char on each side)
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let (btn_width, btn_height) = self.cell_size(area);
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            self.index_at(row, col)
        } else {
            None
        }
    }

    fn cell_size(&self, area: Rect) -> (u16, u16) {
        let width = area.width.saturating_sub(2) / self.cols as u16;
        let height = area.height.saturating_sub(2) / self.rows as u16;
        (width, height)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        if inner.width < 4 || inner.height < 5 {
            return; // Too small to render
        }

        let (btn_width, btn_height) = self.keypad.cell_size(area);

        for btn in self.keypad.buttons() {
            let x = inner.x + (btn.col as u16 * btn_width);
            let y = inner.y + (btn.row as u16 * btn_height);
            let width = btn_width * btn.span as u16;

            let style = if btn.pressed {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                match btn.event {
                    InputEvent::Digit(_) | InputEvent::Dot => Style::default().fg(Color::White),
                    InputEvent::Operator(_) => Style::default().fg(Color::Yellow),
                    InputEvent::Equals => Style::default().fg(Color::Green),
                    InputEvent::Clear | InputEvent::Backspace => Style::default().fg(Color::Red),
                }
            };

            if width >= 3 {
                let label = format!("[{}]", btn.label);
                let label_width = label.chars().count() as u16;
                let label_x = x + width.saturating_sub(label_width) / 2;
                let label_y = y + btn_height / 2;

                if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                    buf.set_span(label_x, label_y, &Span::styled(label, style), width);
                }
            }
        }
    }
}
