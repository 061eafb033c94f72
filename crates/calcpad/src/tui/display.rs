//! Right-aligned display field
//!
//! The terminal side of [`TextBuffer`]: the engine writes into it, the UI
//! draws it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::TextBuffer;

/// Read-only text field showing the current number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayField {
    text: String,
}

impl DisplayField {
    /// Creates an empty field
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextBuffer for DisplayField {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

impl Widget for &DisplayField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(self.text.as_str(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }
}
