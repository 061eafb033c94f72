//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Window title
pub const TITLE: &str = " Calculator ";

/// Key bindings shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+ - * /", "Operator"),
    ("Enter =", "Evaluate"),
    ("Bksp", "Delete digit"),
    ("Esc", "Clear"),
    ("Click", "Press button"),
    ("Ctrl+C", "Quit"),
];

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

struct Regions {
    display: Rect,
    keypad: Rect,
    help: Rect,
}

fn regions(area: Rect) -> Regions {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(24),    // Display and keypad
            Constraint::Length(24), // Help sidebar
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Display
            Constraint::Min(7),    // Keypad
        ])
        .split(columns[0]);

    Regions {
        display: main[0],
        keypad: main[1],
        help: columns[1],
    }
}

/// Where the keypad lands when the UI is drawn into `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    regions(area).keypad
}

/// Centered rectangle of at most `width` x `height` inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>8}", key), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_alert(message: &str, area: Rect, buf: &mut Buffer) {
        let popup = centered(area, 40, 6);
        Clear.render(popup, buf);

        let text = vec![
            Line::from(Span::styled(
                message,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Error ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .render(popup, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = regions(area);
        self.app.display().render(regions.display, buf);
        KeypadWidget::new(self.app.keypad()).render(regions.keypad, buf);
        self.render_help(regions.help, buf);

        if let Some(message) = self.app.alert() {
            Self::render_alert(message, area, buf);
        }
    }
}
