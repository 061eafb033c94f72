//! calcpad terminal keypad
//!
//! Configuration comes from `CALCPAD_CONFIG` and the `CALCPAD_LOG*`
//! environment variables; see [`calcpad::config`].

use std::io;

use calcpad::config::AppConfig;
use calcpad::tui::{render, CalculatorApp};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    calcpad::logging::init(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "calcpad starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(%err, "calcpad stopped on error");
        eprintln!("Error: {err}");
    }
    info!("calcpad exiting");

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = CalculatorApp::new();
    let mut area = Rect::default();

    loop {
        terminal.draw(|frame| {
            area = frame.area();
            render(&app, frame);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, area),
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
