use std::io::{self, Stdout};

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::AppResult;

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

pub trait UiActions {
    /// Switches stdout to raw mode on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error when terminal setup fails. Anything already
    /// switched on is restored first.
    fn setup_terminal() -> AppResult<DashboardTerminal>;

    /// Restores the terminal. Safe to call more than once.
    fn cleanup();
}

pub struct Ui;

impl Ui {
    fn enter() -> AppResult<DashboardTerminal> {
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        if let Err(err) = terminal.hide_cursor() {
            tracing::debug!("Failed to hide cursor: {}", err);
        }
        Ok(terminal)
    }
}

impl UiActions for Ui {
    fn setup_terminal() -> AppResult<DashboardTerminal> {
        enable_raw_mode()?;
        Self::enter().inspect_err(|_| Self::cleanup())
    }

    fn cleanup() {
        if let Err(err) = disable_raw_mode() {
            tracing::debug!("Failed to disable raw mode: {}", err);
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            tracing::debug!("Failed to leave alternate screen: {}", err);
        }
    }
}
