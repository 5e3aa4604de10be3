pub mod app;
mod ui;
mod helpers;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    cursor::{SetCursorStyle, Show},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub(crate) fn run_tui() -> Result<()> {
    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let mut app = App::new();

    let outcome = ui::run_ui_loop(&mut terminal, &mut app);

    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    log::info!("session ended after {} calculations", app.history.len());
    outcome
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(enter_alternate_screen(), || {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)
    })
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetCursorStyle::BlinkingBar)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs `undo` if `result` is an error. The original error is returned either way.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce() -> io::Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(e) = undo() {
            log::warn!("could not undo terminal setup: {}", e);
        }
    }
    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        Show,
        SetCursorStyle::DefaultUserShape
    )?;
    Ok(())
}
