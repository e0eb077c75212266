//! Crossterm-backed frontend.

use crate::input::{command_for, is_press};
use crate::ui::{self, UiOptions};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use strictly_sokoban::{Command, Frontend, LevelSummary, View};
use tracing::{debug, error, info, instrument};

/// Plays a campaign in the terminal.
///
/// Raw mode and the alternate screen are entered on construction and left
/// when the frontend is dropped, so the terminal is restored on every exit
/// path including errors.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: UiOptions,
}

impl TerminalFrontend {
    /// Takes over the terminal.
    #[instrument]
    pub fn new(options: UiOptions) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e).context("Failed to create terminal");
            }
        };
        let _ = terminal.hide_cursor();

        info!("Terminal ready");
        Ok(Self { terminal, options })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        match self.restore() {
            Ok(()) => debug!("Terminal restored"),
            Err(e) => error!(error = %e, "Failed to restore terminal"),
        }
    }
}

impl Frontend for TerminalFrontend {
    type Error = anyhow::Error;

    fn render(&mut self, view: &View<'_>) -> Result<()> {
        let options = self.options;
        self.terminal
            .draw(|f| ui::draw(f, view, &options))
            .context("Failed to draw board")?;
        Ok(())
    }

    fn next_command(&mut self) -> Result<Command> {
        loop {
            if let Event::Key(key) = event::read().context("Failed to read input")? {
                if let Some(command) = command_for(key) {
                    debug!(%command, "Key mapped to command");
                    return Ok(command);
                }
            }
        }
    }

    fn level_complete(&mut self, summary: &LevelSummary) -> Result<()> {
        self.terminal
            .draw(|f| ui::draw_summary(f, summary))
            .context("Failed to draw summary")?;

        loop {
            if let Event::Key(key) = event::read().context("Failed to read input")? {
                if is_press(&key) {
                    return Ok(());
                }
            }
        }
    }
}
