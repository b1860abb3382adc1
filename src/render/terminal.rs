//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of `ScreenRenderer` on top of
//! the crossterm backend. It only draws; state lives in the controller.

use crate::error::{PinConfirmError, Result};
use crate::render::renderer::{draw_screen, ScreenRenderer, ScreenView};
use crate::render::theme::ColorTheme;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Self {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenRenderer for TerminalUI {
    fn render(&mut self, view: &ScreenView) -> Result<()> {
        let theme = &self.theme;
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| PinConfirmError::ui("terminal not initialized"))?;
        terminal.draw(|frame| draw_screen(frame, view, theme))?;
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.show_cursor()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        } else {
            // initialize may have failed after entering the alternate screen
            execute!(io::stdout(), LeaveAlternateScreen)?;
        }
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        if self.terminal.is_some() {
            let _ = self.cleanup();
        }
    }
}
