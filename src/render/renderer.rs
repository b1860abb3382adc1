//! Screen renderer trait and the view model it draws.
//!
//! This module defines the `ScreenRenderer` trait for rendering the confirmation
//! screen and managing terminal lifecycle hooks, plus the pure drawing function
//! shared by every ratatui backend.

use crate::confirm::{Label, SaveAnimation};
use crate::error::Result;
use crate::pin::KeyboardMode;
use crate::render::theme::ColorTheme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Everything the screen shows, derived from controller state plus presenter extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub label: Label,
    pub save_animation: SaveAnimation,
    pub keyboard_mode: KeyboardMode,
    /// Number of characters typed so far; the characters themselves are never drawn.
    pub entry_length: usize,
    /// Extra line under the status, e.g. the retry hint after a failed save.
    pub notice: Option<String>,
    pub spinner_frame: usize,
}

impl ScreenView {
    pub fn label_text(&self) -> &'static str {
        match self.label {
            Label::ReEnterPin => "Re-enter the PIN you just created.",
            Label::PinDoesNotMatch => "PINs don't match. Try again.",
            Label::CreatingPin => "Creating your PIN...",
            Label::Empty => "",
        }
    }

    pub fn status_text(&self) -> String {
        match self.save_animation {
            SaveAnimation::None => String::new(),
            SaveAnimation::Loading => {
                format!("{} Saving", SPINNER[self.spinner_frame % SPINNER.len()])
            }
            SaveAnimation::Success => "[ok] PIN created".to_string(),
            SaveAnimation::Failure => "[!!] PIN creation failed".to_string(),
        }
    }

    pub fn keyboard_hint(&self) -> &'static str {
        match self.keyboard_mode {
            KeyboardMode::Numeric => "Tab: alphanumeric keyboard | Enter: confirm | Esc: back",
            KeyboardMode::AlphaNumeric => "Tab: numeric keyboard | Enter: confirm | Esc: back",
        }
    }

    fn masked_entry(&self) -> String {
        if self.entry_length == 0 {
            "_".to_string()
        } else {
            "*".repeat(self.entry_length)
        }
    }
}

/// Draw the confirmation screen into `frame`.
pub fn draw_screen(frame: &mut Frame, view: &ScreenView, theme: &ColorTheme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // label
            Constraint::Length(1), // entry
            Constraint::Length(1),
            Constraint::Length(1), // status
            Constraint::Length(1), // notice
            Constraint::Min(0),
            Constraint::Length(1), // hint
        ])
        .split(frame.size());

    let text_style = theme
        .normal_text
        .map_or_else(Style::default, |color| Style::default().fg(color));

    let label_style = match view.label {
        Label::PinDoesNotMatch => Style::default().fg(theme.error_text),
        _ => text_style,
    };
    let status_style = match view.save_animation {
        SaveAnimation::Loading => Style::default().fg(theme.progress),
        SaveAnimation::Success => Style::default().fg(theme.success),
        SaveAnimation::Failure => Style::default().fg(theme.error_text),
        SaveAnimation::None => text_style,
    };
    let hint_style = theme
        .hint
        .map_or_else(Style::default, |color| Style::default().fg(color));

    let centered = |line: Line<'static>| Paragraph::new(line).alignment(Alignment::Center);

    frame.render_widget(
        centered(Line::from(Span::styled("Confirm your PIN", theme.title))),
        rows[0],
    );
    frame.render_widget(
        centered(Line::from(Span::styled(view.label_text(), label_style))),
        rows[2],
    );
    frame.render_widget(
        centered(Line::from(Span::styled(view.masked_entry(), theme.entry))),
        rows[3],
    );
    frame.render_widget(
        centered(Line::from(Span::styled(view.status_text(), status_style))),
        rows[5],
    );
    if let Some(notice) = &view.notice {
        frame.render_widget(
            centered(Line::from(Span::styled(notice.clone(), text_style))),
            rows[6],
        );
    }
    frame.render_widget(
        centered(Line::from(Span::styled(view.keyboard_hint(), hint_style))),
        rows[8],
    );
}

/// Core trait for rendering the confirmation screen
pub trait ScreenRenderer {
    /// Draw the current view
    fn render(&mut self, view: &ScreenView) -> Result<()>;

    /// Set up the terminal (raw mode, alternate screen, hidden cursor)
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal to its original state
    fn cleanup(&mut self) -> Result<()>;
}
