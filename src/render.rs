//! Rendering subsystem for the confirmation screen.
//!
//! Hosts the renderer trait and view model, the concrete ratatui terminal
//! implementation, and styling.

pub mod renderer;
pub mod terminal;
pub mod theme;

pub use renderer::{draw_screen, ScreenRenderer, ScreenView};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockScreenRenderer;
