//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for the confirmation screen using ratatui's
//! color system directly to avoid unnecessary abstractions.

use crate::error::{PinConfirmError, Result};
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Screen title
    pub title: Style,

    /// Instructional label (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Masked PIN characters
    pub entry: Style,

    /// Save in progress
    pub progress: Color,

    /// Save succeeded
    pub success: Color,

    /// Mismatch label and save failure
    pub error_text: Color,

    /// Keyboard hint line
    pub hint: Option<Color>,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            normal_text: None, // Use terminal default
            entry: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            progress: Color::Yellow,
            success: Color::Green,
            error_text: Color::Red,
            hint: Some(Color::DarkGray),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            normal_text: None,
            entry: Style::default().add_modifier(Modifier::BOLD),
            progress: Color::Reset,
            success: Color::Reset,
            error_text: Color::Reset,
            hint: None,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            normal_text: Some(Color::White),
            entry: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            progress: Color::LightYellow,
            success: Color::LightGreen,
            error_text: Color::LightRed,
            hint: Some(Color::White),
        }
    }

    /// Look up a theme by the name used in config files and on the command line.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Self::default()),
            "monochrome" => Ok(Self::monochrome()),
            "high-contrast" | "high_contrast" => Ok(Self::high_contrast()),
            other => Err(PinConfirmError::config(format!("unknown theme '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.normal_text, None);
        assert_eq!(theme.error_text, Color::Red);
        assert_eq!(theme.entry.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_monochrome_theme() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.hint, None);
        assert_eq!(theme.error_text, Color::Reset);
        assert_eq!(theme.entry.fg, None);
    }

    #[test]
    fn test_high_contrast_theme() {
        let theme = ColorTheme::high_contrast();
        assert_eq!(theme.normal_text, Some(Color::White));
        assert_eq!(theme.error_text, Color::LightRed);
        assert_eq!(theme.success, Color::LightGreen);
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(ColorTheme::from_name("default").unwrap(), ColorTheme::default());
        assert_eq!(
            ColorTheme::from_name("high_contrast").unwrap(),
            ColorTheme::high_contrast()
        );
        assert!(matches!(
            ColorTheme::from_name("neon"),
            Err(PinConfirmError::ConfigError { .. })
        ));
    }
}
