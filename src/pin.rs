//! PIN value types shared by the controller, the backup port and the presenter.

use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// A user-entered PIN in normalized form.
///
/// Construction never fails: text that cannot be a PIN collapses to
/// [`PinValue::EMPTY`]. Two values are equal when their normalized strings are.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PinValue(String);

impl PinValue {
    /// The empty entry.
    pub const EMPTY: PinValue = PinValue(String::new());

    /// Shortest PIN the presenter will submit.
    pub const MINIMUM_LENGTH: usize = 4;

    /// Parse raw text into a PIN.
    ///
    /// The text is brought to Unicode NFKD and surrounding whitespace is
    /// trimmed, so canonically equivalent entries and fullwidth digits compare
    /// equal. Text containing control characters yields the empty value.
    pub fn parse(text: &str) -> Self {
        let normalized: String = text.nfkd().collect();
        let trimmed = normalized.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return Self::EMPTY;
        }
        Self(trimmed.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn meets_minimum_length(&self) -> bool {
        self.len() >= Self::MINIMUM_LENGTH
    }
}

impl From<&str> for PinValue {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Debug for PinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "PinValue(<empty>)")
        } else {
            write!(f, "PinValue([REDACTED; {}])", self.len())
        }
    }
}

/// Which soft keyboard the PIN entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardMode {
    #[default]
    Numeric,
    AlphaNumeric,
}

impl KeyboardMode {
    /// The mode a toggle switches to.
    pub fn other(self) -> Self {
        match self {
            KeyboardMode::Numeric => KeyboardMode::AlphaNumeric,
            KeyboardMode::AlphaNumeric => KeyboardMode::Numeric,
        }
    }

    /// Stable code stored next to the PIN by the backup service.
    pub fn code(self) -> &'static str {
        match self {
            KeyboardMode::Numeric => "numeric",
            KeyboardMode::AlphaNumeric => "alphaNumeric",
        }
    }

    /// Inverse of [`KeyboardMode::code`]. Unknown codes fall back to numeric.
    pub fn from_code(code: &str) -> Self {
        match code {
            "alphaNumeric" => KeyboardMode::AlphaNumeric,
            _ => KeyboardMode::Numeric,
        }
    }

    /// Whether a typed character is accepted in this mode.
    pub fn accepts(self, c: char) -> bool {
        match self {
            KeyboardMode::Numeric => c.is_ascii_digit(),
            KeyboardMode::AlphaNumeric => !c.is_control(),
        }
    }
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyboardMode::Numeric => write!(f, "numeric"),
            KeyboardMode::AlphaNumeric => write!(f, "alphanumeric"),
        }
    }
}
