//! Observable state values of the confirmation screen.

use crate::pin::{KeyboardMode, PinValue};

/// Instructional text shown above the PIN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    ReEnterPin,
    PinDoesNotMatch,
    CreatingPin,
    Empty,
}

/// Lifecycle of the in-flight save, as shown by the progress animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveAnimation {
    None,
    Loading,
    Success,
    Failure,
}

impl SaveAnimation {
    /// Success and Failure are the phases that play a finishing animation.
    pub fn is_finished(self) -> bool {
        matches!(self, SaveAnimation::Success | SaveAnimation::Failure)
    }
}

/// Point-in-time copy of every observable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub user_entry: PinValue,
    pub keyboard_mode: KeyboardMode,
    pub save_animation: SaveAnimation,
    pub label: Label,
}

impl ConfirmState {
    /// State of a freshly opened screen.
    pub fn initial(keyboard_mode: KeyboardMode) -> Self {
        Self {
            user_entry: PinValue::EMPTY,
            keyboard_mode,
            save_animation: SaveAnimation::None,
            label: Label::ReEnterPin,
        }
    }
}
