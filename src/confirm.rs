//! PIN confirmation screen state.
//!
//! - [`controller`] - the presentation state machine
//! - [`observe`] - change-only observable fields
//! - [`state`] - labels, animation phases and snapshots

pub mod controller;
pub mod observe;
pub mod state;

pub use controller::{ConfirmOutcome, ConfirmStreams, PinConfirmationController};
pub use observe::Observable;
pub use state::{ConfirmState, Label, SaveAnimation};

use crate::backup::PinBackupService;
use crate::pin::{KeyboardMode, PinValue};
use std::sync::Arc;

/// Builds one controller per opened screen.
///
/// Holds the inputs captured when the previous screen handed over the chosen
/// PIN; the presenter calls [`ConfirmScreenFactory::create`] when it opens and
/// drops the controller when it closes.
#[derive(Clone)]
pub struct ConfirmScreenFactory {
    pin_to_confirm: PinValue,
    keyboard_mode: KeyboardMode,
    backup: Arc<dyn PinBackupService>,
}

impl ConfirmScreenFactory {
    pub fn new(
        pin_to_confirm: PinValue,
        keyboard_mode: KeyboardMode,
        backup: Arc<dyn PinBackupService>,
    ) -> Self {
        Self {
            pin_to_confirm,
            keyboard_mode,
            backup,
        }
    }

    pub fn create(&self) -> PinConfirmationController {
        PinConfirmationController::new(
            self.pin_to_confirm.clone(),
            self.keyboard_mode,
            Arc::clone(&self.backup),
        )
    }
}

impl std::fmt::Debug for ConfirmScreenFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmScreenFactory")
            .field("pin_to_confirm", &self.pin_to_confirm)
            .field("keyboard_mode", &self.keyboard_mode)
            .finish_non_exhaustive()
    }
}
