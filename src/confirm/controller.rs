//! Presentation state machine for the "confirm your PIN" screen.
//!
//! The controller is owned by the UI task for the lifetime of one screen. All
//! mutating methods take `&mut self`, so the single-writer discipline is
//! enforced by the borrow checker rather than by locks. The backup call is the
//! only asynchronous step: it runs on a spawned task and its outcome comes back
//! over a channel that the UI task drains with [`PinConfirmationController::next_response`]
//! and applies with [`PinConfirmationController::handle_response`].

use crate::backup::{BackupResponse, PinBackupService, PinSetResult, RequestId, ResultHandler};
use crate::confirm::observe::Observable;
use crate::confirm::state::{ConfirmState, Label, SaveAnimation};
use crate::error::{PinConfirmError, Result};
use crate::pin::{KeyboardMode, PinValue};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;

/// What a call to [`PinConfirmationController::confirm`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The entry matched and a backup call was issued.
    Matched { request_id: RequestId },
    Mismatch,
}

pub struct PinConfirmationController {
    pin_to_confirm: PinValue,
    backup: Arc<dyn PinBackupService>,

    user_entry: Observable<PinValue>,
    keyboard_mode: Observable<KeyboardMode>,
    save_animation: Observable<SaveAnimation>,
    label: Observable<Label>,

    next_request_id: RequestId,
    /// Latest issued request; responses for any other id are stale.
    in_flight: Option<RequestId>,
    response_tx: UnboundedSender<BackupResponse>,
    response_rx: UnboundedReceiver<BackupResponse>,
}

impl PinConfirmationController {
    pub fn new(
        pin_to_confirm: PinValue,
        keyboard_mode: KeyboardMode,
        backup: Arc<dyn PinBackupService>,
    ) -> Self {
        let initial = ConfirmState::initial(keyboard_mode);
        let (response_tx, response_rx) = mpsc::unbounded_channel();

        Self {
            pin_to_confirm,
            backup,
            user_entry: Observable::new(initial.user_entry),
            keyboard_mode: Observable::new(initial.keyboard_mode),
            save_animation: Observable::new(initial.save_animation),
            label: Observable::new(initial.label),
            next_request_id: 1,
            in_flight: None,
            response_tx,
            response_rx,
        }
    }

    /// Replace the current entry with `text` parsed as a PIN.
    pub fn set_user_entry(&mut self, text: &str) {
        self.user_entry.set(PinValue::parse(text));
    }

    pub fn toggle_keyboard_mode(&mut self) {
        self.keyboard_mode.update(|mode| mode.other());
    }

    /// Check the entry against the PIN being confirmed.
    ///
    /// The entry is cleared before anything else happens, whatever the
    /// outcome. On a match the backup call is spawned on the current Tokio
    /// runtime; calling this outside a runtime fails with
    /// [`PinConfirmError::RuntimeUnavailable`] after clearing the entry.
    pub fn confirm(&mut self) -> Result<ConfirmOutcome> {
        let entry = self.user_entry.get();
        self.user_entry.set(PinValue::EMPTY);

        if entry != self.pin_to_confirm {
            debug!("confirmation entry did not match");
            self.label.set(Label::PinDoesNotMatch);
            return Ok(ConfirmOutcome::Mismatch);
        }

        let runtime = Handle::try_current().map_err(|_| PinConfirmError::RuntimeUnavailable)?;

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        if let Some(previous) = self.in_flight.replace(request_id) {
            debug!("request {} superseded by request {}", previous, request_id);
        }

        self.label.set(Label::CreatingPin);
        self.save_animation.set(SaveAnimation::Loading);

        let backup = Arc::clone(&self.backup);
        let pin = self.pin_to_confirm.clone();
        let keyboard_mode = self.keyboard_mode.get();
        let handler = ResultHandler::new(request_id, self.response_tx.clone());
        info!("PIN confirmed; starting backup request {}", request_id);
        runtime.spawn(async move {
            backup.set_pin(pin, keyboard_mode, handler).await;
        });

        Ok(ConfirmOutcome::Matched { request_id })
    }

    /// Called by the presenter once the success/failure animation has played.
    pub fn on_loading_animation_complete(&mut self) {
        self.label.set(Label::Empty);
    }

    /// Wait for the next backup response.
    ///
    /// The controller holds a sender itself, so this only resolves when a
    /// response actually arrives.
    pub async fn next_response(&mut self) -> Option<BackupResponse> {
        self.response_rx.recv().await
    }

    /// Non-blocking variant of [`Self::next_response`].
    pub fn try_next_response(&mut self) -> Option<BackupResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Apply a backup response to the observable state.
    ///
    /// Stale responses are dropped. An unrecognized outcome is a broken
    /// contract with the backup service and is returned as a fatal error.
    pub fn handle_response(&mut self, response: BackupResponse) -> Result<()> {
        let request_id = response.request_id();
        if self.in_flight != Some(request_id) {
            debug!(
                "ignoring stale backup response for request {} (latest {:?})",
                request_id, self.in_flight
            );
            return Ok(());
        }
        self.in_flight = None;

        match response {
            BackupResponse::Completed { result, .. } => {
                let animation = match result {
                    PinSetResult::Success => SaveAnimation::Success,
                    PinSetResult::Failure => SaveAnimation::Failure,
                };
                info!("backup request {} finished: {:?}", request_id, result);
                self.save_animation.set(animation);
                Ok(())
            }
            BackupResponse::Unrecognized { code, .. } => {
                error!(
                    "backup request {} returned unrecognized outcome code {}",
                    request_id, code
                );
                Err(PinConfirmError::contract_violation(request_id, code))
            }
        }
    }

    /// Apply every response already queued.
    pub fn drain_responses(&mut self) -> Result<()> {
        while let Some(response) = self.try_next_response() {
            self.handle_response(response)?;
        }
        Ok(())
    }

    pub fn user_entry(&self) -> PinValue {
        self.user_entry.get()
    }

    pub fn keyboard_mode(&self) -> KeyboardMode {
        self.keyboard_mode.get()
    }

    pub fn save_animation(&self) -> SaveAnimation {
        self.save_animation.get()
    }

    pub fn label(&self) -> Label {
        self.label.get()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn state(&self) -> ConfirmState {
        ConfirmState {
            user_entry: self.user_entry.get(),
            keyboard_mode: self.keyboard_mode.get(),
            save_animation: self.save_animation.get(),
            label: self.label.get(),
        }
    }

    pub fn observe_user_entry(&self) -> watch::Receiver<PinValue> {
        self.user_entry.subscribe()
    }

    pub fn observe_keyboard_mode(&self) -> watch::Receiver<KeyboardMode> {
        self.keyboard_mode.subscribe()
    }

    pub fn observe_save_animation(&self) -> watch::Receiver<SaveAnimation> {
        self.save_animation.subscribe()
    }

    pub fn observe_label(&self) -> watch::Receiver<Label> {
        self.label.subscribe()
    }

    /// Every observable field, exposed as streams of changes.
    pub fn streams(&self) -> ConfirmStreams {
        ConfirmStreams {
            user_entry: self.user_entry.stream(),
            keyboard_mode: self.keyboard_mode.stream(),
            save_animation: self.save_animation.stream(),
            label: self.label.stream(),
        }
    }
}

impl std::fmt::Debug for PinConfirmationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinConfirmationController")
            .field("state", &self.state())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// Stream view of the four observable fields.
#[derive(Debug)]
pub struct ConfirmStreams {
    pub user_entry: tokio_stream::wrappers::WatchStream<PinValue>,
    pub keyboard_mode: tokio_stream::wrappers::WatchStream<KeyboardMode>,
    pub save_animation: tokio_stream::wrappers::WatchStream<SaveAnimation>,
    pub label: tokio_stream::wrappers::WatchStream<Label>,
}
