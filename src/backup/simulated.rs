//! In-process stand-in for the remote key backup service.
//!
//! Waits a configurable latency and reports a fixed outcome. Used by the
//! `pinconfirm` binary and by tests that want a realistic asynchronous adapter.

use crate::backup::protocol::PinSetResult;
use crate::backup::service::{PinBackupService, ResultHandler};
use crate::pin::{KeyboardMode, PinValue};
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What the simulated service remembers after a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPin {
    pub pin: PinValue,
    pub keyboard_mode: KeyboardMode,
}

#[derive(Debug)]
pub struct SimulatedBackupService {
    latency: Duration,
    outcome: PinSetResult,
    stored: Mutex<Option<StoredPin>>,
    calls: AtomicUsize,
}

impl SimulatedBackupService {
    pub fn new(latency: Duration, outcome: PinSetResult) -> Self {
        Self {
            latency,
            outcome,
            stored: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A service that succeeds immediately.
    pub fn succeeding() -> Self {
        Self::new(Duration::ZERO, PinSetResult::Success)
    }

    /// A service that fails immediately.
    pub fn failing() -> Self {
        Self::new(Duration::ZERO, PinSetResult::Failure)
    }

    pub fn stored(&self) -> Option<StoredPin> {
        self.stored.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedBackupService {
    fn default() -> Self {
        Self::new(Duration::from_millis(600), PinSetResult::Success)
    }
}

#[async_trait]
impl PinBackupService for SimulatedBackupService {
    async fn set_pin(&self, pin: PinValue, keyboard_mode: KeyboardMode, on_result: ResultHandler) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(
            "simulated backup request {} ({} keyboard, {:?} latency)",
            on_result.request_id(),
            keyboard_mode,
            self.latency
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.outcome == PinSetResult::Success {
            *self.stored.lock() = Some(StoredPin { pin, keyboard_mode });
            info!("simulated backup stored PIN for request {}", on_result.request_id());
        }

        on_result.complete(self.outcome);
    }
}
