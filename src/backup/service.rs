//! The backup service port and the one-shot handler adapters report through.

use crate::backup::protocol::{BackupResponse, PinSetResult, RequestId};
use crate::pin::{KeyboardMode, PinValue};
use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

/// Port to the remote key backup service.
///
/// Implementations must report through `on_result` exactly once. The handler
/// enforces this: it is consumed on delivery, and dropping it undelivered
/// reports [`PinSetResult::Failure`].
#[async_trait]
pub trait PinBackupService: Send + Sync {
    /// Store `pin` remotely, remembering the keyboard mode it was created with.
    async fn set_pin(&self, pin: PinValue, keyboard_mode: KeyboardMode, on_result: ResultHandler);
}

/// One-shot callback carrying a set-pin outcome back to the controller.
///
/// Sending is a no-op once the owning controller has been dropped.
#[derive(Debug)]
pub struct ResultHandler {
    request_id: RequestId,
    tx: Option<UnboundedSender<BackupResponse>>,
}

impl ResultHandler {
    pub(crate) fn new(request_id: RequestId, tx: UnboundedSender<BackupResponse>) -> Self {
        Self {
            request_id,
            tx: Some(tx),
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Deliver a typed outcome.
    pub fn complete(mut self, result: PinSetResult) {
        let response = BackupResponse::Completed {
            request_id: self.request_id,
            result,
        };
        self.deliver(response);
    }

    /// Deliver a numeric outcome code as received from the wire.
    ///
    /// Codes outside [`PinSetResult`] are forwarded as
    /// [`BackupResponse::Unrecognized`] for the controller to reject.
    pub fn complete_raw(mut self, code: u8) {
        let response = BackupResponse::from_code(self.request_id, code);
        self.deliver(response);
    }

    fn deliver(&mut self, response: BackupResponse) {
        if let Some(tx) = self.tx.take() {
            if tx.send(response).is_err() {
                debug!(
                    "confirmation screen closed; dropping result for request {}",
                    self.request_id
                );
            }
        }
    }
}

impl Drop for ResultHandler {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!(
                "backup adapter dropped request {} without a result; reporting failure",
                self.request_id
            );
            let response = BackupResponse::Completed {
                request_id: self.request_id,
                result: PinSetResult::Failure,
            };
            self.deliver(response);
        }
    }
}
