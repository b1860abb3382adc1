//! Messages passed from backup adapters back to the controller's UI task.

/// Identifier attached to each backup call so its response can be correlated.
pub type RequestId = u64;

/// Outcome of a set-pin attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinSetResult {
    Success,
    Failure,
}

impl PinSetResult {
    /// Wire code used by adapters that report outcomes numerically.
    pub fn code(self) -> u8 {
        match self {
            PinSetResult::Success => 0,
            PinSetResult::Failure => 1,
        }
    }
}

impl TryFrom<u8> for PinSetResult {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(PinSetResult::Success),
            1 => Ok(PinSetResult::Failure),
            other => Err(other),
        }
    }
}

/// Responses emitted by a [`ResultHandler`](super::ResultHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupResponse {
    Completed {
        request_id: RequestId,
        result: PinSetResult,
    },
    /// The adapter delivered a code outside the known outcomes.
    Unrecognized { request_id: RequestId, code: u8 },
}

impl BackupResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            BackupResponse::Completed { request_id, .. }
            | BackupResponse::Unrecognized { request_id, .. } => *request_id,
        }
    }

    /// Build a response from a raw outcome code.
    pub fn from_code(request_id: RequestId, code: u8) -> Self {
        match PinSetResult::try_from(code) {
            Ok(result) => BackupResponse::Completed { request_id, result },
            Err(code) => BackupResponse::Unrecognized { request_id, code },
        }
    }
}
