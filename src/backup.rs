//! Key backup service boundary.
//!
//! The controller only ever talks to [`PinBackupService`]. Everything behind it
//! (network protocol, key stretching, storage) lives in the adapter.

pub mod protocol;
pub mod service;
pub mod simulated;

pub use protocol::{BackupResponse, PinSetResult, RequestId};
pub use service::{PinBackupService, ResultHandler};
pub use simulated::{SimulatedBackupService, StoredPin};
