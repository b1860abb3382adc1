//! # pinconfirm - PIN Confirmation Screen
//!
//! The "confirm your PIN" step of setting up a key-backup PIN: the user
//! re-enters the PIN chosen on the previous screen, and once it matches the
//! PIN is handed to a key backup service.
//!
//! ## Architecture
//!
//! - [`pin`] - `PinValue` and `KeyboardMode` value types
//! - [`confirm`] - the presentation state machine and its observable state
//! - [`backup`] - the backup service port plus a simulated adapter
//! - [`input`] - terminal key polling and mapping
//! - [`render`] - ratatui screen rendering
//! - [`app`] - the screen loop tying input, controller and renderer together
//! - [`config`] - settings, optionally loaded from TOML
//! - [`error`] - centralized error types
//!
//! The backup protocol itself (networking, key derivation, storage) is out of
//! scope; adapters implement [`backup::PinBackupService`].

// Core modules
pub mod error;
pub mod pin;

pub mod backup;
pub mod confirm;

// Presentation
pub mod app;
pub mod config;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{PinConfirmError, Result};

pub use app::{ConfirmScreen, ScreenOutcome};
pub use backup::{PinBackupService, PinSetResult, ResultHandler, SimulatedBackupService};
pub use confirm::{ConfirmScreenFactory, Label, PinConfirmationController, SaveAnimation};
pub use pin::{KeyboardMode, PinValue};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
