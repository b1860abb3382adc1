//! Error types and handling infrastructure for pinconfirm.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context at the edges.
//!
//! Expected outcomes of the confirmation flow (a mismatched PIN, a backup failure)
//! are not errors: they are observable state on the controller. Errors here are
//! reserved for broken contracts and for the terminal/configuration plumbing.

use crate::backup::RequestId;
use thiserror::Error;

/// The main error type for pinconfirm operations.
#[derive(Error, Debug)]
pub enum PinConfirmError {
    /// The backup service reported an outcome outside the defined set.
    ///
    /// This is a programming error on the service side and is not recoverable
    /// by the user.
    #[error("backup service returned unrecognized outcome code {code} for request {request_id}")]
    ContractViolation { request_id: RequestId, code: u8 },

    /// A backup call was requested outside of a Tokio runtime
    #[error("no async runtime available to run the backup call")]
    RuntimeUnavailable,

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Terminal I/O errors (crossterm surfaces these as `std::io::Error`)
    #[error("I/O operation failed: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Standard Result type for pinconfirm operations.
pub type Result<T> = std::result::Result<T, PinConfirmError>;

impl PinConfirmError {
    /// Create a ContractViolation for an unrecognized outcome code
    pub fn contract_violation(request_id: RequestId, code: u8) -> Self {
        Self::ContractViolation { request_id, code }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for errors that must end the screen rather than be shown to the user.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ContractViolation { .. } | Self::RuntimeUnavailable
        )
    }
}

impl From<std::io::Error> for PinConfirmError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "Not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            std::io::ErrorKind::Interrupted => "Interrupted",
            _ => "Terminal I/O failed",
        };
        Self::IoError {
            message: message.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let violation = PinConfirmError::contract_violation(7, 42);
        assert_eq!(
            violation.to_string(),
            "backup service returned unrecognized outcome code 42 for request 7"
        );

        let ui = PinConfirmError::ui("terminal too small");
        assert_eq!(ui.to_string(), "UI operation failed: terminal too small");

        let config = PinConfirmError::config("bad theme");
        assert_eq!(config.to_string(), "Configuration error: bad theme");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(PinConfirmError::contract_violation(1, 9).is_fatal());
        assert!(PinConfirmError::RuntimeUnavailable.is_fatal());
        assert!(!PinConfirmError::ui("oops").is_fatal());
        assert!(!PinConfirmError::invalid_argument("oops").is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "tty");
        let err: PinConfirmError = io_err.into();

        match err {
            PinConfirmError::IoError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u8> {
            Ok(3)
        }

        assert_eq!(returns_result().unwrap(), 3);
    }
}
