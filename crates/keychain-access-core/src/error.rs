//! Error types for keychain-access-core
//!
//! Every operation resolves to either a value or exactly one
//! [`KeychainError`]. Callers match on [`KeychainError::code`], never on the
//! rendered message.

use crate::native::NativeStatus;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable, matchable identifier for each error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// No credential store backend for the running OS
    UnsupportedPlatform,
    /// Request had no account
    NoAccountProvided,
    /// Request had no service
    NoServiceProvided,
    /// Store request had no password
    NoPasswordProvided,
    /// No entry matches (service, account)
    PasswordNotFound,
    /// The default store could not be opened
    StoreUnavailable,
    /// A native call failed for another reason
    StoreOperationFailed,
    /// Stored bytes could not be decoded
    InvalidPayload,
    /// The blocking worker did not return
    TaskAborted,
}

impl ErrorCode {
    /// The code as a string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => "UnsupportedPlatform",
            Self::NoAccountProvided => "NoAccountProvided",
            Self::NoServiceProvided => "NoServiceProvided",
            Self::NoPasswordProvided => "NoPasswordProvided",
            Self::PasswordNotFound => "PasswordNotFound",
            Self::StoreUnavailable => "StoreUnavailable",
            Self::StoreOperationFailed => "StoreOperationFailed",
            Self::InvalidPayload => "InvalidPayload",
            Self::TaskAborted => "TaskAborted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keychain access errors
///
/// Besides the input, lookup and native-status kinds, two kinds come from
/// this crate itself and never from a native call:
/// [`InvalidPayload`](Self::InvalidPayload) when an existing entry was not
/// written with the active [`SecretEncoding`](crate::SecretEncoding), and
/// [`TaskAborted`](Self::TaskAborted) when the blocking worker does not
/// return. Neither carries a [`NativeStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeychainError {
    /// Running OS has no credential store backend
    #[error("Expected darwin platform, got: {platform}")]
    UnsupportedPlatform {
        /// `std::env::consts::OS` of the running process
        platform: String,
    },

    /// Account missing or empty
    #[error("An account is required")]
    NoAccountProvided,

    /// Service missing or empty
    #[error("A service is required")]
    NoServiceProvided,

    /// Password missing or empty on a store request
    #[error("A password is required")]
    NoPasswordProvided,

    /// No entry for the requested (service, account)
    #[error("Could not find password")]
    PasswordNotFound,

    /// Opening the default store failed
    #[error("Could not open the default keychain (status {status})")]
    StoreUnavailable {
        /// Raw native status
        status: NativeStatus,
    },

    /// A native call failed for a reason other than the above
    #[error("Keychain operation failed (status {status})")]
    StoreOperationFailed {
        /// Raw native status
        status: NativeStatus,
    },

    /// Stored bytes are not valid for the active encoding
    #[error("Stored password could not be decoded: {0}")]
    InvalidPayload(String),

    /// The blocking worker panicked or was cancelled
    #[error("Keychain task did not complete: {0}")]
    TaskAborted(String),
}

impl KeychainError {
    /// Error kind for programmatic matching
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedPlatform { .. } => ErrorCode::UnsupportedPlatform,
            Self::NoAccountProvided => ErrorCode::NoAccountProvided,
            Self::NoServiceProvided => ErrorCode::NoServiceProvided,
            Self::NoPasswordProvided => ErrorCode::NoPasswordProvided,
            Self::PasswordNotFound => ErrorCode::PasswordNotFound,
            Self::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            Self::StoreOperationFailed { .. } => ErrorCode::StoreOperationFailed,
            Self::InvalidPayload(_) => ErrorCode::InvalidPayload,
            Self::TaskAborted(_) => ErrorCode::TaskAborted,
        }
    }

    /// Raw native status attached for diagnostics, if any
    #[must_use]
    pub const fn status(&self) -> Option<NativeStatus> {
        match self {
            Self::StoreUnavailable { status } | Self::StoreOperationFailed { status } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Unsupported-platform error for the running OS
    #[must_use]
    pub fn unsupported_platform() -> Self {
        Self::UnsupportedPlatform {
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// Short hint for command-line users
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoAccountProvided => Some("Pass --account <name>."),
            Self::NoServiceProvided => Some("Pass --service <name>."),
            Self::NoPasswordProvided => Some("Pass --password or enter one at the prompt."),
            Self::StoreUnavailable { .. } => {
                Some("Check that the login keychain exists and is unlocked.")
            }
            Self::InvalidPayload(_) => Some(
                "The entry was probably written by another tool; retry with encoding = \"raw\".",
            ),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, KeychainError>;
