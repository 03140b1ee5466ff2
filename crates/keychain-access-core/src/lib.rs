//! Keychain Access Core
//!
//! Get, set and delete a secret keyed by (service, account) in the
//! platform credential store, with one error type for every failure.
//!
//! - Native: the four store primitives behind the [`NativeStore`] trait
//! - Codec: reversible encoding applied to every value at the boundary
//! - Adapter: native call sequences, duplicate-entry retry, status mapping
//! - Keychain: request validation and async entry points
//!
//! Only the macOS keychain is bound natively. On other systems
//! [`Keychain::system`] answers every call with
//! [`KeychainError::UnsupportedPlatform`]; [`Keychain::in_memory`] works
//! everywhere.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod codec;
pub mod config;
pub mod error;
pub mod keychain;
pub mod native;
pub mod request;
pub mod secure_string;

pub use adapter::CredentialAdapter;
pub use codec::{CodecError, SecretEncoding};
pub use config::KeychainConfig;
pub use error::{ErrorCode, KeychainError, Result};
pub use keychain::Keychain;
pub use native::{MemoryStore, NativeStatus, NativeStore, SystemStore};
pub use request::CredentialRequest;
pub use secure_string::SecureString;
