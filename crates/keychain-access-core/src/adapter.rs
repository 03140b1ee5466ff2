//! Credential adapter
//!
//! Turns get/set/delete into the exact sequence of native calls and maps
//! every native status into a [`KeychainError`]. Values arrive already
//! encoded; payloads leave undecoded.
//!
//! Each operation opens its own store handle and drops it before
//! returning. Nothing is kept between calls.
//!
//! Status policy:
//! - open failure: `StoreUnavailable`
//! - `errSecItemNotFound` on a find: `PasswordNotFound`
//! - `errSecDuplicateItem` on an add: delete the entry, add once more
//! - anything else: `StoreOperationFailed` with the raw status

use crate::error::{KeychainError, Result};
use crate::native::{Fetch, Located, NativeStatus, NativeStore};
use tracing::{debug, warn};
use zeroize::Zeroizing;


enum AddOutcome {
    Added,
    Duplicate,
}

fn lookup_error(status: NativeStatus) -> KeychainError {
    match status {
        NativeStatus::ITEM_NOT_FOUND => KeychainError::PasswordNotFound,
        status => KeychainError::StoreOperationFailed { status },
    }
}

fn operation_error(status: NativeStatus) -> KeychainError {
    KeychainError::StoreOperationFailed { status }
}

/// The binding answered a find with the wrong kind of result
fn mismatched_find() -> KeychainError {
    operation_error(NativeStatus::INTERNAL_COMPONENT)
}

/// Get/set/delete over a [`NativeStore`]
#[derive(Debug)]
pub struct CredentialAdapter<S> {
    native: S,
}

impl<S: NativeStore> CredentialAdapter<S> {
    /// Wrap a binding
    pub fn new(native: S) -> Self {
        Self { native }
    }

    /// The wrapped binding
    pub fn native(&self) -> &S {
        &self.native
    }

    fn open(&self) -> Result<S::Store> {
        self.native
            .open_default_store()
            .map_err(|status| KeychainError::StoreUnavailable { status })
    }

    /// Read the stored payload for (service, account)
    pub fn get(&self, service: &str, account: &str) -> Result<Zeroizing<Vec<u8>>> {
        let store = self.open()?;
        debug!(service = %service, account = %account, "Finding keychain entry");

        match self
            .native
            .find_entry(&store, service, account, Fetch::Payload)
            .map_err(lookup_error)?
        {
            Located::Payload(bytes) => Ok(bytes),
            Located::Entry(_) => Err(mismatched_find()),
        }
    }

    /// Store a payload, replacing any existing entry for (service, account)
    pub fn set(&self, service: &str, account: &str, secret: &[u8]) -> Result<()> {
        debug!(service = %service, account = %account, "Adding keychain entry");
        if let AddOutcome::Added = self.try_add(service, account, secret)? {
            return Ok(());
        }

        warn!(
            service = %service,
            account = %account,
            "Keychain entry already exists, replacing it"
        );
        self.delete(service, account)?;

        match self.try_add(service, account, secret)? {
            AddOutcome::Added => Ok(()),
            AddOutcome::Duplicate => Err(operation_error(NativeStatus::DUPLICATE_ITEM)),
        }
    }

    fn try_add(&self, service: &str, account: &str, secret: &[u8]) -> Result<AddOutcome> {
        let store = self.open()?;
        match self.native.add_entry(&store, service, account, secret) {
            Ok(()) => Ok(AddOutcome::Added),
            Err(NativeStatus::DUPLICATE_ITEM) => Ok(AddOutcome::Duplicate),
            Err(status) => Err(operation_error(status)),
        }
    }

    /// Remove the entry for (service, account)
    pub fn delete(&self, service: &str, account: &str) -> Result<()> {
        let store = self.open()?;
        debug!(service = %service, account = %account, "Deleting keychain entry");

        let entry = match self
            .native
            .find_entry(&store, service, account, Fetch::Entry)
            .map_err(lookup_error)?
        {
            Located::Entry(entry) => entry,
            Located::Payload(_) => return Err(mismatched_find()),
        };

        self.native.delete_entry(entry).map_err(operation_error)
    }
}
