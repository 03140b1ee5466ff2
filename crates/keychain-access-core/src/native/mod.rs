//! Native store binding
//!
//! The narrow call surface the adapter uses to reach a credential store:
//! open the default store, find an entry, add an entry, delete an entry.
//! Every call reports failure as a non-zero [`NativeStatus`].
//!
//! Bindings:
//! - [`SecurityFrameworkStore`]: macOS default keychain (macOS only)
//! - [`MemoryStore`]: process-local map with keychain status semantics

use std::fmt;
use zeroize::Zeroizing;

#[cfg(target_os = "macos")]
mod macos;
mod memory;

#[cfg(target_os = "macos")]
pub use macos::{KeychainEntry, SecurityFrameworkStore};
pub use memory::{MemoryEntry, MemoryHandle, MemoryStore};

/// Integer status returned by a native store call. Zero is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeStatus(i32);

impl NativeStatus {
    /// `errSecSuccess`
    pub const SUCCESS: Self = Self(0);
    /// `errSecDuplicateItem`: an entry for (service, account) already exists
    pub const DUPLICATE_ITEM: Self = Self(-25299);
    /// `errSecItemNotFound`: no entry for (service, account)
    pub const ITEM_NOT_FOUND: Self = Self(-25300);
    /// `errSecInternalComponent`
    pub const INTERNAL_COMPONENT: Self = Self(-2070);

    /// Wrap a raw status
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Raw status
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Whether this is the success status
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a find call should hand back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// The stored payload bytes
    Payload,
    /// A handle to the entry, for deletion
    Entry,
}

/// Result of a successful find
pub enum Located<E> {
    /// Payload bytes, answered for [`Fetch::Payload`]
    Payload(Zeroizing<Vec<u8>>),
    /// Entry handle, answered for [`Fetch::Entry`]
    Entry(E),
}

impl<E> fmt::Debug for Located<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload(bytes) => write!(f, "Located::Payload([REDACTED, {} bytes])", bytes.len()),
            Self::Entry(_) => f.write_str("Located::Entry(..)"),
        }
    }
}

/// Call surface onto a platform credential store
///
/// `Store` and `Entry` are the store and entry handles. Both live only for
/// the operation that obtained them and are released when dropped. A failed
/// call never returns [`NativeStatus::SUCCESS`] as its error.
#[cfg_attr(test, mockall::automock(type Store = (); type Entry = ();))]
pub trait NativeStore: Send + Sync + 'static {
    /// Handle to the default store of the current user
    type Store;
    /// Handle to one located entry
    type Entry;

    /// Open the default store
    fn open_default_store(&self) -> Result<Self::Store, NativeStatus>;

    /// Locate the entry for (service, account)
    fn find_entry(
        &self,
        store: &Self::Store,
        service: &str,
        account: &str,
        fetch: Fetch,
    ) -> Result<Located<Self::Entry>, NativeStatus>;

    /// Add a new entry; fails with [`NativeStatus::DUPLICATE_ITEM`] if one exists
    fn add_entry(
        &self,
        store: &Self::Store,
        service: &str,
        account: &str,
        secret: &[u8],
    ) -> Result<(), NativeStatus>;

    /// Remove a located entry
    fn delete_entry(&self, entry: Self::Entry) -> Result<(), NativeStatus>;
}

/// Binding for hosts without a credential store. Cannot be constructed.
#[derive(Debug, Clone, Copy)]
pub enum Unsupported {}

impl NativeStore for Unsupported {
    type Store = std::convert::Infallible;
    type Entry = std::convert::Infallible;

    fn open_default_store(&self) -> Result<Self::Store, NativeStatus> {
        match *self {}
    }

    fn find_entry(
        &self,
        _store: &Self::Store,
        _service: &str,
        _account: &str,
        _fetch: Fetch,
    ) -> Result<Located<Self::Entry>, NativeStatus> {
        match *self {}
    }

    fn add_entry(
        &self,
        _store: &Self::Store,
        _service: &str,
        _account: &str,
        _secret: &[u8],
    ) -> Result<(), NativeStatus> {
        match *self {}
    }

    fn delete_entry(&self, entry: Self::Entry) -> Result<(), NativeStatus> {
        match entry {}
    }
}

/// The credential store binding of the running OS
#[cfg(target_os = "macos")]
pub type SystemStore = SecurityFrameworkStore;

/// The credential store binding of the running OS
#[cfg(not(target_os = "macos"))]
pub type SystemStore = Unsupported;

/// Detect the binding for the running OS, `None` when there is none
#[must_use]
pub fn system_store() -> Option<SystemStore> {
    #[cfg(target_os = "macos")]
    {
        Some(SecurityFrameworkStore::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert!(NativeStatus::SUCCESS.is_success());
        assert!(!NativeStatus::ITEM_NOT_FOUND.is_success());
        assert_eq!(NativeStatus::DUPLICATE_ITEM.code(), -25299);
        assert_eq!(NativeStatus::new(-25300), NativeStatus::ITEM_NOT_FOUND);
        assert_eq!(NativeStatus::new(-61).to_string(), "-61");
    }

    #[test]
    fn test_located_debug_redacts_payload() {
        let located: Located<()> = Located::Payload(Zeroizing::new(b"hunter2".to_vec()));
        let debug = format!("{:?}", located);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("7 bytes"));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_no_system_store_off_macos() {
        assert!(system_store().is_none());
    }
}
