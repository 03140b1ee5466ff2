//! macOS Keychain binding
//!
//! Goes through the legacy `SecKeychain` generic-password API.
//!
//! That API has no lookup which returns only the item reference, so
//! [`Fetch::Entry`] reads the payload too (and may raise the keychain access
//! prompt like a get would). The copy is wiped before the entry is returned.
//!
//! `SecKeychainItem::delete` does not surface the status of
//! `SecKeychainItemDelete`. Deletion is therefore confirmed with a second
//! lookup: the entry must be gone, otherwise the delete fails with
//! [`NativeStatus::INTERNAL_COMPONENT`].

use super::{Fetch, Located, NativeStatus, NativeStore};
use security_framework::os::macos::keychain::SecKeychain;
use security_framework::os::macos::keychain_item::SecKeychainItem;
use std::fmt;
use zeroize::Zeroizing;

fn status_of(err: &security_framework::base::Error) -> NativeStatus {
    NativeStatus::new(err.code())
}

/// Binding onto the current user's default keychain
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityFrameworkStore;

impl SecurityFrameworkStore {
    /// Create the binding. No keychain is opened until an operation runs.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Located keychain item, with the lookup needed to confirm its deletion
pub struct KeychainEntry {
    keychain: SecKeychain,
    item: SecKeychainItem,
    service: String,
    account: String,
}

impl fmt::Debug for KeychainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeychainEntry")
            .field("service", &self.service)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl NativeStore for SecurityFrameworkStore {
    type Store = SecKeychain;
    type Entry = KeychainEntry;

    fn open_default_store(&self) -> Result<SecKeychain, NativeStatus> {
        SecKeychain::default().map_err(|e| status_of(&e))
    }

    fn find_entry(
        &self,
        store: &SecKeychain,
        service: &str,
        account: &str,
        fetch: Fetch,
    ) -> Result<Located<KeychainEntry>, NativeStatus> {
        let (password, item) = store
            .find_generic_password(service, account)
            .map_err(|e| status_of(&e))?;
        let payload = Zeroizing::new(password.to_vec());

        Ok(match fetch {
            Fetch::Payload => Located::Payload(payload),
            Fetch::Entry => Located::Entry(KeychainEntry {
                keychain: store.clone(),
                item,
                service: service.to_string(),
                account: account.to_string(),
            }),
        })
    }

    fn add_entry(
        &self,
        store: &SecKeychain,
        service: &str,
        account: &str,
        secret: &[u8],
    ) -> Result<(), NativeStatus> {
        store
            .add_generic_password(service, account, secret)
            .map_err(|e| status_of(&e))
    }

    fn delete_entry(&self, entry: KeychainEntry) -> Result<(), NativeStatus> {
        let KeychainEntry {
            keychain,
            item,
            service,
            account,
        } = entry;
        item.delete();

        match keychain.find_generic_password(&service, &account) {
            Err(err) if status_of(&err) == NativeStatus::ITEM_NOT_FOUND => Ok(()),
            Err(err) => Err(status_of(&err)),
            Ok(_) => Err(NativeStatus::INTERNAL_COMPONENT),
        }
    }
}
