//! In-memory binding
//!
//! Answers with the same status codes as the macOS keychain, so the adapter
//! behaves identically on top of it. Clones share one map.

use super::{Fetch, Located, NativeStatus, NativeStore};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use zeroize::Zeroizing;

type EntryKey = (String, String);
type Entries = Arc<RwLock<HashMap<EntryKey, Zeroizing<Vec<u8>>>>>;

fn handle_lock_poison<T>(_: PoisonError<T>) -> NativeStatus {
    NativeStatus::INTERNAL_COMPONENT
}

/// Process-local credential store
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Entries,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries. Still counts after a writer panicked,
    /// even though store calls then fail with `INTERNAL_COMPONENT`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no entries are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw stored bytes for (service, account) as they crossed the boundary
    #[must_use]
    pub fn raw_entry(&self, service: &str, account: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&(service.to_string(), account.to_string()))
            .map(|bytes| bytes.to_vec())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

/// Open handle onto a [`MemoryStore`]
#[derive(Debug)]
pub struct MemoryHandle {
    entries: Entries,
}

/// Located entry in a [`MemoryStore`]
#[derive(Debug)]
pub struct MemoryEntry {
    entries: Entries,
    key: EntryKey,
}

impl NativeStore for MemoryStore {
    type Store = MemoryHandle;
    type Entry = MemoryEntry;

    fn open_default_store(&self) -> Result<MemoryHandle, NativeStatus> {
        Ok(MemoryHandle {
            entries: Arc::clone(&self.entries),
        })
    }

    fn find_entry(
        &self,
        store: &MemoryHandle,
        service: &str,
        account: &str,
        fetch: Fetch,
    ) -> Result<Located<MemoryEntry>, NativeStatus> {
        let key = (service.to_string(), account.to_string());
        let entries = store.entries.read().map_err(handle_lock_poison)?;
        let payload = entries.get(&key).ok_or(NativeStatus::ITEM_NOT_FOUND)?;

        Ok(match fetch {
            Fetch::Payload => Located::Payload(payload.clone()),
            Fetch::Entry => Located::Entry(MemoryEntry {
                entries: Arc::clone(&store.entries),
                key,
            }),
        })
    }

    fn add_entry(
        &self,
        store: &MemoryHandle,
        service: &str,
        account: &str,
        secret: &[u8],
    ) -> Result<(), NativeStatus> {
        let key = (service.to_string(), account.to_string());
        let mut entries = store.entries.write().map_err(handle_lock_poison)?;
        if entries.contains_key(&key) {
            return Err(NativeStatus::DUPLICATE_ITEM);
        }
        entries.insert(key, Zeroizing::new(secret.to_vec()));
        Ok(())
    }

    fn delete_entry(&self, entry: MemoryEntry) -> Result<(), NativeStatus> {
        let mut entries = entry.entries.write().map_err(handle_lock_poison)?;
        entries
            .remove(&entry.key)
            .map(|_| ())
            .ok_or(NativeStatus::ITEM_NOT_FOUND)
    }
}
