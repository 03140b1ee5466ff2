//! Public façade
//!
//! Validates requests in a fixed order (platform, account, service, then
//! password when storing), encodes them, and runs the adapter on the
//! blocking pool so callers never block on the store.
//!
//! ```
//! use keychain_access_core::{CredentialRequest, ErrorCode, Keychain};
//!
//! # #[tokio::main]
//! # async fn main() -> keychain_access_core::Result<()> {
//! let keychain = Keychain::in_memory();
//!
//! keychain.set("svc-1", "acct-1", "∆˚ˆ©ƒ®").await?;
//! assert_eq!(keychain.get("svc-1", "acct-1").await?.expose(), "∆˚ˆ©ƒ®");
//!
//! keychain.delete("svc-1", "acct-1").await?;
//! let err = keychain
//!     .get_password(&CredentialRequest::new().service("svc-1").account("acct-1"))
//!     .await
//!     .unwrap_err();
//! assert_eq!(err.code(), ErrorCode::PasswordNotFound);
//! # Ok(())
//! # }
//! ```

use crate::adapter::CredentialAdapter;
use crate::config::KeychainConfig;
use crate::error::{KeychainError, Result};
use crate::native::{self, MemoryStore, NativeStore, SystemStore};
use crate::request::CredentialRequest;
use crate::secure_string::SecureString;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Entry point for get/set/delete
///
/// Cheap to clone; clones share the binding.
pub struct Keychain<S = SystemStore> {
    adapter: Option<Arc<CredentialAdapter<S>>>,
    config: KeychainConfig,
}

impl Keychain<SystemStore> {
    /// Bind the credential store of the running OS
    ///
    /// Where there is none, every operation fails with
    /// [`KeychainError::UnsupportedPlatform`].
    #[must_use]
    pub fn system() -> Self {
        let keychain = Self::from_native(native::system_store());
        info!(
            platform = std::env::consts::OS,
            supported = keychain.is_supported(),
            "Initializing keychain"
        );
        keychain
    }
}

impl Default for Keychain<SystemStore> {
    fn default() -> Self {
        Self::system()
    }
}

impl Keychain<MemoryStore> {
    /// Bind a fresh in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: NativeStore> Keychain<S> {
    /// Bind an explicit native store
    pub fn new(native: S) -> Self {
        Self::from_native(Some(native))
    }

    pub(crate) fn from_native(native: Option<S>) -> Self {
        Self {
            adapter: native.map(|native| Arc::new(CredentialAdapter::new(native))),
            config: KeychainConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: KeychainConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &KeychainConfig {
        &self.config
    }

    /// Whether a store backend is bound
    pub fn is_supported(&self) -> bool {
        self.adapter.is_some()
    }

    /// The bound native store
    pub fn native(&self) -> Option<&S> {
        self.adapter.as_deref().map(CredentialAdapter::native)
    }

    fn adapter(&self) -> Result<Arc<CredentialAdapter<S>>> {
        self.adapter
            .clone()
            .ok_or_else(KeychainError::unsupported_platform)
    }

    fn encode_key(&self, service: &str, account: &str) -> (String, String) {
        let encoding = self.config.encoding;
        (
            encoding.encode(&self.config.full_service(service)),
            encoding.encode(account),
        )
    }

    /// Retrieve a password
    pub async fn get_password(&self, request: &CredentialRequest) -> Result<SecureString> {
        let adapter = self.adapter()?;
        let (service, account) = request.key()?;
        debug!(service = %service, account = %account, "Retrieving password");

        let (service, account) = self.encode_key(service, account);
        let encoding = self.config.encoding;
        run_blocking(move || {
            let payload = adapter.get(&service, &account)?;
            encoding
                .decode_secret(&payload)
                .map_err(|e| KeychainError::InvalidPayload(e.to_string()))
        })
        .await
    }

    /// Store a password, replacing any existing one
    pub async fn set_password(&self, request: &CredentialRequest) -> Result<()> {
        let adapter = self.adapter()?;
        let (service, account, password) = request.key_and_password()?;
        debug!(service = %service, account = %account, "Storing password");

        let (service, account) = self.encode_key(service, account);
        let secret = Zeroizing::new(self.config.encoding.encode(password.expose()).into_bytes());
        run_blocking(move || adapter.set(&service, &account, &secret)).await
    }

    /// Delete a password
    pub async fn delete_password(&self, request: &CredentialRequest) -> Result<()> {
        let adapter = self.adapter()?;
        let (service, account) = request.key()?;
        debug!(service = %service, account = %account, "Deleting password");

        let (service, account) = self.encode_key(service, account);
        run_blocking(move || adapter.delete(&service, &account)).await
    }

    /// Retrieve the password for (service, account)
    pub async fn get(&self, service: &str, account: &str) -> Result<SecureString> {
        self.get_password(&CredentialRequest::new().service(service).account(account))
            .await
    }

    /// Store the password for (service, account)
    pub async fn set(
        &self,
        service: &str,
        account: &str,
        password: impl Into<SecureString>,
    ) -> Result<()> {
        self.set_password(
            &CredentialRequest::new()
                .service(service)
                .account(account)
                .password(password),
        )
        .await
    }

    /// Delete the password for (service, account)
    pub async fn delete(&self, service: &str, account: &str) -> Result<()> {
        self.delete_password(&CredentialRequest::new().service(service).account(account))
            .await
    }
}

impl<S> Clone for Keychain<S> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> fmt::Debug for Keychain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keychain")
            .field("supported", &self.adapter.is_some())
            .field("config", &self.config)
            .finish()
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| KeychainError::TaskAborted(e.to_string()))?
}

#[cfg(test)]
mod tests;
