//! Caller-facing request model

use crate::error::{KeychainError, Result};
use crate::secure_string::SecureString;

/// A (service, account) lookup, with a password when storing
///
/// Fields are optional so the façade can report which one is missing. An
/// empty string counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    /// Service name
    pub service: Option<String>,
    /// Account name
    pub account: Option<String>,
    /// Password, needed only to store
    pub password: Option<SecureString>,
}

impl CredentialRequest {
    /// Create an empty request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service
    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Set the account
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the password
    #[must_use]
    pub fn password(mut self, password: impl Into<SecureString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Check account then service, returning them in (service, account) order
    pub(crate) fn key(&self) -> Result<(&str, &str)> {
        let account = present(self.account.as_deref()).ok_or(KeychainError::NoAccountProvided)?;
        let service = present(self.service.as_deref()).ok_or(KeychainError::NoServiceProvided)?;
        Ok((service, account))
    }

    /// Like [`key`](Self::key), then require a password
    pub(crate) fn key_and_password(&self) -> Result<(&str, &str, &SecureString)> {
        let (service, account) = self.key()?;
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.is_empty())
            .ok_or(KeychainError::NoPasswordProvided)?;
        Ok((service, account, password))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
