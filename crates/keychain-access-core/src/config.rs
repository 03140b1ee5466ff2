//! Keychain configuration

use crate::codec::SecretEncoding;
use serde::{Deserialize, Serialize};

/// How the façade names and encodes entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainConfig {
    /// Encoding applied to service, account and password
    pub encoding: SecretEncoding,
    /// Stored service becomes `<prefix>-<service>` when set
    pub service_prefix: Option<String>,
}

impl KeychainConfig {
    /// Set the encoding
    #[must_use]
    pub fn with_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the service prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.service_prefix = Some(prefix.into());
        self
    }

    /// Service name as stored, before encoding
    pub(crate) fn full_service(&self, service: &str) -> String {
        match self.service_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}-{service}"),
            _ => service.to_string(),
        }
    }
}
