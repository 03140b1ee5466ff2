//! Codec for values crossing the native boundary
//!
//! Service, account and secret are all passed through the same encoding on
//! the way in and reversed on the way out. The default wraps the UTF-8 bytes
//! in standard base64 so the store only ever sees printable ASCII.

use crate::secure_string::SecureString;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

/// Failure to reverse an encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Token is not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// How values are encoded before reaching the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretEncoding {
    /// Standard base64 over UTF-8. Not readable by tools that store raw text.
    #[default]
    Base64,
    /// UTF-8 bytes unchanged, for entries shared with other tools
    Raw,
}

impl SecretEncoding {
    /// Encode text into the token handed to the store
    #[must_use]
    pub fn encode(self, text: &str) -> String {
        match self {
            Self::Base64 => BASE64.encode(text.as_bytes()),
            Self::Raw => text.to_string(),
        }
    }

    /// Reverse [`encode`](Self::encode) on bytes read back from the store
    pub fn decode(self, token: &[u8]) -> Result<String, CodecError> {
        let bytes = match self {
            Self::Base64 => BASE64.decode(token)?,
            Self::Raw => token.to_vec(),
        };
        into_utf8(bytes)
    }

    /// Decode a stored payload straight into a [`SecureString`]
    pub fn decode_secret(self, payload: &[u8]) -> Result<SecureString, CodecError> {
        self.decode(payload).map(SecureString::new)
    }
}

/// UTF-8 conversion that wipes the buffer when it fails
fn into_utf8(bytes: Vec<u8>) -> Result<String, CodecError> {
    String::from_utf8(bytes).map_err(|e| {
        let cause = e.utf8_error();
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CodecError::Utf8(cause)
    })
}
