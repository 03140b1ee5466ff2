//! Secret string that wipes itself

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password held in memory only as long as needed
///
/// The buffer is zeroed on drop. `Debug` and `Display` never print the
/// value, and equality runs in constant time.
///
/// ```
/// use keychain_access_core::SecureString;
///
/// let secret = SecureString::new("∆˚ˆ©ƒ®");
/// assert_eq!(secret.expose(), "∆˚ˆ©ƒ®");
/// assert!(!format!("{secret:?}").contains('∆'));
/// ```
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Take ownership of a secret
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Borrow the plaintext. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the secret is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString([REDACTED, {} bytes])", self.inner.len())
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SecureString {}
