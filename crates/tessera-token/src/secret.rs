//! The process-wide signing secret.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::TokenError;

/// Symmetric key used to sign and verify every session token.
///
/// Loaded once at process start and never mutated afterwards. Rotating it
/// (restarting with a different value) invalidates every token issued
/// under the old one.
///
/// `Debug` is implemented by hand so the key bytes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wraps raw key bytes.
    ///
    /// # Errors
    /// Returns [`TokenError::MissingSecret`] if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self(bytes))
    }

    /// Generates a fresh 256-bit secret from the thread-local RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes.to_vec())
    }

    /// Renders the key as unpadded base64url, suitable for an environment
    /// variable.
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(<{} bytes>)", self.0.len())
    }
}
