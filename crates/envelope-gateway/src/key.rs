//! [`SecretKey`]: the process-wide payload encryption key.
//!
//! The key is decoded once at startup from configuration and injected into
//! the server state as an immutable value. There is no global, no cache, and
//! no rotation path; replacing the key means restarting the process.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::crypto::cipher;

/// Errors produced when constructing a [`SecretKey`].
#[derive(Debug, Error)]
pub enum KeyError {
    /// The key material is not 16, 24, or 32 bytes.
    #[error("secret key has invalid length: {0} bytes (expected 16, 24, or 32)")]
    InvalidLength(usize),

    /// The configured value is not valid base64.
    #[error("secret key is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Heap buffer for the raw key bytes.
///
/// When the last handle drops, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
struct KeyBytes(Box<[u8]>);

impl Drop for KeyBytes {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

/// The immutable AES key shared by every envelope operation.
///
/// Cloning is cheap: all clones share one `Arc`-backed buffer. The length is
/// validated at construction, so a held [`SecretKey`] is always a valid AES
/// key. The raw bytes never appear in `Debug` output or logs.
#[derive(Clone)]
pub struct SecretKey {
    bytes: Arc<KeyBytes>,
}

impl SecretKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLength`] unless the slice is 16, 24, or 32
    /// bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if !cipher::is_valid_key_len(bytes.len()) {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        Ok(Self {
            bytes: Arc::new(KeyBytes(bytes.to_vec().into_boxed_slice())),
        })
    }

    /// Build a key from its standard-base64 configuration encoding.
    ///
    /// Surrounding whitespace is tolerated; anything else must be valid
    /// base64 decoding to a valid key length.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] on a base64 failure and
    /// [`KeyError::InvalidLength`] when the decoded bytes are not an AES key.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes.0
    }

    /// Key strength in bits, safe to log.
    pub fn bits(&self) -> usize {
        self.bytes.0.len() * 8
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}
