use rand::{seq::index, Rng};
use std::fmt;

use super::{CryptoError, Result};

const BASE62: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the second-pass AES key.
pub const KEY_LEN: usize = 16;

/// Per-request symmetric key for the second AES pass.
///
/// Generated keys hold distinct characters of the base62 alphabet. The value
/// lives only for one `encode` call and is never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct EphemeralKey(String);

impl EphemeralKey {
    /// Draw `len` distinct characters from the thread-local generator.
    pub fn generate(len: usize) -> Result<Self> {
        Self::generate_with(&mut rand::rng(), len)
    }

    /// Sample without replacement, so no character repeats within a key.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Result<Self> {
        if len > BASE62.len() {
            return Err(CryptoError::AlphabetExhausted(len));
        }
        let key = index::sample(rng, BASE62.len(), len)
            .into_iter()
            .map(|i| BASE62[i] as char)
            .collect();
        Ok(Self(key))
    }

    /// Wrap a caller-chosen key. Length is checked by the cipher stage.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for EphemeralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EphemeralKey(..)")
    }
}
