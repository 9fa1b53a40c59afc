use super::{decode, decrypt, encode, encrypt, Cipher, CryptoError, Result};

/// AES-128-CBC with PKCS#7 padding, base64 on the ciphertext side.
///
/// Key and iv are raw bytes, never hex-decoded. Their lengths are checked
/// up front so a short or long key is rejected instead of being truncated
/// or padded by the cipher backend.
#[derive(Clone, Copy)]
pub struct BlockCipherStage {
    cipher: Cipher,
}

impl Default for BlockCipherStage {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCipherStage {
    pub fn new() -> Self {
        Self {
            cipher: Cipher::aes_128_cbc(),
        }
    }

    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<String> {
        self.check(key, iv)?;
        encrypt(self.cipher, key, iv, plaintext).map(|data| encode(&data))
    }

    pub fn decrypt(&self, ciphertext: &str, key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        self.check(key, iv)?;
        let data = decode(ciphertext.as_bytes())?;
        decrypt(self.cipher, key, iv, &data)
    }

    fn check(&self, key: &[u8], iv: &[u8]) -> Result<()> {
        let key_len = self.cipher.key_len();
        if key.len() != key_len {
            return Err(CryptoError::InvalidKeyLength {
                what: "key",
                expected: key_len,
                actual: key.len(),
            });
        }
        let iv_len = self.cipher.iv_len().unwrap_or(0);
        if iv.len() != iv_len {
            return Err(CryptoError::InvalidKeyLength {
                what: "iv",
                expected: iv_len,
                actual: iv.len(),
            });
        }
        Ok(())
    }
}
