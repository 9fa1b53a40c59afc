use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use openssl::hash::Hasher;
pub use openssl::hash::MessageDigest;
pub use openssl::symm::Cipher;
use openssl::symm::{Crypter, Mode};
use thiserror::Error;

pub mod block;
pub mod key;
pub mod modexp;
pub mod weapi;

pub use block::BlockCipherStage;
pub use key::EphemeralKey;
pub use modexp::{reverse_secret, ModularExponentiator};
pub use weapi::{EncodedRequest, WeapiConstants, WeapiEncoder};

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("encoding failure: {0}")]
    EncodingFailure(String),
    #[error("cannot draw {0} distinct characters from the key alphabet")]
    AlphabetExhausted(usize),
    #[error(transparent)]
    OpenSsl(#[from] openssl::error::ErrorStack),
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

pub fn encrypt(cipher: Cipher, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut encrypter = Crypter::new(cipher, Mode::Encrypt, key, Some(iv))?;
    let block_size = cipher.block_size();
    let mut output = vec![0; data.len() + block_size];

    let mut count = encrypter.update(data, &mut output)?;
    count += encrypter.finalize(&mut output[count..])?;
    output.truncate(count);

    Ok(output)
}

pub fn decrypt(cipher: Cipher, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut decrypter = Crypter::new(cipher, Mode::Decrypt, key, Some(iv))?;
    let block_size = cipher.block_size();
    let mut output = vec![0; data.len() + block_size];

    let mut count = decrypter.update(data, &mut output)?;
    count += decrypter.finalize(&mut output[count..])?;
    output.truncate(count);

    Ok(output)
}

pub fn encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    Ok(BASE64.decode(data)?)
}

pub fn digest(digest_type: MessageDigest, data: &[u8]) -> Result<Vec<u8>> {
    let mut hasher = Hasher::new(digest_type)?;
    hasher.update(data)?;
    Ok(hasher.finish()?.to_vec())
}

/// Lowercase hex MD5, the form the login endpoint expects for passwords.
pub fn md5_hex(data: &[u8]) -> Result<String> {
    digest(MessageDigest::md5(), data).map(|d| hex::encode_low(&d))
}

pub mod hex {
    pub fn encode_low(data: &[u8]) -> String {
        hex::encode(data)
    }
}
