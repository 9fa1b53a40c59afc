use rand::Rng;
use serde::Serialize;

use super::{
    key::{EphemeralKey, KEY_LEN},
    BlockCipherStage, CryptoError, ModularExponentiator, Result,
};

/// Wire constants shared with the web client. Changing any of them breaks
/// every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeapiConstants {
    pub public_exponent: &'static str,
    pub modulus: &'static str,
    pub nonce_key: &'static str,
    pub iv: &'static str,
}

impl WeapiConstants {
    pub const NETEASE: WeapiConstants = WeapiConstants {
        public_exponent: "010001",
        modulus: "00e0b509f6259df8642dbc35662901477df22677ec152b5ff68ace615bb7b725152b3ab17a876aea8a5aa76d2e417629ec4ee341f56135fccf695280104e0312ecbda92557c93870114af6c9d05c4f7f0c3685b7a46bee255932575cce10b424d813cfe4875d3e82047b97ddef52741d546b8e289dc6935b3ece0462db0a22b8e7",
        nonce_key: "0CoJUm6Qyw8W8jud",
        iv: "0102030405060708",
    };
}

impl Default for WeapiConstants {
    fn default() -> Self {
        Self::NETEASE
    }
}

/// The two form fields of a weapi POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedRequest {
    pub params: String,
    #[serde(rename = "encSecKey")]
    pub enc_sec_key: String,
}

impl EncodedRequest {
    /// `params=...&encSecKey=...`, urlencoded.
    pub fn to_form(&self) -> Result<String> {
        serde_urlencoded::to_string(self).map_err(|e| CryptoError::EncodingFailure(e.to_string()))
    }
}

/// Two AES-CBC passes over the body, then RSA over the second pass key.
///
/// Holds no per-call state; one encoder can be shared by any number of
/// concurrent callers.
pub struct WeapiEncoder {
    constants: WeapiConstants,
    stage: BlockCipherStage,
    rsa: ModularExponentiator,
}

impl WeapiEncoder {
    pub fn new(constants: WeapiConstants) -> Result<Self> {
        let rsa = ModularExponentiator::new(constants.public_exponent, constants.modulus)?;
        Ok(Self {
            constants,
            stage: BlockCipherStage::new(),
            rsa,
        })
    }

    pub fn encode(&self, body: &str) -> Result<EncodedRequest> {
        self.encode_with_rng(body, &mut rand::rng())
    }

    pub fn encode_with_rng<R: Rng + ?Sized>(
        &self,
        body: &str,
        rng: &mut R,
    ) -> Result<EncodedRequest> {
        let key = EphemeralKey::generate_with(rng, KEY_LEN)?;
        self.encode_with_key(body, &key)
    }

    pub fn encode_bytes(&self, body: &[u8]) -> Result<EncodedRequest> {
        let body =
            std::str::from_utf8(body).map_err(|e| CryptoError::EncodingFailure(e.to_string()))?;
        self.encode(body)
    }

    pub fn encode_json<T: Serialize + ?Sized>(&self, body: &T) -> Result<EncodedRequest> {
        let body =
            serde_json::to_string(body).map_err(|e| CryptoError::EncodingFailure(e.to_string()))?;
        self.encode(&body)
    }

    /// Deterministic for a fixed key.
    pub fn encode_with_key(&self, body: &str, key: &EphemeralKey) -> Result<EncodedRequest> {
        let iv = self.constants.iv.as_bytes();
        let first = self
            .stage
            .encrypt(body.as_bytes(), self.constants.nonce_key.as_bytes(), iv)?;
        let params = self.stage.encrypt(first.as_bytes(), key.as_bytes(), iv)?;
        let enc_sec_key = self.rsa.encrypt(key.as_bytes())?;
        log::trace!("weapi encoded {} byte body", body.len());
        Ok(EncodedRequest {
            params,
            enc_sec_key,
        })
    }

    /// Undo both AES passes given the second pass key.
    pub fn decode_params(&self, params: &str, key: &EphemeralKey) -> Result<String> {
        let iv = self.constants.iv.as_bytes();
        let first = self.stage.decrypt(params, key.as_bytes(), iv)?;
        let first =
            String::from_utf8(first).map_err(|e| CryptoError::EncodingFailure(e.to_string()))?;
        let body = self
            .stage
            .decrypt(&first, self.constants.nonce_key.as_bytes(), iv)?;
        String::from_utf8(body).map_err(|e| CryptoError::EncodingFailure(e.to_string()))
    }
}
