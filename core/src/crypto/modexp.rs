use openssl::bn::{BigNum, BigNumContext};

use super::{hex, key::KEY_LEN, CryptoError, Result};

/// Reverse the secret, last byte first.
///
/// The server reads the decrypted key back to front, so the integer fed to
/// the exponentiation is built from the reversed bytes.
pub fn reverse_secret(secret: &[u8]) -> Vec<u8> {
    secret.iter().rev().copied().collect()
}

/// Left-pad lowercase hex to `width` characters.
pub fn pad_hex(data: &[u8], width: usize) -> String {
    let encoded = hex::encode_low(data);
    let encoded = encoded.trim_start_matches('0');
    format!("{:0>width$}", encoded, width = width)
}

/// Textbook RSA over a fixed public key: `c = m^e mod n`, no padding.
pub struct ModularExponentiator {
    exponent: BigNum,
    modulus: BigNum,
    width: usize,
}

impl ModularExponentiator {
    /// Both values are big-endian hex. Output width follows the modulus size
    /// in bytes, 256 hex characters for a 1024-bit modulus.
    pub fn new(exponent: &str, modulus: &str) -> Result<Self> {
        let exponent = BigNum::from_hex_str(exponent)?;
        let modulus = BigNum::from_hex_str(modulus)?;
        let width = modulus.num_bytes() as usize * 2;
        Ok(Self {
            exponent,
            modulus,
            width,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn encrypt(&self, secret: &[u8]) -> Result<String> {
        if secret.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                what: "secret",
                expected: KEY_LEN,
                actual: secret.len(),
            });
        }
        let m = BigNum::from_slice(&reverse_secret(secret))?;
        self.pow_mod(&m).map(|c| pad_hex(&c, self.width))
    }

    fn pow_mod(&self, m: &BigNum) -> Result<Vec<u8>> {
        let mut ctx = BigNumContext::new()?;
        let mut c = BigNum::new()?;
        c.mod_exp(m, &self.exponent, &self.modulus, &mut ctx)?;
        Ok(c.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::weapi::WeapiConstants;

    fn netease() -> ModularExponentiator {
        let c = WeapiConstants::NETEASE;
        ModularExponentiator::new(c.public_exponent, c.modulus).unwrap()
    }

    fn is_lower_hex(s: &str) -> bool {
        s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    #[test]
    fn test_reverse_secret() {
        assert_eq!(reverse_secret(b"abc"), b"cba");
        assert_eq!(reverse_secret(b""), b"");
        assert_eq!(
            reverse_secret(b"0123456789abcdef"),
            b"fedcba9876543210".to_vec()
        );
    }

    #[test]
    fn test_pad_hex() {
        assert_eq!(pad_hex(&[0x01, 0xab], 8), "000001ab");
        assert_eq!(pad_hex(&[0x00, 0x0f], 4), "000f");
        assert_eq!(pad_hex(&[], 4), "0000");
        assert_eq!(pad_hex(&[0xff; 4], 8), "ffffffff");
    }

    #[test]
    fn test_width() {
        assert_eq!(netease().width(), 256);
    }

    #[test]
    fn test_known_vector() {
        let rsa = netease();
        assert_eq!(
            rsa.encrypt(b"0000000000000000").unwrap(),
            "babc57ca9e9ffb0a879ae290ac6cba6f60620aa9ae3b36a84585e23bbc73d73b\
             13a2ebab4aa2ee80544d255727adc5a04db613d77d02a62a52b3a03134d16f19\
             1d54675f560f797c7f03e3a30c43df8b1b49878fd225b62f5f78041427debc3e\
             95b93582f130618630702621da4eda9c71af91836cc39ab3b760b033643a1889"
        );
        assert_eq!(
            rsa.encrypt(b"abcdefghijklmnop").unwrap(),
            "d15a1683c992095d0c234c19966605c5c5964911268bbeda8cb8d08d834913e5\
             9d53b32358903a121b5fca784c1f5ae44951fd02524df58ecc98e52cc7cf8689\
             b42c2e93ddf05b0592512d87f5960467e2f086c018849d76014d323500e30f13\
             ef4cafbb0cf5a66731a3f1776c75ca35d0062dac70a3e33245afabcf47938487"
        );
    }

    #[test]
    fn test_reversal_matters() {
        let rsa = netease();
        let forward = rsa.encrypt(b"abcdefghijklmnop").unwrap();
        let backward = rsa.encrypt(b"ponmlkjihgfedcba").unwrap();
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_output_shape() {
        let rsa = netease();
        for _ in 0..64 {
            let key = crate::crypto::EphemeralKey::generate(KEY_LEN).unwrap();
            let out = rsa.encrypt(key.as_bytes()).unwrap();
            assert_eq!(out.len(), 256);
            assert!(is_lower_hex(&out), "{}", out);
        }
    }

    #[test]
    fn test_small_modulus() {
        let small = ModularExponentiator::new("03", "000b").unwrap();
        assert_eq!(small.width(), 2);
        let c = small.pow_mod(&BigNum::from_u32(2).unwrap()).unwrap();
        assert_eq!(c, vec![8]);

        let wide = ModularExponentiator::new("01", "00ffffff").unwrap();
        assert_eq!(wide.width(), 6);
        let c = wide.pow_mod(&BigNum::from_u32(5).unwrap()).unwrap();
        assert_eq!(pad_hex(&c, wide.width()), "000005");
    }

    #[test]
    fn test_invalid_secret_length() {
        let rsa = netease();
        for secret in [&b"short"[..], &[b'a'; 17][..]] {
            assert!(matches!(
                rsa.encrypt(secret),
                Err(CryptoError::InvalidKeyLength { what: "secret", .. })
            ));
        }
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(
            ModularExponentiator::new("zz", "00ff"),
            Err(CryptoError::OpenSsl(_))
        ));
    }
}
