use serde::{Deserialize, Serialize};

use super::Api;
use crate::crypto::{md5_hex, CryptoError};
use crate::model::Account;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub username: String,
    /// MD5 of the password, lowercase hex.
    pub password: String,
    pub remember_login: String,
}

impl Login {
    pub fn new(username: &str, password: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            username: username.to_string(),
            password: md5_hex(password.as_bytes())?,
            remember_login: "true".to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub code: i64,
    pub account: Account,
}

impl Api for Login {
    type Output = LoginResponse;
    const PATH: &'static str = "/login";
}
