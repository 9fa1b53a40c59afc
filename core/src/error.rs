use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::crypto::CryptoError;

#[derive(Debug, Error)]
pub enum NcmError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Api error: {0}")]
    Api(#[from] ApiError),
}

/// Error envelope returned by the service when `code` is not 200.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub msg: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code({}) {}",
            self.code.unwrap_or(-1),
            self.message
                .as_ref()
                .or(self.msg.as_ref())
                .map(String::as_str)
                .unwrap_or("")
        )
    }
}

impl std::error::Error for ApiError {}
