use reqwest::header;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::api::Api;
use crate::crypto::{WeapiConstants, WeapiEncoder};
use crate::error::{ApiError, NcmError};
use crate::http::{client_builder_with_jar, Bytes, CookieStoreRwLock, HasCookieJar, HttpClient};

pub const BASE_URL: &str = "https://music.163.com";

pub struct Client {
    client: HttpClient,
    jar: Arc<CookieStoreRwLock>,
    encoder: WeapiEncoder,
    base: String,
}

impl Client {
    pub fn new() -> Result<Self, NcmError> {
        Self::with_base(BASE_URL)
    }

    pub fn with_base(base: impl Into<String>) -> Result<Self, NcmError> {
        let jar = Arc::new(CookieStoreRwLock::default());
        let client = client_builder_with_jar(jar.clone()).build()?;
        Ok(Self {
            client,
            jar,
            encoder: WeapiEncoder::new(WeapiConstants::NETEASE)?,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn format_url<T: Api>(&self) -> String {
        format!("{}/weapi{}", self.base, T::PATH)
    }

    /// POST one weapi call. Every call, retries included, gets a fresh
    /// ephemeral key.
    pub async fn request<T: Api>(&self, api: &T) -> Result<T::Output, NcmError> {
        let url = self.format_url::<T>();
        let body = self.encoder.encode_json(api)?.to_form()?;
        log::debug!("POST {}", url);

        let rsp = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        let value: serde_json::Value = rsp.json().await?;
        parse_response(value)
    }

    /// Plain GET, `None` on a non-success status.
    pub async fn fetch(&self, url: &str) -> Result<Option<Bytes>, NcmError> {
        let rsp = self.client.get(url).send().await?;
        if !rsp.status().is_success() {
            log::warn!("GET {} returned {}", url, rsp.status());
            return Ok(None);
        }
        Ok(Some(rsp.bytes().await?))
    }
}

impl HasCookieJar for Client {
    fn jar(&self) -> Arc<CookieStoreRwLock> {
        self.jar.clone()
    }
}

pub fn parse_response<O: DeserializeOwned>(value: serde_json::Value) -> Result<O, NcmError> {
    match value.get("code").and_then(|c| c.as_i64()) {
        Some(200) => Ok(serde_json::from_value(value)?),
        _ => {
            let err: ApiError = serde_json::from_value(value).unwrap_or_default();
            Err(NcmError::Api(err))
        }
    }
}
