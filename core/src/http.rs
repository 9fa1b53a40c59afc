pub use bytes::Bytes;
pub use reqwest::header::{HeaderMap, HeaderValue};
pub use reqwest::Client as HttpClient;
pub use reqwest::ClientBuilder as HttpClientBuilder;
pub use reqwest_cookie_store::{CookieStore, CookieStoreRwLock};

use std::io::Cursor;
use std::sync::Arc;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REFERER: &str = "https://music.163.com/";

pub trait HasCookieJar {
    fn jar(&self) -> Arc<CookieStoreRwLock>;
}

/// Cookie persistence in the cookie_store JSON format.
pub trait Session {
    fn load_cookie(&self, data: &str) -> bool;
    fn save_cookie(&self) -> String;
}

fn load_(jar: Arc<CookieStoreRwLock>, data: &str) -> bool {
    match cookie_store::serde::json::load_all(Cursor::new(data)) {
        Ok(loaded) => {
            let mut jar = jar.write().unwrap_or_else(|e| e.into_inner());
            *jar = loaded;
            true
        }
        Err(e) => {
            log::error!("Failed to parse cookie data: {}", e);
            false
        }
    }
}

fn save_(jar: Arc<CookieStoreRwLock>) -> String {
    let jar = jar.read().unwrap_or_else(|e| e.into_inner());
    let mut cursor = Cursor::new(Vec::new());
    if let Err(e) = cookie_store::serde::json::save_incl_expired_and_nonpersistent(&jar, &mut cursor)
    {
        log::error!("Failed to save cookies: {}", e);
        return String::new();
    }

    String::from_utf8(cursor.into_inner()).unwrap_or_default()
}

impl<T: HasCookieJar> Session for T {
    fn load_cookie(&self, data: &str) -> bool {
        load_(self.jar(), data)
    }

    fn save_cookie(&self) -> String {
        save_(self.jar())
    }
}

pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(USER_AGENT),
    );
    headers.insert(reqwest::header::REFERER, HeaderValue::from_static(REFERER));
    headers
}

pub fn client_builder_with_jar(jar: Arc<CookieStoreRwLock>) -> HttpClientBuilder {
    HttpClientBuilder::new()
        .cookie_provider(jar)
        .default_headers(default_headers())
}
