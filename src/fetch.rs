//! Remote fetch of the table document.
//!
//! One GET, no retries and no timeout beyond what the transport imposes.

use crate::error::{Result, SheetfeedError};
use crate::types::TableDocument;

/// Source of the current table document.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self) -> Result<TableDocument>;
}

/// Parse a response body into a [`TableDocument`].
///
/// Only JSON well-formedness and field types are checked; an `error` field is
/// left for the caller to act on.
pub fn parse_document(body: &str) -> Result<TableDocument> {
    Ok(serde_json::from_str(body)?)
}

fn check_status(status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SheetfeedError::Transport { status })
    }
}

/// Browser `fetch()` based fetcher.
#[cfg(target_arch = "wasm32")]
pub struct HttpFetcher {
    url: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(target_arch = "wasm32")]
fn network_error(value: &wasm_bindgen::JsValue) -> SheetfeedError {
    SheetfeedError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[cfg(target_arch = "wasm32")]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<TableDocument> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window =
            web_sys::window().ok_or_else(|| SheetfeedError::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(|e| network_error(&e))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| SheetfeedError::Network("fetch did not yield a Response".to_string()))?;
        check_status(response.status())?;

        let text = response.text().map_err(|e| network_error(&e))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| network_error(&e))?
            .as_string()
            .unwrap_or_default();
        parse_document(&body)
    }
}

/// Native fetcher backed by `reqwest`.
#[cfg(not(target_arch = "wasm32"))]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self) -> Result<TableDocument> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SheetfeedError::Network(e.to_string()))?;
        check_status(response.status().as_u16())?;
        let body = response
            .text()
            .await
            .map_err(|e| SheetfeedError::Network(e.to_string()))?;
        parse_document(&body)
    }
}
