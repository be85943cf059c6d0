//! Structured error types for sheetfeed.

/// Text of the error row shown when the feed could not be fetched or parsed.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data. Please try again later.";

/// Text of the error row shown when the feed itself reports an error.
pub const DATA_ERROR_MESSAGE: &str = "Error in data";

/// All errors that can occur while loading and rendering a table feed.
#[derive(Debug, thiserror::Error)]
pub enum SheetfeedError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error! Status: {status}")]
    Transport { status: u16 },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body is not a well-formed table document.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload carries an explicit `error` field.
    #[error("Error in data: {0}")]
    Data(String),

    /// Cache store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Missing host element or failed DOM call.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid viewer configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetfeedError {
    /// The text placed in the single error row for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Data(_) => DATA_ERROR_MESSAGE,
            _ => FETCH_ERROR_MESSAGE,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetfeedError>;

#[cfg(target_arch = "wasm32")]
impl From<SheetfeedError> for wasm_bindgen::JsValue {
    fn from(e: SheetfeedError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SheetfeedError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
