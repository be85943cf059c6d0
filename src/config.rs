//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object (or no configuration at
//! all) yields the stock page setup.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetfeedError};
use crate::fingerprint::FingerprintKind;
use crate::render::ContentMode;

/// Feed endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwJh55eAwKMubOUmq0N0NtIZ83N4EthpC4hC_QNKwpx2vF8PyLrm05ffwgLYfTSxSA/exec";

/// Storage key of the last rendered document.
pub const DEFAULT_CACHE_KEY: &str = "cachedTableData";

/// Storage key of the last rendered document's fingerprint.
pub const DEFAULT_HASH_KEY: &str = "dataHash";

pub const DEFAULT_LOADING_INDICATOR_ID: &str = "loading-indicator";
pub const DEFAULT_TABLE_ID: &str = "data-table";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub endpoint: String,
    pub cache_key: String,
    pub hash_key: String,
    pub loading_indicator_id: String,
    pub table_id: String,
    pub content_mode: ContentMode,
    pub fingerprint: FingerprintKind,
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            hash_key: DEFAULT_HASH_KEY.to_string(),
            loading_indicator_id: DEFAULT_LOADING_INDICATOR_ID.to_string(),
            table_id: DEFAULT_TABLE_ID.to_string(),
            content_mode: ContentMode::default(),
            fingerprint: FingerprintKind::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SheetfeedError::Config(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Convert a JavaScript configuration object. `undefined`/`null` yield the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| SheetfeedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("endpoint", &self.endpoint),
            ("cacheKey", &self.cache_key),
            ("hashKey", &self.hash_key),
            ("loadingIndicatorId", &self.loading_indicator_id),
            ("tableId", &self.table_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SheetfeedError::Config(format!("{name} must not be empty")));
            }
        }
        if self.cache_key == self.hash_key {
            return Err(SheetfeedError::Config(
                "cacheKey and hashKey must differ".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    /// The configured log level.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| SheetfeedError::Config(format!("unknown logLevel '{}'", self.log_level)))
    }
}
