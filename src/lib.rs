//! sheetfeed - spreadsheet feed viewer for the web
//!
//! Fetches a JSON table exported from a spreadsheet, caches it, and renders it
//! as an HTML table:
//! - Per-cell colors, alignment, font weight and size
//! - Merged cells via `rowSpan`/`colSpan`
//! - Cached first paint, re-render only when the data changed
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { start, load_table } from 'sheetfeed';
//! await init();
//! start();                                          // default page setup
//! // or
//! await load_table({ endpoint: 'https://…/exec', contentMode: 'escaped' });
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod loader;
pub mod logging;
pub mod render;
pub mod types;

use wasm_bindgen::prelude::*;

pub use cache::{CacheEntry, CacheStore, DocumentCache, MemoryStore};
pub use config::ViewerConfig;
pub use error::{Result, SheetfeedError};
pub use fetch::{parse_document, Fetcher};
pub use fingerprint::{fingerprint, FingerprintKind};
pub use loader::{LoadOutcome, LoadResult, Loader, Phase};
pub use render::{render_document, render_table, ContentMode, HtmlSink, RenderedTable, TableSink};
pub use types::*;

/// Render a table document (JSON) to `<tr>` markup.
///
/// # Errors
/// Returns an error if the JSON is malformed or the document carries `error`.
#[wasm_bindgen]
pub fn render_table_html(json: &str, escaped: bool) -> std::result::Result<String, JsValue> {
    let doc = parse_document(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Some(message) = doc.error {
        return Err(JsValue::from_str(&SheetfeedError::Data(message).to_string()));
    }
    let mode = if escaped {
        ContentMode::Escaped
    } else {
        ContentMode::TrustedHtml
    };
    Ok(render_table(&doc, mode).to_html())
}

/// Fingerprint of a document's `tableData` (`kind` is `"crc32"` or `"length"`).
///
/// # Errors
/// Returns an error for malformed JSON or an unknown kind.
#[wasm_bindgen]
pub fn document_fingerprint(json: &str, kind: &str) -> std::result::Result<String, JsValue> {
    let kind = FingerprintKind::from_name(kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown fingerprint kind '{kind}'")))?;
    let doc = parse_document(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    fingerprint(&doc.table_data, kind).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run the load sequence against the host page's `localStorage` and DOM.
///
/// Resolves to `"rendered"`, `"unchanged"` or `"failed"`.
///
/// # Errors
/// Returns an error if the configuration is invalid or the page lacks the
/// table/loading elements. Fetch failures resolve to `"failed"` instead.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn load_table(config: JsValue) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let config = ViewerConfig::from_js(config)?;
    logging::init(config.level_filter()?);

    let store = cache::LocalStorageStore::from_window()?;
    let sink = render::DomSink::from_window(&config.table_id, &config.loading_indicator_id)?;
    let fetcher = fetch::HttpFetcher::new(config.endpoint.clone());
    let mut loader = Loader::new(&config, store, fetcher, sink);
    let outcome = loader.run().await;
    Ok(JsValue::from_str(outcome.result.name()))
}

/// Load the table with the default configuration once the DOM is ready.
///
/// # Errors
/// Returns an error if the `DOMContentLoaded` listener cannot be registered.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start() -> std::result::Result<(), JsValue> {
    use wasm_bindgen::closure::Closure;

    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    fn spawn() {
        wasm_bindgen_futures::spawn_local(async {
            if let Err(e) = load_table(JsValue::UNDEFINED).await {
                log::error!("table load aborted: {e:?}");
            }
        });
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))?
        .as_string()
        .unwrap_or_default();
    if ready_state == "loading" {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        let callback = Closure::once_into_js(spawn);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            callback.unchecked_ref(),
            &options,
        )?;
    } else {
        spawn();
    }
    Ok(())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
