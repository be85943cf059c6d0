//! Common test utilities: scripted fetchers and table assertions.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::Cell;

use sheetfeed::render::RenderedCell;
use sheetfeed::{
    parse_document, Fetcher, HtmlSink, Loader, MemoryStore, RenderedTable, Result,
    SheetfeedError, TableDocument, ViewerConfig,
};

// ============================================================================
// Scripted Fetcher
// ============================================================================

/// What the fake endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this body.
    Body(String),
    /// Non-success status.
    Status(u16),
    /// The request never completes.
    NetworkDown,
}

/// Fetcher answering every request with a fixed [`Reply`].
pub struct ScriptedFetcher {
    reply: Reply,
    calls: Cell<usize>,
}

impl ScriptedFetcher {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
        }
    }

    pub fn body(json: impl Into<String>) -> Self {
        Self::new(Reply::Body(json.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<TableDocument> {
        self.calls.set(self.calls.get() + 1);
        match &self.reply {
            Reply::Body(body) => parse_document(body),
            Reply::Status(status) => Err(SheetfeedError::Transport { status: *status }),
            Reply::NetworkDown => Err(SheetfeedError::Network("connection refused".to_string())),
        }
    }
}

pub type TestLoader = Loader<MemoryStore, ScriptedFetcher, HtmlSink>;

/// Loader over an in-memory store and sink with the default configuration.
pub fn loader(store: MemoryStore, fetcher: ScriptedFetcher) -> TestLoader {
    Loader::new(&ViewerConfig::default(), store, fetcher, HtmlSink::new())
}

// ============================================================================
// Table Assertions
// ============================================================================

pub fn get_cell(table: &RenderedTable, row: usize, col: usize) -> &RenderedCell {
    table
        .cell(row, col)
        .unwrap_or_else(|| panic!("cell ({row}, {col}) was not rendered"))
}

pub fn assert_cell_text(table: &RenderedTable, row: usize, col: usize, expected: &str) {
    assert_eq!(
        get_cell(table, row, col).content,
        expected,
        "unexpected content at ({row}, {col})"
    );
}

pub fn assert_not_rendered(table: &RenderedTable, row: usize, col: usize) {
    assert!(
        table.cell(row, col).is_none(),
        "cell ({row}, {col}) should be hidden by a merge"
    );
}

pub fn assert_span(table: &RenderedTable, row: usize, col: usize, row_span: u32, col_span: u32) {
    assert_eq!(
        get_cell(table, row, col).span,
        Some((row_span, col_span)),
        "unexpected span at ({row}, {col})"
    );
}
