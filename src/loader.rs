//! Load sequence: cached first paint, fetch, change check, conditional re-render.
//!
//! ```text
//! Idle -> ReadingCache -> [OptimisticRender] -> Fetching -> Comparing -> [Rendering] -> Done
//!                                                   \            \            \
//!                                                    +------------+------------+--> Failed
//! ```
//!
//! The loader runs once. Failures are terminal for the run: the table shows a
//! single error row and nothing is retried.

use crate::cache::{CacheEntry, CacheStore, DocumentCache};
use crate::config::ViewerConfig;
use crate::error::{Result, SheetfeedError};
use crate::fetch::Fetcher;
use crate::fingerprint::{fingerprint, FingerprintKind};
use crate::render::{render_document, ContentMode, TableSink};
use crate::types::TableDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ReadingCache,
    OptimisticRender,
    Fetching,
    Comparing,
    Rendering,
    Done,
    Failed,
}

/// How the fetched document was handled.
#[derive(Debug)]
pub enum LoadResult {
    /// The table was replaced and the cache updated.
    Rendered { fingerprint: String },
    /// The fingerprint matched the cache; nothing was re-rendered.
    Unchanged { fingerprint: String },
    /// The table shows an error row.
    Failed(SheetfeedError),
}

impl LoadResult {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rendered { .. } => "rendered",
            Self::Unchanged { .. } => "unchanged",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    /// Whether a cached document was painted before the fetch.
    pub optimistic_render: bool,
    pub result: LoadResult,
}

pub struct Loader<S, F, K> {
    cache: DocumentCache<S>,
    fetcher: F,
    sink: K,
    content_mode: ContentMode,
    fingerprint_kind: FingerprintKind,
    phase: Phase,
}

impl<S, F, K> Loader<S, F, K>
where
    S: CacheStore,
    F: Fetcher,
    K: TableSink,
{
    pub fn new(config: &ViewerConfig, store: S, fetcher: F, sink: K) -> Self {
        Self {
            cache: DocumentCache::new(store, &config.cache_key, &config.hash_key),
            fetcher,
            sink,
            content_mode: config.content_mode,
            fingerprint_kind: config.fingerprint,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn cache(&self) -> &DocumentCache<S> {
        &self.cache
    }

    pub fn into_parts(self) -> (S, F, K) {
        (self.cache.into_inner(), self.fetcher, self.sink)
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Run the full load sequence once.
    pub async fn run(&mut self) -> LoadOutcome {
        self.enter(Phase::ReadingCache);
        let painted = self.render_cached();
        let optimistic_render = painted.is_some();

        self.enter(Phase::Fetching);
        let result = match self.fetcher.fetch().await {
            Ok(doc) => self.apply_fetched(&doc, painted.as_deref()),
            Err(e) => Err(e),
        };

        let result = match result {
            Ok(result) => {
                self.reveal();
                self.enter(Phase::Done);
                result
            }
            Err(e) => self.fail(e),
        };
        LoadOutcome {
            optimistic_render,
            result,
        }
    }

    /// Paint the cached document, if any. Possibly stale.
    ///
    /// Returns the fingerprint of what is now on screen.
    fn render_cached(&mut self) -> Option<String> {
        let entry = self.cache.load()?;
        let doc = match entry.document() {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("ignoring unreadable cached document: {e}");
                return None;
            }
        };
        self.enter(Phase::OptimisticRender);
        let painted = match render_document(&doc, false, self.content_mode, &mut self.sink) {
            Ok(()) => Some(entry.fingerprint),
            Err(e) => {
                log::warn!("cached document not rendered: {e}");
                None
            }
        };
        self.reveal();
        painted
    }

    /// `painted` is the fingerprint of the cached render, when one happened.
    /// Without it the fetched document is always rendered.
    fn apply_fetched(&mut self, doc: &TableDocument, painted: Option<&str>) -> Result<LoadResult> {
        if let Some(message) = &doc.error {
            return Err(SheetfeedError::Data(message.clone()));
        }

        self.enter(Phase::Comparing);
        let current = fingerprint(&doc.table_data, self.fingerprint_kind)?;
        if painted == Some(current.as_str()) {
            log::info!("feed unchanged ({current}), keeping cached render");
            return Ok(LoadResult::Unchanged {
                fingerprint: current,
            });
        }

        self.enter(Phase::Rendering);
        let previous = self.cache.previous_fingerprint();
        render_document(doc, true, self.content_mode, &mut self.sink)?;
        let stored =
            CacheEntry::new(doc, current.clone()).and_then(|entry| self.cache.store(&entry));
        if let Err(e) = stored {
            log::warn!("cache write failed: {e}");
        }
        log::info!(
            "rendered {} rows, fingerprint {current} (was {})",
            doc.row_count(),
            previous.as_deref().unwrap_or("none")
        );
        Ok(LoadResult::Rendered {
            fingerprint: current,
        })
    }

    fn fail(&mut self, error: SheetfeedError) -> LoadResult {
        log::error!("Error fetching data: {error}");
        self.enter(Phase::Failed);
        if let Err(e) = self.sink.show_error(error.user_message()) {
            log::error!("could not show error row: {e}");
        }
        self.reveal();
        LoadResult::Failed(error)
    }

    fn reveal(&mut self) {
        if let Err(e) = self.sink.reveal() {
            log::warn!("could not toggle visibility: {e}");
        }
    }
}
