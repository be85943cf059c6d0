//! Persistent key-value cache for the last rendered document.
//!
//! Two keys are used: the serialized document and its fingerprint. Entries
//! are only ever overwritten, never removed.

use std::collections::HashMap;

use crate::error::{Result, SheetfeedError};
use crate::types::TableDocument;

/// String key-value store surviving across page loads.
pub trait CacheStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Document and fingerprint as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub serialized_document: String,
    pub fingerprint: String,
}

impl CacheEntry {
    pub fn new(doc: &TableDocument, fingerprint: String) -> Result<Self> {
        Ok(Self {
            serialized_document: serde_json::to_string(doc)?,
            fingerprint,
        })
    }

    /// Parse the stored document back.
    pub fn document(&self) -> Result<TableDocument> {
        Ok(serde_json::from_str(&self.serialized_document)?)
    }
}

/// A [`CacheStore`] bound to the document and fingerprint keys.
pub struct DocumentCache<S> {
    store: S,
    document_key: String,
    fingerprint_key: String,
}

impl<S: CacheStore> DocumentCache<S> {
    pub fn new(store: S, document_key: &str, fingerprint_key: &str) -> Self {
        Self {
            store,
            document_key: document_key.to_string(),
            fingerprint_key: fingerprint_key.to_string(),
        }
    }

    /// Fingerprint of the last stored document.
    pub fn previous_fingerprint(&self) -> Option<String> {
        self.store
            .get(&self.fingerprint_key)
            .unwrap_or_else(|e| {
                log::warn!("cache read failed: {e}");
                None
            })
    }

    /// Both stored values, when present. A document without its fingerprint
    /// (or the reverse) counts as no entry.
    pub fn load(&self) -> Option<CacheEntry> {
        let read = |key: &str| {
            self.store.get(key).unwrap_or_else(|e| {
                log::warn!("cache read failed: {e}");
                None
            })
        };
        let serialized_document = read(&self.document_key)?;
        let fingerprint = read(&self.fingerprint_key)?;
        Some(CacheEntry {
            serialized_document,
            fingerprint,
        })
    }

    /// Overwrite both keys, document first.
    pub fn store(&mut self, entry: &CacheEntry) -> Result<()> {
        self.store
            .set(&self.document_key, &entry.serialized_document)?;
        self.store.set(&self.fingerprint_key, &entry.fingerprint)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// One file per key inside a directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Use `dir` for storage, creating it if needed.
    pub fn open(dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(SheetfeedError::Storage(format!("invalid cache key '{key}'")));
        }
        Ok(self.dir.join(key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key)?, value)?;
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn from_window() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| SheetfeedError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| SheetfeedError::Storage(format!("{e:?}")))?
            .ok_or_else(|| SheetfeedError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl CacheStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| SheetfeedError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Throws when the quota is exceeded
        self.storage
            .set_item(key, value)
            .map_err(|e| SheetfeedError::Storage(format!("{e:?}")))
    }
}
