//! Cache round-trip and fingerprint properties.
#![cfg(not(target_arch = "wasm32"))]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::FeedBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;
use sheetfeed::cache::FileStore;
use sheetfeed::fingerprint::{canonical_json, fingerprint_str};
use sheetfeed::{
    fingerprint, CacheEntry, CacheStore, DocumentCache, FingerprintKind, MemoryStore,
    TableDocument,
};
use test_case::test_case;

fn full_feed() -> FeedBuilder {
    FeedBuilder::new()
        .row(&["Name", "Team", "Score"])
        .row(&["Alice", "Red", "10"])
        .raw_row(vec![json!({"text": "Bob", "richText": "<i>Bob</i>"}), json!("Blue"), json!(7)])
        .background(0, 0, "#cccccc")
        .bold(0, 1)
        .font_size(1, 2, 14.0)
        .merge(1, 1, 1, 2)
        .column_widths(&[Some(120.0), None, Some(60.0)])
        .row_heights(&[Some(30.0)])
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_memory_store_round_trip() {
    let doc = full_feed().document();
    let mut store = MemoryStore::new();
    store
        .set("cachedTableData", &serde_json::to_string(&doc).unwrap())
        .unwrap();
    let raw = store.get("cachedTableData").unwrap().unwrap();
    let restored: TableDocument = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, doc);
}

#[test]
fn test_document_cache_round_trip() {
    let doc = full_feed().document();
    let fp = fingerprint(&doc.table_data, FingerprintKind::Crc32).unwrap();
    let mut cache = DocumentCache::new(MemoryStore::new(), "cachedTableData", "dataHash");
    let entry = CacheEntry::new(&doc, fp.clone()).unwrap();
    cache.store(&entry).unwrap();

    assert_eq!(cache.load(), Some(entry));
    assert_eq!(cache.load().map(|e| e.document().unwrap()), Some(doc));
    assert_eq!(cache.previous_fingerprint(), Some(fp));
}

#[test]
fn test_file_store_document_round_trip() {
    let dir = std::env::temp_dir().join(format!("sheetfeed-doc-{}", std::process::id()));
    let doc = full_feed().document();
    {
        let store = FileStore::open(&dir).unwrap();
        let mut cache = DocumentCache::new(store, "cachedTableData", "dataHash");
        cache
            .store(&CacheEntry::new(&doc, "fp".to_string()).unwrap())
            .unwrap();
    }
    let reopened = DocumentCache::new(FileStore::open(&dir).unwrap(), "cachedTableData", "dataHash");
    assert_eq!(reopened.load().map(|e| e.document().unwrap()), Some(doc));
    std::fs::remove_dir_all(&dir).unwrap();
}

// ============================================================================
// Fingerprints
// ============================================================================

#[test_case(FingerprintKind::Crc32 ; "crc32")]
#[test_case(FingerprintKind::Length ; "length")]
fn test_fingerprint_is_deterministic(kind: FingerprintKind) {
    let a = full_feed().document();
    let b = full_feed().document();
    assert_eq!(
        fingerprint(&a.table_data, kind).unwrap(),
        fingerprint(&b.table_data, kind).unwrap()
    );
}

#[test_case(FingerprintKind::Crc32 ; "crc32")]
#[test_case(FingerprintKind::Length ; "length")]
fn test_fingerprint_ignores_styles(kind: FingerprintKind) {
    let plain = FeedBuilder::new().row(&["A"]).document();
    let styled = FeedBuilder::new()
        .row(&["A"])
        .background(0, 0, "#ff0000")
        .document();
    assert_eq!(
        fingerprint(&plain.table_data, kind).unwrap(),
        fingerprint(&styled.table_data, kind).unwrap()
    );
}

#[test]
fn test_length_fingerprint_collides_on_reordered_data() {
    // Known weakness of the length strategy: same length, different content
    let a = FeedBuilder::new().row(&["ab", "cd"]).document();
    let b = FeedBuilder::new().row(&["cd", "ab"]).document();
    assert_ne!(
        canonical_json(&a.table_data).unwrap(),
        canonical_json(&b.table_data).unwrap()
    );
    assert_eq!(
        fingerprint(&a.table_data, FingerprintKind::Length).unwrap(),
        fingerprint(&b.table_data, FingerprintKind::Length).unwrap()
    );
}

#[test]
fn test_crc32_fingerprint_tells_reordered_data_apart() {
    let a = FeedBuilder::new().row(&["ab", "cd"]).document();
    let b = FeedBuilder::new().row(&["cd", "ab"]).document();
    assert_ne!(
        fingerprint(&a.table_data, FingerprintKind::Crc32).unwrap(),
        fingerprint(&b.table_data, FingerprintKind::Crc32).unwrap()
    );
}

#[test]
fn test_fingerprint_is_function_of_serialized_form() {
    let doc = full_feed().document();
    let canonical = canonical_json(&doc.table_data).unwrap();
    for kind in [FingerprintKind::Crc32, FingerprintKind::Length] {
        assert_eq!(
            fingerprint(&doc.table_data, kind).unwrap(),
            fingerprint_str(&canonical, kind)
        );
    }
}
