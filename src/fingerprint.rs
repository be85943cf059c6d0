//! Change detection for fetched table data.
//!
//! A fingerprint is a short string derived from the canonical (compact JSON)
//! serialization of `tableData`. Two documents with equal fingerprints are
//! treated as unchanged and the re-render is skipped.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::CellValue;

/// Fingerprint strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FingerprintKind {
    /// CRC-32 over the canonical serialization.
    #[default]
    Crc32,
    /// UTF-16 length of the canonical serialization.
    ///
    /// Agrees with fingerprints stored by the legacy page for string, integer,
    /// boolean and `null` cells. Rich-text objects keep only `text` and
    /// `richText`, so their length can differ. Any two payloads of equal
    /// serialized length compare as unchanged.
    Length,
}

impl FingerprintKind {
    /// Parse a strategy name as accepted by the CLI and JS entry points.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "crc32" => Some(Self::Crc32),
            "length" => Some(Self::Length),
            _ => None,
        }
    }
}

/// Canonical serialization of `tableData`: compact JSON with integral
/// floats written without a fraction.
pub fn canonical_json(table_data: &[Vec<CellValue>]) -> Result<String> {
    Ok(serde_json::to_string(table_data)?)
}

/// Fingerprint of `tableData` under the given strategy.
pub fn fingerprint(table_data: &[Vec<CellValue>], kind: FingerprintKind) -> Result<String> {
    let canonical = canonical_json(table_data)?;
    Ok(fingerprint_str(&canonical, kind))
}

/// Fingerprint of an already-serialized `tableData`.
pub fn fingerprint_str(canonical: &str, kind: FingerprintKind) -> String {
    match kind {
        FingerprintKind::Crc32 => format!("crc32:{:08x}", crc32fast::hash(canonical.as_bytes())),
        FingerprintKind::Length => canonical.encode_utf16().count().to_string(),
    }
}
