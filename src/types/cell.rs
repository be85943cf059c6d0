use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

/// Largest integer a browser number holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single entry of `tableData`.
///
/// Feeds mostly send display strings, but numbers, booleans, `null` and
/// rich-text objects all occur in practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    #[serde(serialize_with = "serialize_number")]
    Number(Number),
    Bool(bool),
    Rich(RichCell),
    Empty,
}

/// Object-shaped cell carrying plain and/or rich (markup) text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<String>,
}

impl CellValue {
    /// The content to place in the rendered cell.
    ///
    /// Rich cells prefer a non-empty `richText`, then a non-empty `text`.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => normalize_number(n).to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Rich(rich) => rich
                .rich_text
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| rich.text.as_deref().filter(|s| !s.is_empty()))
                .unwrap_or_default()
                .to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Integral floats written the way a browser prints them: `1.0` becomes `1`.
fn normalize_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract().abs() < f64::EPSILON && f.abs() < MAX_SAFE_INTEGER => {
            serde_json::from_str(&f.to_string()).unwrap_or_else(|_| n.clone())
        }
        _ => n.clone(),
    }
}

fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    normalize_number(n).serialize(serializer)
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
