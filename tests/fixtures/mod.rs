//! Test fixtures for generating table feed payloads.
//!
//! [`FeedBuilder`] produces JSON shaped like the spreadsheet export endpoint:
//! every style grid is present and index-aligned with `tableData`, filled
//! with the export's empty values unless a test sets something.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::FeedBuilder;
//!
//! let json = FeedBuilder::new()
//!     .row(&["Name", "Score"])
//!     .row(&["Alice", "10"])
//!     .background(0, 0, "#cccccc")
//!     .merge(1, 1, 1, 2)
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{json, Value};

use sheetfeed::TableDocument;

#[derive(Default)]
pub struct FeedBuilder {
    rows: Vec<Vec<Value>>,
    overrides: Vec<(&'static str, usize, usize, Value)>,
    merges: Vec<Value>,
    column_widths: Vec<Value>,
    row_heights: Vec<Value>,
    error: Option<String>,
    omit_styles: bool,
}

impl FeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of plain string cells.
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows
            .push(cells.iter().map(|c| Value::String((*c).to_string())).collect());
        self
    }

    /// Append a row of arbitrary JSON cells.
    pub fn raw_row(mut self, cells: Vec<Value>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn background(self, row: usize, col: usize, color: &str) -> Self {
        self.style("backgrounds", row, col, json!(color))
    }

    pub fn font_color(self, row: usize, col: usize, color: &str) -> Self {
        self.style("fontColors", row, col, json!(color))
    }

    pub fn align(self, row: usize, col: usize, horizontal: &str, vertical: &str) -> Self {
        self.style("horizontalAlignments", row, col, json!(horizontal))
            .style("verticalAlignments", row, col, json!(vertical))
    }

    pub fn bold(self, row: usize, col: usize) -> Self {
        self.style("fontWeights", row, col, json!("bold"))
    }

    pub fn font_size(self, row: usize, col: usize, size: f64) -> Self {
        self.style("fontSizes", row, col, json!(size))
    }

    fn style(mut self, grid: &'static str, row: usize, col: usize, value: Value) -> Self {
        self.overrides.push((grid, row, col, value));
        self
    }

    /// Merge anchored at 1-based (row, column).
    pub fn merge(mut self, row: u32, column: u32, num_rows: u32, num_columns: u32) -> Self {
        self.merges.push(json!({
            "row": row,
            "column": column,
            "numRows": num_rows,
            "numColumns": num_columns,
        }));
        self
    }

    pub fn column_widths(mut self, widths: &[Option<f64>]) -> Self {
        self.column_widths = widths.iter().map(|w| json!(w)).collect();
        self
    }

    pub fn row_heights(mut self, heights: &[Option<f64>]) -> Self {
        self.row_heights = heights.iter().map(|h| json!(h)).collect();
        self
    }

    /// Turn the payload into a failure payload.
    pub fn error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    /// Leave every style grid out of the payload.
    pub fn without_styles(mut self) -> Self {
        self.omit_styles = true;
        self
    }

    fn grid(&self, name: &str, empty: &Value) -> Value {
        let mut grid: Vec<Vec<Value>> = self
            .rows
            .iter()
            .map(|r| vec![empty.clone(); r.len()])
            .collect();
        for (grid_name, row, col, value) in &self.overrides {
            if *grid_name == name {
                grid[*row][*col] = value.clone();
            }
        }
        json!(grid)
    }

    pub fn to_value(&self) -> Value {
        if let Some(error) = &self.error {
            return json!({ "error": error });
        }
        let mut doc = json!({
            "tableData": self.rows,
            "mergedCells": self.merges,
        });
        if !self.omit_styles {
            let empty = json!("");
            for name in [
                "backgrounds",
                "fontColors",
                "horizontalAlignments",
                "verticalAlignments",
                "fontWeights",
            ] {
                doc[name] = self.grid(name, &empty);
            }
            doc["fontSizes"] = self.grid("fontSizes", &Value::Null);
        }
        if !self.column_widths.is_empty() {
            doc["columnWidths"] = json!(self.column_widths);
        }
        if !self.row_heights.is_empty() {
            doc["rowHeights"] = json!(self.row_heights);
        }
        doc
    }

    /// The payload as the endpoint would serve it.
    pub fn build(&self) -> String {
        self.to_value().to_string()
    }

    pub fn document(&self) -> TableDocument {
        serde_json::from_value(self.to_value()).expect("fixture must deserialize")
    }
}
