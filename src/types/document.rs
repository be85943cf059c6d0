use serde::{Deserialize, Serialize};

use super::CellValue;

/// Per-cell style attribute grid, index-aligned with `tableData`.
pub type StyleGrid<T> = Vec<Vec<Option<T>>>;

/// The table payload served by the feed and kept in the cache.
///
/// Only `tableData` is required. Missing style grids, widths, heights and
/// merges deserialize as empty and fall back to rendering defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    #[serde(default)]
    pub table_data: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub backgrounds: StyleGrid<String>,
    #[serde(default)]
    pub font_colors: StyleGrid<String>,
    #[serde(default)]
    pub horizontal_alignments: StyleGrid<String>,
    #[serde(default)]
    pub vertical_alignments: StyleGrid<String>,
    #[serde(default)]
    pub font_weights: StyleGrid<String>,
    #[serde(default)]
    pub font_sizes: StyleGrid<f64>,
    /// Pixel width per column.
    #[serde(default)]
    pub column_widths: Vec<Option<f64>>,
    /// Pixel height per row.
    #[serde(default)]
    pub row_heights: Vec<Option<f64>>,
    #[serde(default)]
    pub merged_cells: Vec<MergeRange>,
    /// When present the whole document is a failure payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDocument {
    /// Build a document holding only cell values.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            table_data: rows,
            ..Self::default()
        }
    }

    /// Number of rows in `tableData`.
    pub fn row_count(&self) -> usize {
        self.table_data.len()
    }

    /// Widest row in `tableData`.
    pub fn column_count(&self) -> usize {
        self.table_data.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A rectangular merged region anchored at its top-left cell.
///
/// `row` and `column` are 1-based, matching the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRange {
    pub row: u32,
    pub column: u32,
    pub num_rows: u32,
    pub num_columns: u32,
}

impl MergeRange {
    pub fn new(row: u32, column: u32, num_rows: u32, num_columns: u32) -> Self {
        Self {
            row,
            column,
            num_rows,
            num_columns,
        }
    }

    /// Anchor coordinate as (row, column), 1-based.
    pub fn anchor(&self) -> (u32, u32) {
        (self.row, self.column)
    }

    /// Every (row, column) covered by this range, anchor included, row-major.
    /// Coordinates past `u32::MAX` do not exist and are dropped.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        self.cells_within(u32::MAX, u32::MAX)
    }

    /// Like [`cells`](Self::cells), restricted to rows `..=max_row` and
    /// columns `..=max_column`.
    pub fn cells_within(&self, max_row: u32, max_column: u32) -> impl Iterator<Item = (u32, u32)> {
        let columns = clipped(self.column, self.num_columns, max_column);
        clipped(self.row, self.num_rows, max_row)
            .flat_map(move |r| columns.clone().map(move |c| (r, c)))
    }
}

fn clipped(start: u32, len: u32, max: u32) -> impl Iterator<Item = u32> + Clone {
    let last = start.saturating_add(len.saturating_sub(1)).min(max);
    (len > 0 && start <= last)
        .then_some(start..=last)
        .into_iter()
        .flatten()
}
