//! Per-cell style lookup with typed defaults.
//!
//! Style grids are parallel to `tableData` but feeds routinely send short,
//! ragged or missing grids. Every lookup is bounds-checked and an absent,
//! empty or zero entry yields the attribute's default.

use crate::types::{StyleGrid, TableDocument};

pub const DEFAULT_TEXT_ALIGN: &str = "center";
pub const DEFAULT_VERTICAL_ALIGN: &str = "middle";
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;
pub const WHITE_SPACE: &str = "pre-wrap";

/// Resolved inline style of one rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub background: Option<String>,
    pub color: Option<String>,
    pub text_align: String,
    pub vertical_align: String,
    pub font_weight: String,
    pub font_size_px: f64,
    pub width_px: Option<f64>,
}

impl CellStyle {
    /// CSS declarations in application order. Unset colors are omitted.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = Vec::with_capacity(8);
        if let Some(bg) = &self.background {
            decls.push(("background-color", bg.clone()));
        }
        if let Some(color) = &self.color {
            decls.push(("color", color.clone()));
        }
        decls.push(("text-align", self.text_align.clone()));
        decls.push(("vertical-align", self.vertical_align.clone()));
        decls.push(("font-weight", self.font_weight.clone()));
        decls.push(("font-size", px(self.font_size_px)));
        if let Some(width) = self.width_px {
            decls.push(("width", px(width)));
        }
        decls.push(("white-space", WHITE_SPACE.to_string()));
        decls
    }

    /// Inline `style` attribute value.
    pub fn css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a pixel length the way CSS expects (`12px`, `12.5px`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}

fn grid_entry<T>(grid: &StyleGrid<T>, row: usize, col: usize) -> Option<&T> {
    grid.get(row)?.get(col)?.as_ref()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Lengths of zero or NaN count as unset.
fn non_zero(value: Option<&f64>) -> Option<f64> {
    value.copied().filter(|v| *v != 0.0 && !v.is_nan())
}

/// Bounds-checked view over a document's style grids.
pub struct StyleLookup<'a> {
    doc: &'a TableDocument,
}

impl<'a> StyleLookup<'a> {
    pub fn new(doc: &'a TableDocument) -> Self {
        Self { doc }
    }

    pub fn background(&self, row: usize, col: usize) -> Option<&'a str> {
        non_empty(grid_entry(&self.doc.backgrounds, row, col))
    }

    pub fn font_color(&self, row: usize, col: usize) -> Option<&'a str> {
        non_empty(grid_entry(&self.doc.font_colors, row, col))
    }

    pub fn horizontal_alignment(&self, row: usize, col: usize) -> &'a str {
        non_empty(grid_entry(&self.doc.horizontal_alignments, row, col))
            .unwrap_or(DEFAULT_TEXT_ALIGN)
    }

    pub fn vertical_alignment(&self, row: usize, col: usize) -> &'a str {
        non_empty(grid_entry(&self.doc.vertical_alignments, row, col))
            .unwrap_or(DEFAULT_VERTICAL_ALIGN)
    }

    pub fn font_weight(&self, row: usize, col: usize) -> &'a str {
        non_empty(grid_entry(&self.doc.font_weights, row, col)).unwrap_or(DEFAULT_FONT_WEIGHT)
    }

    pub fn font_size(&self, row: usize, col: usize) -> f64 {
        non_zero(grid_entry(&self.doc.font_sizes, row, col)).unwrap_or(DEFAULT_FONT_SIZE_PX)
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        non_zero(self.doc.column_widths.get(col).and_then(Option::as_ref))
    }

    pub fn row_height(&self, row: usize) -> Option<f64> {
        non_zero(self.doc.row_heights.get(row).and_then(Option::as_ref))
    }

    /// Everything a rendered cell at (row, col) needs, 0-based.
    pub fn cell_style(&self, row: usize, col: usize) -> CellStyle {
        CellStyle {
            background: self.background(row, col).map(str::to_string),
            color: self.font_color(row, col).map(str::to_string),
            text_align: self.horizontal_alignment(row, col).to_string(),
            vertical_align: self.vertical_alignment(row, col).to_string(),
            font_weight: self.font_weight(row, col).to_string(),
            font_size_px: self.font_size(row, col),
            width_px: self.column_width(col),
        }
    }
}
