//! Table rendering.
//!
//! Rendering is split in two:
//! - [`render_table`] turns a [`TableDocument`] into a [`RenderedTable`]
//!   (rows, visible cells, spans and resolved styles) without touching any output
//! - a [`TableSink`] applies a rendered table to its target (live DOM, HTML string)

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod html;
pub mod merge;
pub mod sink;
pub mod style;

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
pub use dom::DomSink;
pub use html::HtmlSink;
pub use merge::{CellPlacement, MergeMap};
pub use sink::TableSink;
pub use style::{CellStyle, StyleLookup};

use crate::error::{Result, SheetfeedError, DATA_ERROR_MESSAGE};
use crate::types::TableDocument;

/// How cell text is inserted into the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMode {
    /// Cell text is markup supplied by a trusted feed and inserted as-is.
    #[default]
    TrustedHtml,
    /// Cell text is escaped and shows up literally.
    Escaped,
}

impl ContentMode {
    /// Markup for the given cell text.
    pub fn apply(self, text: String) -> String {
        match self {
            Self::TrustedHtml => text,
            Self::Escaped => quick_xml::escape::escape(text.as_str()).into_owned(),
        }
    }
}

/// One rendered `<td>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell {
    /// 0-based row in `tableData`.
    pub row: usize,
    /// 0-based column in `tableData`.
    pub col: usize,
    /// Markup placed inside the cell.
    pub content: String,
    /// `(rowSpan, colSpan)` for merge anchors.
    pub span: Option<(u32, u32)>,
    pub style: CellStyle,
}

/// One rendered `<tr>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub height_px: Option<f64>,
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedTable {
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = &RenderedCell> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }

    /// The rendered cell at 0-based (row, col), if that cell is visible.
    pub fn cell(&self, row: usize, col: usize) -> Option<&RenderedCell> {
        self.rows
            .get(row)?
            .cells
            .iter()
            .find(|c| c.col == col)
    }
}

/// Build the rendered form of a data document.
///
/// Produces one row per `tableData` entry. Cells covered by a merge anchored
/// elsewhere are left out; the anchor's spans stretch over them.
pub fn render_table(doc: &TableDocument, mode: ContentMode) -> RenderedTable {
    let merges = MergeMap::build(&doc.merged_cells, doc.row_count(), doc.column_count());
    let styles = StyleLookup::new(doc);

    let rows = doc
        .table_data
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let cells = row
                .iter()
                .enumerate()
                .filter_map(|(col_idx, value)| {
                    let span = match merges.placement(row_idx, col_idx) {
                        CellPlacement::Covered { .. } => return None,
                        CellPlacement::Anchor { row_span, col_span } => Some((row_span, col_span)),
                        CellPlacement::Free => None,
                    };
                    Some(RenderedCell {
                        row: row_idx,
                        col: col_idx,
                        content: mode.apply(value.display_text()),
                        span,
                        style: styles.cell_style(row_idx, col_idx),
                    })
                })
                .collect();
            RenderedRow {
                height_px: styles.row_height(row_idx),
                cells,
            }
        })
        .collect();

    RenderedTable { rows }
}

/// Render a document onto a sink.
///
/// A document carrying `error` replaces the table with the data-error row and
/// returns [`SheetfeedError::Data`]. Otherwise the rows are appended, after
/// clearing the sink first when `replacing` is set.
pub fn render_document<S: TableSink + ?Sized>(
    doc: &TableDocument,
    replacing: bool,
    mode: ContentMode,
    sink: &mut S,
) -> Result<()> {
    if let Some(message) = &doc.error {
        log::error!("Error in data: {message}");
        sink.show_error(DATA_ERROR_MESSAGE)?;
        return Err(SheetfeedError::Data(message.clone()));
    }

    let table = render_table(doc, mode);
    if replacing {
        sink.clear()?;
    }
    log::debug!(
        "rendering {} rows / {} cells (replacing: {replacing})",
        table.row_count(),
        table.cell_count()
    );
    sink.append_rows(&table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{CellValue, MergeRange};

    fn grid(rows: &[&[&str]]) -> TableDocument {
        TableDocument::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|s| CellValue::from(*s)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_one_row_per_entry() {
        let table = render_table(&grid(&[&["A", "B"], &["C", "D"], &[]]), ContentMode::default());
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell_count(), 4);
        assert!(table.rows[2].cells.is_empty());
    }

    #[test]
    fn test_merge_suppresses_covered_cells() {
        let mut doc = grid(&[&["A", "B", "C"], &["D", "E", "F"]]);
        doc.merged_cells.push(MergeRange::new(1, 1, 2, 2));
        let table = render_table(&doc, ContentMode::default());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_count(), 3);
        assert_eq!(table.cell(0, 0).unwrap().span, Some((2, 2)));
        assert!(table.cell(0, 1).is_none());
        assert!(table.cell(1, 1).is_none());
        assert_eq!(table.cell(1, 2).unwrap().content, "F");
    }

    #[test]
    fn test_escaped_mode() {
        let doc = grid(&[&["<b>x</b> & y"]]);
        let trusted = render_table(&doc, ContentMode::TrustedHtml);
        let escaped = render_table(&doc, ContentMode::Escaped);
        assert_eq!(trusted.rows[0].cells[0].content, "<b>x</b> & y");
        assert_eq!(escaped.rows[0].cells[0].content, "&lt;b&gt;x&lt;/b&gt; &amp; y");
    }

    #[test]
    fn test_row_height_applied() {
        let mut doc = grid(&[&["A"], &["B"]]);
        doc.row_heights = vec![None, Some(30.0)];
        let table = render_table(&doc, ContentMode::default());
        assert_eq!(table.rows[0].height_px, None);
        assert_eq!(table.rows[1].height_px, Some(30.0));
    }

    #[test]
    fn test_error_document_shows_error_row() {
        let doc = TableDocument {
            error: Some("boom".into()),
            ..TableDocument::default()
        };
        let mut sink = HtmlSink::new();
        let err = render_document(&doc, false, ContentMode::default(), &mut sink).unwrap_err();
        assert!(matches!(err, SheetfeedError::Data(ref m) if m == "boom"));
        assert_eq!(sink.html(), "<tr><td>Error in data</td></tr>");
        assert_eq!(sink.render_count(), 0);
    }
}
