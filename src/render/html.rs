//! HTML string output for rendered tables.
//!
//! Used for the CLI page output and as an in-memory [`TableSink`].

use quick_xml::escape::escape;

use super::style::px;
use super::{RenderedCell, RenderedRow, RenderedTable, TableSink};
use crate::error::Result;

/// Write one `<td>`.
fn write_cell(out: &mut String, cell: &RenderedCell) {
    out.push_str("<td");
    if let Some((row_span, col_span)) = cell.span {
        out.push_str(&format!(" rowspan=\"{row_span}\" colspan=\"{col_span}\""));
    }
    out.push_str(" style=\"");
    out.push_str(&escape(cell.style.css().as_str()));
    out.push_str("\">");
    out.push_str(&cell.content);
    out.push_str("</td>");
}

/// Markup of a single `<tr>`.
pub fn row_html(row: &RenderedRow) -> String {
    let mut out = String::with_capacity(64 + row.cells.len() * 160);
    match row.height_px {
        Some(height) => out.push_str(&format!("<tr style=\"height: {};\">", px(height))),
        None => out.push_str("<tr>"),
    }
    for cell in &row.cells {
        write_cell(&mut out, cell);
    }
    out.push_str("</tr>");
    out
}

/// Markup of the single-cell error row.
pub fn error_row_html(message: &str) -> String {
    format!("<tr><td>{}</td></tr>", escape(message))
}

impl RenderedTable {
    /// Every row's `<tr>` markup, one row per line.
    pub fn to_html(&self) -> String {
        self.rows.iter().map(row_html).collect::<Vec<_>>().join("\n")
    }

    /// A standalone HTML page containing the table.
    pub fn to_page(&self, title: &str, table_id: &str) -> String {
        page(title, table_id, &self.to_html())
    }
}

fn page(title: &str, table_id: &str, rows: &str) -> String {
    let mut out = String::with_capacity(rows.len() + 512);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<table id=\"{}\">\n", escape(table_id)));
    out.push_str(rows);
    if !rows.is_empty() {
        out.push('\n');
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}

/// In-memory sink collecting `<tr>` markup.
///
/// Starts the way the host page does: loading indicator shown, table hidden.
#[derive(Debug, Clone)]
pub struct HtmlSink {
    rows: Vec<String>,
    loading_visible: bool,
    table_visible: bool,
    render_count: usize,
    error: Option<String>,
}

impl Default for HtmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSink {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            loading_visible: true,
            table_visible: false,
            render_count: 0,
            error: None,
        }
    }

    /// Current table body markup.
    pub fn html(&self) -> String {
        self.rows.join("\n")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of times rows were appended from a rendered table.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn table_visible(&self) -> bool {
        self.table_visible
    }

    /// Message of the error row, if the table currently shows one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current contents as a standalone page.
    pub fn to_page(&self, title: &str, table_id: &str) -> String {
        page(title, table_id, &self.html())
    }
}

impl TableSink for HtmlSink {
    fn clear(&mut self) -> Result<()> {
        self.rows.clear();
        self.error = None;
        Ok(())
    }

    fn append_rows(&mut self, table: &RenderedTable) -> Result<()> {
        self.rows.extend(table.rows.iter().map(row_html));
        self.render_count += 1;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        self.rows = vec![error_row_html(message)];
        self.error = Some(message.to_string());
        Ok(())
    }

    fn set_loading_visible(&mut self, visible: bool) -> Result<()> {
        self.loading_visible = visible;
        Ok(())
    }

    fn set_table_visible(&mut self, visible: bool) -> Result<()> {
        self.table_visible = visible;
        Ok(())
    }
}
