//! Live DOM sink (wasm32 only).

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlTableCellElement, HtmlTableRowElement};

use super::style::px;
use super::{RenderedCell, RenderedRow, RenderedTable, TableSink};
use crate::error::{Result, SheetfeedError};

/// Writes rendered rows into the host page's table element and toggles the
/// loading indicator next to it.
pub struct DomSink {
    document: Document,
    table: HtmlElement,
    loading: HtmlElement,
}

fn element_by_id(document: &Document, id: &str) -> Result<HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SheetfeedError::Dom(format!("element #{id} not found")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SheetfeedError::Dom(format!("element #{id} is not an HTML element")))
}

fn set_display(element: &HtmlElement, visible: bool) -> Result<()> {
    let style = element.style();
    if visible {
        // Falls back to the stylesheet's display value
        style.set_property("display", "")?;
    } else {
        style.set_property("display", "none")?;
    }
    Ok(())
}

impl DomSink {
    /// Look up the table and loading indicator elements in the current page.
    pub fn from_window(table_id: &str, loading_indicator_id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SheetfeedError::Dom("no document available".to_string()))?;
        Self::new(document, table_id, loading_indicator_id)
    }

    pub fn new(document: Document, table_id: &str, loading_indicator_id: &str) -> Result<Self> {
        let table = element_by_id(&document, table_id)?;
        let loading = element_by_id(&document, loading_indicator_id)?;
        Ok(Self {
            document,
            table,
            loading,
        })
    }

    fn build_cell(&self, cell: &RenderedCell) -> Result<HtmlTableCellElement> {
        let td: HtmlTableCellElement = self
            .document
            .create_element("td")?
            .dyn_into()
            .map_err(|_| SheetfeedError::Dom("td is not a table cell".to_string()))?;
        td.set_inner_html(&cell.content);
        if let Some((row_span, col_span)) = cell.span {
            td.set_row_span(row_span);
            td.set_col_span(col_span);
        }
        let style = td.style();
        for (name, value) in cell.style.declarations() {
            style.set_property(name, &value)?;
        }
        Ok(td)
    }

    fn build_row(&self, row: &RenderedRow) -> Result<HtmlTableRowElement> {
        let tr: HtmlTableRowElement = self
            .document
            .create_element("tr")?
            .dyn_into()
            .map_err(|_| SheetfeedError::Dom("tr is not a table row".to_string()))?;
        if let Some(height) = row.height_px {
            tr.style().set_property("height", &px(height))?;
        }
        for cell in &row.cells {
            tr.append_child(&self.build_cell(cell)?)?;
        }
        Ok(tr)
    }
}

impl TableSink for DomSink {
    fn clear(&mut self) -> Result<()> {
        self.table.set_inner_html("");
        Ok(())
    }

    fn append_rows(&mut self, table: &RenderedTable) -> Result<()> {
        let fragment = self.document.create_document_fragment();
        for row in &table.rows {
            fragment.append_child(&self.build_row(row)?)?;
        }
        self.table.append_child(&fragment)?;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        self.table
            .set_inner_html(&super::html::error_row_html(message));
        Ok(())
    }

    fn set_loading_visible(&mut self, visible: bool) -> Result<()> {
        set_display(&self.loading, visible)
    }

    fn set_table_visible(&mut self, visible: bool) -> Result<()> {
        set_display(&self.table, visible)
    }
}
