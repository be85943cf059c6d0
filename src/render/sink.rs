//! Output targets for rendered tables.

use super::RenderedTable;
use crate::error::Result;

/// Something a [`RenderedTable`] can be written to, along with the loading
/// indicator that accompanies it on the page.
pub trait TableSink {
    /// Remove every rendered row.
    fn clear(&mut self) -> Result<()>;

    /// Append the table's rows after any existing ones.
    fn append_rows(&mut self, table: &RenderedTable) -> Result<()>;

    /// Replace the table contents with a single error row.
    fn show_error(&mut self, message: &str) -> Result<()>;

    fn set_loading_visible(&mut self, visible: bool) -> Result<()>;

    fn set_table_visible(&mut self, visible: bool) -> Result<()>;

    /// Hide the loading indicator and reveal the table. Safe to repeat.
    fn reveal(&mut self) -> Result<()> {
        self.set_loading_visible(false)?;
        self.set_table_visible(true)
    }
}
