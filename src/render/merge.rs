//! Merged-cell lookup.
//!
//! Every coordinate covered by a merge range maps to the range's anchor. Ranges
//! are registered in feed order, so when ranges overlap the later one owns the
//! shared cells.

use std::collections::HashMap;

use crate::types::MergeRange;

/// How a cell takes part in merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPlacement {
    /// Not covered by any merge range.
    Free,
    /// Top-left cell of a merge; rendered with these spans.
    Anchor { row_span: u32, col_span: u32 },
    /// Covered by a merge anchored elsewhere; not rendered.
    Covered { anchor: (u32, u32) },
}

pub struct MergeMap<'a> {
    /// 1-based (row, column) -> 1-based anchor
    covered: HashMap<(u32, u32), (u32, u32)>,
    ranges: &'a [MergeRange],
}

impl<'a> MergeMap<'a> {
    /// Index `ranges` over a table of `rows` x `columns` cells. Coverage
    /// outside the table is ignored.
    pub fn build(ranges: &'a [MergeRange], rows: usize, columns: usize) -> Self {
        let max_row = u32::try_from(rows).unwrap_or(u32::MAX);
        let max_column = u32::try_from(columns).unwrap_or(u32::MAX);
        let mut covered = HashMap::new();
        for range in ranges {
            let anchor = range.anchor();
            for cell in range.cells_within(max_row, max_column) {
                if let Some(previous) = covered.insert(cell, anchor) {
                    if previous != anchor {
                        log::warn!(
                            "merge anchored at {anchor:?} overrides merge anchored at {previous:?} for cell {cell:?}"
                        );
                    }
                }
            }
        }
        Self { covered, ranges }
    }

    /// Placement of the cell at 0-based (row, col).
    pub fn placement(&self, row: usize, col: usize) -> CellPlacement {
        let (Ok(row), Ok(col)) = (u32::try_from(row + 1), u32::try_from(col + 1)) else {
            return CellPlacement::Free;
        };
        let Some(&anchor) = self.covered.get(&(row, col)) else {
            return CellPlacement::Free;
        };
        if anchor != (row, col) {
            return CellPlacement::Covered { anchor };
        }
        // Spans come from the first range declared with this anchor
        match self.ranges.iter().find(|r| r.anchor() == anchor) {
            Some(range) => CellPlacement::Anchor {
                row_span: range.num_rows,
                col_span: range.num_columns,
            },
            None => CellPlacement::Free,
        }
    }
}
