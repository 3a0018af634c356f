use crate::helpers::string::collapse_whitespace;
use crate::html::CellFilter;
use crate::html::HtmlError;
use crate::html::ROW;
use scraper::element_ref::Select;
use scraper::ElementRef;
use std::iter::Fuse;
use std::iter::Peekable;

/// The cells of one table row, in document order.
#[derive(Clone, Debug)]
pub(crate) struct Row<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> Row<'a> {
    /// Number of cells in the row
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells matching the filter it was read with.
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whitespace-normalized text of every cell.
    pub(crate) fn texts(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| collapse_whitespace(cell.text()))
            .collect()
    }
}

/// Forward-only cursor over the `tr` elements of a table.
///
/// Once exhausted a cursor stays exhausted, and it cannot rewind. Reading from the
/// start again means building a new cursor from the same table, see [`crate::html::locator::TableReference::rows`].
pub(crate) struct RowCursor<'a> {
    rows: Peekable<Fuse<Select<'a, 'static>>>,
}

impl<'a> RowCursor<'a> {
    pub(crate) fn new(table: ElementRef<'a>) -> Self {
        RowCursor {
            rows: table.select(&ROW).fuse().peekable(),
        }
    }

    /// Returns true while unread rows remain.
    pub(crate) fn has_next(&mut self) -> bool {
        self.rows.peek().is_some()
    }

    /// Reads the header and data cells of the next row.
    pub(crate) fn next_row(&mut self) -> Result<Row<'a>, HtmlError> {
        self.next_cells(CellFilter::Either)
    }

    /// Reads the cells of the next row that match `filter`.
    pub(crate) fn next_cells(&mut self, filter: CellFilter) -> Result<Row<'a>, HtmlError> {
        let row = self.rows.next().ok_or(HtmlError::EndOfSequence)?;
        Ok(Row {
            cells: row.select(filter.selector()).collect(),
        })
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().ok()
    }
}
