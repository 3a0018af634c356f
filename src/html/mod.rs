//! # HTML Table Module
//!
//! Locates the one data table of an HTML document, resolves its column headings and
//! iterates its rows. Documents are parsed with `scraper`; everything here works on
//! the parsed tree and never mutates it.
use scraper::Selector;
use std::sync::LazyLock;
use thiserror::Error;

pub(crate) mod criteria;
pub(crate) mod cursor;
pub(crate) mod headings;
pub(crate) mod locator;
pub(crate) mod reader;

/// Errors raised while fetching a document or locating and reading its table.
#[derive(Error, Debug)]
pub enum HtmlError {
    /// Location is empty or cannot be understood as a URL or a path
    #[error("Invalid location '{0}'")]
    InvalidLocation(String),

    /// Document could not be read
    #[error("Cannot read '{location}': {source}")]
    Fetch {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No table with at least one row exists in the document
    #[error("No tables found")]
    NoTableFound,

    /// Explicit selector did not resolve to exactly one table
    #[error("Invalid selection '{selector}': {message}")]
    Selection { selector: String, message: String },

    /// Row cursor advanced past its last row
    #[error("No more rows")]
    EndOfSequence,

    /// Encoding label not known to the WHATWG encoding standard
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),
}

/// Which cells of a row a cursor returns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellFilter {
    /// `th` cells only
    Header,
    /// `td` cells only
    Data,
    /// `th` and `td` cells in document order
    Either,
}

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("Hardcode selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("Hardcode selector"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("Hardcode selector"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("Hardcode selector"));
static ANY_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th,td").expect("Hardcode selector"));

impl CellFilter {
    /// Returns the CSS selector matching the cells this filter keeps.
    pub(crate) fn selector(&self) -> &'static Selector {
        match self {
            CellFilter::Header => &HEADER_CELL,
            CellFilter::Data => &DATA_CELL,
            CellFilter::Either => &ANY_CELL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_cell_filter_selector() {
        let document = Html::parse_document("<table><tr><th>a</th><td>b</td><td>c</td></tr></table>");
        let row = document.select(&ROW).next().unwrap();
        assert_eq!(row.select(CellFilter::Header.selector()).count(), 1);
        assert_eq!(row.select(CellFilter::Data.selector()).count(), 2);
        assert_eq!(row.select(CellFilter::Either.selector()).count(), 3);
    }

    #[test]
    fn test_error_messages() {
        let error = HtmlError::Selection {
            selector: "#t".to_owned(),
            message: "2 elements selected".to_owned(),
        };
        assert_eq!(error.to_string(), "Invalid selection '#t': 2 elements selected");
        assert_eq!(HtmlError::NoTableFound.to_string(), "No tables found");
    }
}
