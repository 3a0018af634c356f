use crate::helpers::reader::Location;
use crate::helpers::reader::UnifiedReader;
use crate::html::criteria::Criteria;
use crate::html::cursor::RowCursor;
use crate::html::headings;
use crate::html::headings::Headings;
use crate::html::locator::TableReference;
use crate::html::HtmlError;
use encoding_rs::Encoding;
use scraper::Html;

/// The located table and its headings, computed together.
struct Located {
    table: TableReference,
    headings: Headings,
}

/// Reads one table of an HTML document.
///
/// The document is fetched and the table located on first use, then cached until
/// [`HtmlReader::refresh`]. A reader is meant for one thread; every operation that
/// may fill the cache takes `&mut self`.
pub struct HtmlReader {
    location: Location,
    criteria: Criteria,
    encoding: &'static Encoding,
    /// `None` until the table is located, cleared by `refresh`
    cache: Option<Located>,
}

impl HtmlReader {
    /// Creates a reader for the document at `location`.
    /// Nothing is fetched until rows or headings are requested.
    pub fn open(location: &str, criteria: Criteria) -> Result<Self, HtmlError> {
        let location = Location::try_from(location)?;
        tracing::debug!(%location, ?criteria, "opened html reader");
        Ok(HtmlReader {
            location,
            criteria,
            encoding: encoding_rs::UTF_8,
            cache: None,
        })
    }

    /// Decodes the document with `encoding` instead of UTF-8.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The location as given, normalized for display
    pub fn location(&self) -> String {
        self.location.to_string()
    }

    /// Returns a cursor positioned before the first row of the table.
    pub(crate) fn iter_rows(&mut self) -> Result<RowCursor<'_>, HtmlError> {
        Ok(self.located()?.table.rows())
    }

    /// Returns the column headings of the table.
    pub fn headings(&mut self) -> Result<&Headings, HtmlError> {
        Ok(&self.located()?.headings)
    }

    /// Drops the cached table and locates it again in a freshly fetched document.
    pub fn refresh(&mut self) -> Result<(), HtmlError> {
        tracing::debug!(location = %self.location, "refreshing html reader");
        self.cache = None;
        self.located()?;
        Ok(())
    }

    /// Releases the reader. No handle stays open between calls, so this only drops it.
    pub fn close(self) {}

    fn located(&mut self) -> Result<&Located, HtmlError> {
        let located = match self.cache.take() {
            Some(located) => located,
            None => self.locate()?,
        };
        Ok(self.cache.insert(located))
    }

    fn locate(&self) -> Result<Located, HtmlError> {
        let text = UnifiedReader::new(&self.location)?.read_to_text(&self.location, self.encoding)?;
        let table = TableReference::locate(Html::parse_document(&text), &self.criteria)?;
        let headings = headings::resolve(&table);
        tracing::debug!(
            location = %self.location,
            columns = headings.len(),
            synthesized = headings.is_synthesized(),
            "located table"
        );
        Ok(Located { table, headings })
    }
}
