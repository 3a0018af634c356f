use crate::html::criteria::Criteria;
use crate::html::cursor::RowCursor;
use crate::html::CellFilter;
use crate::html::HtmlError;
use crate::html::ROW;
use crate::html::TABLE;
use scraper::ElementRef;
use scraper::Html;
use scraper::Selector;

/// A parsed document together with the one table located in it.
///
/// The table is identified by its position among the document's `table` elements,
/// so the reference can own the document it points into.
pub(crate) struct TableReference {
    document: Html,
    ordinal: usize,
}

impl TableReference {
    /// Locates the table matching `criteria` and takes ownership of the document.
    pub(crate) fn locate(document: Html, criteria: &Criteria) -> Result<Self, HtmlError> {
        let table = locate(&document, criteria)?;
        let ordinal = document
            .select(&TABLE)
            .position(|candidate| candidate == table)
            .ok_or(HtmlError::NoTableFound)?;
        Ok(TableReference { document, ordinal })
    }

    /// The located `table` element
    pub(crate) fn element(&self) -> ElementRef<'_> {
        self.document
            .select(&TABLE)
            .nth(self.ordinal)
            .expect("table reference points into its own document")
    }

    /// Opens a new cursor positioned before the first row.
    pub(crate) fn rows(&self) -> RowCursor<'_> {
        RowCursor::new(self.element())
    }
}

/// Finds the table described by `criteria`.
/// A blank selector falls back to [`best_table`].
pub(crate) fn locate<'a>(document: &'a Html, criteria: &Criteria) -> Result<ElementRef<'a>, HtmlError> {
    match criteria.explicit_selector() {
        Some(selector) => selected_table(document, selector, criteria.index),
        None => best_table(document),
    }
}

/// Resolves an explicit selector (and optional index) to a table element.
fn selected_table<'a>(document: &'a Html, selector: &str, index: Option<usize>) -> Result<ElementRef<'a>, HtmlError> {
    let error = |message: String| HtmlError::Selection {
        selector: selector.to_owned(),
        message,
    };
    let parsed = Selector::parse(selector).map_err(|e| error(format!("cannot parse selector: {e}")))?;
    let elements: Vec<ElementRef<'a>> = document.select(&parsed).collect();
    tracing::debug!(selector, ?index, matches = elements.len(), "resolving selected table");

    let element = match index {
        None if elements.len() == 1 => elements[0],
        None => return Err(error(format!("{} elements selected", elements.len()))),
        Some(index) => *elements.get(index).ok_or_else(|| {
            error(format!("index {index} is out of range, {} elements selected", elements.len()))
        })?,
    };

    let tag = element.value().name();
    if tag == "table" {
        Ok(element)
    } else {
        Err(error(format!("selected element is a {tag}, not a table")))
    }
}

/// Picks the densest table: the one with the greatest `rows * first row cells`.
/// Ties keep the earliest table, and tables without rows are skipped.
pub(crate) fn best_table(document: &Html) -> Result<ElementRef<'_>, HtmlError> {
    let mut best: Option<(ElementRef<'_>, usize)> = None;
    for (ordinal, table) in document.select(&TABLE).enumerate() {
        let mut rows = table.select(&ROW);
        let Some(first_row) = rows.next() else {
            tracing::trace!(ordinal, "skipping table without rows");
            continue;
        };
        let row_count = 1 + rows.count();
        let col_count = first_row.select(CellFilter::Either.selector()).count();
        let score = row_count * col_count;
        tracing::trace!(ordinal, row_count, col_count, score, "scored table");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((table, score));
        }
    }
    best.map(|(table, _)| table).ok_or(HtmlError::NoTableFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(selector: &str, index: Option<usize>) -> Criteria {
        Criteria {
            selector: Some(selector.to_owned()),
            index,
        }
    }

    fn id_of(table: ElementRef<'_>) -> Option<&str> {
        table.value().id()
    }

    #[test]
    fn test_best_table_by_score() {
        let document = Html::parse_document(r#"
            <table id="layout"><tr><td>menu</td></tr></table>
            <table id="data">
              <tr><th>a</th><th>b</th><th>c</th></tr>
              <tr><td>1</td><td>2</td><td>3</td></tr>
            </table>
            <table id="tall"><tr><td>1</td></tr><tr><td>2</td></tr><tr><td>3</td></tr><tr><td>4</td></tr><tr><td>5</td></tr></table>"#);
        let table = best_table(&document).unwrap();
        assert_eq!(id_of(table), Some("data"));
    }

    #[test]
    fn test_best_table_tie_keeps_first() {
        let document = Html::parse_document(r#"
            <table id="first"><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></table>
            <table id="second"><tr><td>1</td></tr><tr><td>2</td></tr><tr><td>3</td></tr><tr><td>4</td></tr></table>"#);
        assert_eq!(id_of(best_table(&document).unwrap()), Some("first"));
    }

    #[test]
    fn test_best_table_without_tables() {
        let document = Html::parse_document("<p>nothing here</p>");
        assert!(matches!(best_table(&document), Err(HtmlError::NoTableFound)));
    }

    #[test]
    fn test_best_table_skips_tables_without_rows() {
        let document = Html::parse_document(r#"
            <table id="empty"></table>
            <table id="only"><tr><td>x</td></tr></table>
            <table id="also-empty"><caption>none</caption></table>"#);
        assert_eq!(id_of(best_table(&document).unwrap()), Some("only"));

        let document = Html::parse_document("<table></table><table></table>");
        assert!(matches!(best_table(&document), Err(HtmlError::NoTableFound)));
    }

    #[test]
    fn test_best_table_with_zero_score_first() {
        let document = Html::parse_document(r#"
            <table id="cellless"><tr></tr></table>
            <table id="other"><tr></tr><tr></tr></table>"#);
        assert_eq!(id_of(best_table(&document).unwrap()), Some("cellless"));
    }

    #[test]
    fn test_selected_table() {
        let document = Html::parse_document(r#"
            <table><tr><td>big</td><td>big</td></tr><tr><td>big</td><td>big</td></tr></table>
            <table id="mytable"><tr><td>small</td></tr></table>"#);
        let table = locate(&document, &criteria("#mytable", None)).unwrap();
        assert_eq!(id_of(table), Some("mytable"));
    }

    #[test]
    fn test_selected_table_multiple_matches() {
        let document = Html::parse_document(r#"
            <table class="t"><tr><td>1</td></tr></table>
            <table class="t"><tr><td>2</td></tr></table>"#);
        match locate(&document, &criteria(".t", None)) {
            Err(HtmlError::Selection { selector, message }) => {
                assert_eq!(selector, ".t");
                assert_eq!(message, "2 elements selected");
            }
            other => panic!("unexpected result {:?}", other.map(id_of)),
        }
        match locate(&document, &criteria("#missing", None)) {
            Err(HtmlError::Selection { message, .. }) => assert_eq!(message, "0 elements selected"),
            other => panic!("unexpected result {:?}", other.map(id_of)),
        }
    }

    #[test]
    fn test_selected_table_with_index() {
        let document = Html::parse_document(r#"
            <table class="t" id="a"><tr><td>1</td></tr></table>
            <table class="t" id="b"><tr><td>2</td></tr></table>"#);
        assert_eq!(id_of(locate(&document, &criteria(".t", Some(1))).unwrap()), Some("b"));
        match locate(&document, &criteria(".t", Some(2))) {
            Err(HtmlError::Selection { message, .. }) => {
                assert_eq!(message, "index 2 is out of range, 2 elements selected")
            }
            other => panic!("unexpected result {:?}", other.map(id_of)),
        }
    }

    #[test]
    fn test_selected_element_is_not_table() {
        let document = Html::parse_document(r#"<div class="wrapper"><table><tr><td>1</td></tr></table></div>"#);
        match locate(&document, &criteria("div.wrapper", None)) {
            Err(HtmlError::Selection { message, .. }) => {
                assert_eq!(message, "selected element is a div, not a table")
            }
            other => panic!("unexpected result {:?}", other.map(id_of)),
        }
    }

    #[test]
    fn test_invalid_selector() {
        let document = Html::parse_document("<table><tr><td>1</td></tr></table>");
        assert!(matches!(
            locate(&document, &criteria("[[", None)),
            Err(HtmlError::Selection { .. })
        ));
    }

    #[test]
    fn test_empty_selector_uses_best_table() {
        let document = Html::parse_document(r#"
            <table id="a"><tr><td>1</td></tr></table>
            <table id="b"><tr><td>1</td><td>2</td></tr></table>"#);
        assert_eq!(id_of(locate(&document, &criteria("", None)).unwrap()), Some("b"));
        assert_eq!(id_of(locate(&document, &Criteria::default()).unwrap()), Some("b"));
    }

    #[test]
    fn test_table_reference() {
        let document = Html::parse_document(r#"
            <table id="a"><tr><td>1</td></tr></table>
            <div><table id="b"><tr><td>x</td></tr><tr><td>y</td></tr></table></div>"#);
        let reference = TableReference::locate(document, &criteria("div > table", None)).unwrap();
        assert_eq!(reference.element().value().id(), Some("b"));
        let rows: Vec<Vec<String>> = reference.rows().map(|row| row.texts()).collect();
        assert_eq!(rows, vec![vec!["x"], vec!["y"]]);
    }
}
