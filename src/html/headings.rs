use crate::html::locator::TableReference;
use crate::html::CellFilter;

/// Column names of a table, positionally aligned with its rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headings {
    names: Vec<String>,
    synthesized: bool,
}

impl Headings {
    /// Column names in order. Duplicates and empty names are kept as found.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True when the table had no header cells and the names are `col0, col1, ...`
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Default name of the column at `index`
    pub(crate) fn default_name(index: usize) -> String {
        format!("col{index}")
    }
}

/// Determines the headings of a table.
///
/// The header cells of the first row are used when there are any. Otherwise one
/// `col<i>` name is made for each data cell of the first row. A table without rows
/// has no headings. Every read goes through a fresh cursor, so cursors opened later
/// still start at the first row.
pub(crate) fn resolve(table: &TableReference) -> Headings {
    if let Ok(row) = table.rows().next_cells(CellFilter::Header) {
        if !row.is_empty() {
            return Headings {
                names: row.texts(),
                synthesized: false,
            };
        }
    }

    let count = table
        .rows()
        .next_cells(CellFilter::Data)
        .map(|row| row.len())
        .unwrap_or(0);
    tracing::debug!(columns = count, "no header cells in first row, using default column names");
    Headings {
        names: (0..count).map(Headings::default_name).collect(),
        synthesized: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::criteria::Criteria;
    use scraper::Html;

    fn table(html: &str) -> TableReference {
        TableReference::locate(Html::parse_document(html), &Criteria::default()).unwrap()
    }

    #[test]
    fn test_header_cells() {
        let table = table("<table><tr><th> Name </th><th>Age</th></tr><tr><td>Alice</td><td>30</td></tr></table>");
        let headings = resolve(&table);
        assert_eq!(headings.names(), ["Name", "Age"]);
        assert!(!headings.is_synthesized());

        // The first row is still there for a cursor opened afterwards
        let mut cursor = table.rows();
        assert_eq!(cursor.next_row().unwrap().texts(), vec!["Name", "Age"]);
        assert_eq!(cursor.next_row().unwrap().texts(), vec!["Alice", "30"]);
    }

    #[test]
    fn test_synthesized_names() {
        let table = table("<table><tr><td>Alice</td><td>30</td><td>x</td></tr><tr><td>Bob</td><td>41</td><td>y</td></tr></table>");
        let headings = resolve(&table);
        assert_eq!(headings.names(), ["col0", "col1", "col2"]);
        assert!(headings.is_synthesized());

        let mut cursor = table.rows();
        assert_eq!(cursor.next_row().unwrap().texts(), vec!["Alice", "30", "x"]);
    }

    #[test]
    fn test_duplicate_and_empty_header_text() {
        let table = table("<table><tr><th>a</th><th></th><th>a</th></tr></table>");
        assert_eq!(resolve(&table).names(), ["a", "", "a"]);
    }

    #[test]
    fn test_mixed_first_row_uses_header_cells() {
        let table = table("<table><tr><th>key</th><td>1</td><td>2</td></tr><tr><th>k2</th><td>3</td><td>4</td></tr></table>");
        assert_eq!(resolve(&table).names(), ["key"]);
    }

    #[test]
    fn test_table_without_rows() {
        let document = Html::parse_document(r#"<table id="t"></table>"#);
        let criteria = Criteria {
            selector: Some("#t".to_owned()),
            index: None,
        };
        let table = TableReference::locate(document, &criteria).unwrap();
        let headings = resolve(&table);
        assert!(headings.is_empty());
        assert_eq!(headings.len(), 0);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = table("<table><tr><td>1</td><td>2</td></tr></table>");
        assert_eq!(resolve(&table), resolve(&table));
    }
}
