use crate::html::headings::Headings;
use crate::html::reader::HtmlReader;
use crate::html::HtmlError;

/// One output column of a table function.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Column {
    /// Column name (from the header row or generated)
    pub(crate) name: String,
    /// Whether the name was generated because the table has no header cells
    pub(crate) generated: bool,
}

impl Column {
    /// Returns `name`, or `name_1`, `name_2`, ... when an earlier column already uses it.
    /// Names are compared case-insensitively, as DuckDB does.
    pub(crate) fn unique_name(columns: &[Column], name: &str) -> String {
        let taken = |candidate: &str| columns.iter().any(|c| c.name.eq_ignore_ascii_case(candidate));
        let mut candidate = name.to_owned();
        let mut suffix = 0;
        while taken(&candidate) {
            suffix += 1;
            candidate = format!("{name}_{suffix}");
        }
        candidate
    }
}

/// An HTML table copied out of its document, ready to be handed to DuckDB.
#[derive(Clone, Debug)]
pub(crate) struct Table {
    /// Source location of the document
    pub(crate) location: String,
    /// Column definitions, one per heading
    pub(crate) columns: Vec<Column>,
    /// Cell texts; every record has exactly one entry per column
    pub(crate) records: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Builds the column definitions from headings.
    /// Blank names fall back to the generated name and repeated names get a numeric
    /// suffix, so every column is a distinct DuckDB identifier.
    pub(crate) fn columns(headings: &Headings) -> Vec<Column> {
        let mut columns = Vec::with_capacity(headings.len());
        for (index, name) in headings.names().iter().enumerate() {
            let name = if name.trim().is_empty() {
                Headings::default_name(index)
            } else {
                name.to_owned()
            };
            columns.push(Column {
                name: Column::unique_name(&columns, &name),
                generated: headings.is_synthesized(),
            });
        }
        columns
    }

    /// Reads every row of the reader's table.
    ///
    /// When the headings come from header cells the first row is the heading row and
    /// is left out. Short rows are padded with NULLs and long rows are cut to the
    /// number of columns.
    pub(crate) fn read(reader: &mut HtmlReader) -> Result<Table, HtmlError> {
        let location = reader.location();
        let headings = reader.headings()?.to_owned();
        let width = headings.len();

        let mut cursor = reader.iter_rows()?;
        if !headings.is_synthesized() && cursor.has_next() {
            cursor.next_row()?;
        }
        let records: Vec<Vec<Option<String>>> = cursor
            .map(|row| {
                let mut record: Vec<Option<String>> = row.texts().into_iter().map(Some).collect();
                record.resize(width, None);
                record
            })
            .collect();
        tracing::debug!(%location, columns = width, rows = records.len(), "read table");

        Ok(Table {
            location,
            columns: Self::columns(&headings),
            records,
        })
    }
}
