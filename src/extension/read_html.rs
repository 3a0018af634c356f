use crate::database::table::Column;
use crate::database::table::Table;
use crate::error::ResultMessage;
use crate::error::RustyHtmlError;
use crate::extension::open_reader;
use crate::extension::writer::write_varchar;
use crate::extension::EncodingParam;
use crate::extension::ExtensionError;
use crate::extension::IndexParam;
use crate::extension::LocationColumnParam;
use crate::extension::LocationParam;
use crate::extension::NamedParam;
use crate::extension::Param;
use crate::extension::SelectorParam;
use duckdb::core::DataChunkHandle;
use duckdb::core::LogicalTypeHandle;
use duckdb::core::LogicalTypeId;
use duckdb::vtab::BindInfo;
use duckdb::vtab::InitInfo;
use duckdb::vtab::TableFunctionInfo;
use duckdb::vtab::VTab;
use encoding_rs::Encoding;
use std::error::Error;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Parameters for reading the table of an HTML document.
struct ReadHtmlParameters {
    /// Path or URL of the HTML document
    location: String,
    /// CSS selector for the table (best table when absent or blank)
    selector: Option<String>,
    /// Position among the selector's matches
    index: Option<usize>,
    /// Document encoding (default: UTF-8)
    encoding: Option<&'static Encoding>,
    /// column name for location of record
    location_column: Option<String>,
}

impl TryFrom<&BindInfo> for ReadHtmlParameters {
    type Error = RustyHtmlError;

    /// Converts DuckDB bind information into structured read parameters.
    fn try_from(bind: &BindInfo) -> Result<Self, Self::Error> {
        Ok(ReadHtmlParameters {
            location: LocationParam::read(bind, 0)?,
            selector: SelectorParam::read(bind)?,
            index: IndexParam::read(bind)?,
            encoding: EncodingParam::read(bind)?,
            location_column: LocationColumnParam::read(bind)?,
        })
    }
}

#[repr(C)]
/// Data shared between the bind, init, and function execution phases.
pub(crate) struct ReadHtmlBindData {
    /// The table copied out of the document
    table: Table,
    /// Output columns: the table's columns plus the optional location column
    columns: Vec<Column>,
    /// location column index
    location_column: Option<usize>,
}

impl TryFrom<&ReadHtmlParameters> for ReadHtmlBindData {
    type Error = RustyHtmlError;

    /// Fetches the document, locates its table and copies the rows out.
    fn try_from(parameters: &ReadHtmlParameters) -> Result<Self, Self::Error> {
        let mut reader = open_reader(
            &parameters.location,
            &parameters.selector,
            parameters.index,
            parameters.encoding,
        )?;
        let table = Table::read(&mut reader)?;
        reader.close();

        if table.columns.is_empty() {
            Err(ExtensionError::NoColumns(table.location.to_owned()))?;
        }

        let mut columns = table.columns.to_owned();
        let location_column = parameters.location_column.as_ref().map(|_| columns.len());
        if let Some(name) = &parameters.location_column {
            columns.push(Column {
                name: Column::unique_name(&columns, name),
                generated: false,
            });
        }
        Ok(ReadHtmlBindData {
            table,
            columns,
            location_column,
        })
    }
}

#[repr(C)]
/// Initialization data tracking the next row to emit and the projected columns.
pub(crate) struct ReadHtmlInitData {
    /// Index of the first row of the next chunk
    row: AtomicUsize,
    /// Column indices that should be projected (output) from the source data
    projections: Vec<usize>,
}

/// Table function that reads one table of an HTML document.
pub(crate) struct ReadHtmlTableFunction;

impl ReadHtmlTableFunction {
    /// Rows emitted per chunk, DuckDB's standard vector size
    const STEP: usize = 2048;
}

impl VTab for ReadHtmlTableFunction {
    type InitData = ReadHtmlInitData;
    type BindData = ReadHtmlBindData;

    /// Reads the table and registers one VARCHAR column per heading.
    fn bind(bind: &BindInfo) -> Result<Self::BindData, Box<dyn Error>> {
        let parameters = ReadHtmlParameters::try_from(bind)?;
        let data = ReadHtmlBindData::try_from(&parameters).with_prefix(parameters.location.as_str())?;
        for column in &data.columns {
            bind.add_result_column(column.name.as_str(), LogicalTypeHandle::from(LogicalTypeId::Varchar));
        }
        Ok(data)
    }

    /// Sets up the row counter and the column projections for the current query.
    fn init(init: &InitInfo) -> Result<Self::InitData, Box<dyn Error>> {
        let projections = init.get_column_indices()
            .into_iter()
            .map(|index| index as usize)
            .collect::<Vec<_>>();
        Ok(ReadHtmlInitData {
            row: AtomicUsize::new(0),
            projections,
        })
    }

    /// Emits the next chunk of rows, or an empty chunk once all rows are out.
    fn func(
        func: &TableFunctionInfo<Self>,
        output: &mut DataChunkHandle,
    ) -> Result<(), Box<dyn Error>> {
        let bind = func.get_bind_data();
        let init = func.get_init_data();
        let records = &bind.table.records;
        let lower = init.row.fetch_add(Self::STEP, Ordering::Relaxed);
        let upper = records.len().min(lower + Self::STEP);
        if lower < upper {
            let mut vectors: Vec<_> = (0..init.projections.len()).map(|index| output.flat_vector(index)).collect();
            for (row, record) in records[lower..upper].iter().enumerate() {
                for (index, col) in init.projections.iter().enumerate() {
                    let vector = &mut vectors[index];
                    if bind.location_column == Some(*col) {
                        write_varchar(vector, row, Some(bind.table.location.as_str()));
                    } else {
                        write_varchar(vector, row, record[*col].as_deref());
                    }
                }
            }
            output.set_len(upper - lower);
        } else {
            output.set_len(0);
        }
        Ok(())
    }

    /// Enables projection pushdown.
    fn supports_pushdown() -> bool {
        true
    }

    /// The first parameter is the document path or URL.
    fn parameters() -> Option<Vec<LogicalTypeHandle>> {
        Some(vec![
            LocationParam::kind(),
        ])
    }

    fn named_parameters() -> Option<Vec<(String, LogicalTypeHandle)>> {
        Some(vec![
            SelectorParam::definition(),
            IndexParam::definition(),
            EncodingParam::definition(),
            LocationColumnParam::definition(),
        ])
    }
}
