use crate::database::table::Column;
use crate::database::table::Table;
use crate::error::ResultMessage;
use crate::error::RustyHtmlError;
use crate::extension::open_reader;
use crate::extension::writer::write_primitive;
use crate::extension::writer::write_varchar;
use crate::extension::EncodingParam;
use crate::extension::IndexParam;
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

/// Parameters for the analyze_html table function
struct AnalyzeHtmlParameters {
    /// Path or URL of the HTML document
    location: String,
    /// CSS selector for the table (best table when absent or blank)
    selector: Option<String>,
    /// Position among the selector's matches
    index: Option<usize>,
    /// Document encoding (default: UTF-8)
    encoding: Option<&'static Encoding>,
}

impl TryFrom<&BindInfo> for AnalyzeHtmlParameters {
    type Error = RustyHtmlError;

    /// Parse parameters from DuckDB bind info
    fn try_from(bind: &BindInfo) -> Result<Self, Self::Error> {
        Ok(AnalyzeHtmlParameters {
            location: LocationParam::read(bind, 0)?,
            selector: SelectorParam::read(bind)?,
            index: IndexParam::read(bind)?,
            encoding: EncodingParam::read(bind)?,
        })
    }
}

#[repr(C)]
/// Bind data for the analyze_html table function containing the resolved headings
pub(crate) struct AnalyzeHtmlBindData {
    columns: Vec<Column>,
}

impl TryFrom<&AnalyzeHtmlParameters> for AnalyzeHtmlBindData {
    type Error = RustyHtmlError;

    /// Locate the table and resolve its headings without reading the rows
    fn try_from(parameters: &AnalyzeHtmlParameters) -> Result<Self, Self::Error> {
        let mut reader = open_reader(
            &parameters.location,
            &parameters.selector,
            parameters.index,
            parameters.encoding,
        )?;
        let columns = Table::columns(reader.headings()?);
        reader.close();
        Ok(AnalyzeHtmlBindData { columns })
    }
}

#[repr(C)]
/// Init data for the analyze_html table function tracking iteration state
pub(crate) struct AnalyzeHtmlInitData {
    index: AtomicUsize,
}

/// Table function listing the column headings of an HTML table
pub(crate) struct AnalyzeHtmlTableFunction;

impl VTab for AnalyzeHtmlTableFunction {
    type InitData = AnalyzeHtmlInitData;
    type BindData = AnalyzeHtmlBindData;

    /// Bind phase: parse parameters, resolve headings, and define result columns
    fn bind(bind: &BindInfo) -> Result<Self::BindData, Box<dyn Error>> {
        let parameters = AnalyzeHtmlParameters::try_from(bind)?;
        let data = AnalyzeHtmlBindData::try_from(&parameters).with_prefix(parameters.location.as_str())?;
        bind.add_result_column(
            "column_name",
            LogicalTypeHandle::from(LogicalTypeId::Varchar),
        );
        bind.add_result_column(
            "generated",
            LogicalTypeHandle::from(LogicalTypeId::Boolean),
        );
        Ok(data)
    }

    fn init(_: &InitInfo) -> Result<Self::InitData, Box<dyn Error>> {
        Ok(AnalyzeHtmlInitData {
            index: AtomicUsize::new(0),
        })
    }

    /// Function phase: stream one row per heading to DuckDB
    fn func(
        func: &TableFunctionInfo<Self>,
        output: &mut DataChunkHandle,
    ) -> Result<(), Box<dyn Error>> {
        let init = func.get_init_data();
        let bind = func.get_bind_data();
        let lower = init.index.fetch_add(2048, Ordering::Relaxed);
        let upper = bind.columns.len().min(lower + 2048);
        if lower < upper {
            let mut names = output.flat_vector(0);
            let mut generated = output.flat_vector(1);
            for index in lower..upper {
                let column = &bind.columns[index];
                write_varchar(&mut names, index - lower, Some(column.name.as_str()));
                write_primitive(&mut generated, index - lower, column.generated);
            }
            output.set_len(upper - lower);
        } else {
            output.set_len(0);
        }
        Ok(())
    }

    /// Define required positional parameters (document location)
    fn parameters() -> Option<Vec<LogicalTypeHandle>> {
        Some(vec![
            LocationParam::kind(),
        ])
    }

    /// Define optional named parameters for table selection
    fn named_parameters() -> Option<Vec<(String, LogicalTypeHandle)>> {
        Some(vec![
            SelectorParam::definition(),
            IndexParam::definition(),
            EncodingParam::definition(),
        ])
    }
}
