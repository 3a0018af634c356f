//! # Extension Core Module
//!
//! Parameter handling shared by the `read_html` and `analyze_html` table functions.
use crate::bridge::ValueBridge;
use crate::error::RustyHtmlError;
use crate::html::criteria::Criteria;
use crate::html::reader::HtmlReader;
use crate::html::HtmlError;
use duckdb::core::LogicalTypeHandle;
use duckdb::core::LogicalTypeId;
use duckdb::vtab::BindInfo;
use duckdb::vtab::Value;
use encoding_rs::Encoding;
use thiserror::Error;

pub(crate) mod analyze_html;
pub(crate) mod read_html;
pub(crate) mod writer;

/// Errors raised while binding the extension's table functions.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// Invalid parameter provided to a table function
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Located table has no rows to take columns from
    #[error("Table in '{0}' has no columns")]
    NoColumns(String),
}

/// Positional parameter of a table function.
pub(crate) trait Param<T> {
    /// Returns the DuckDB logical type for this parameter
    fn kind() -> LogicalTypeHandle;

    /// Extracts the parameter at `index` from bind information
    fn read(bind: &BindInfo, index: u64) -> Result<T, RustyHtmlError>;
}

/// Named parameter of a table function.
pub(crate) trait NamedParam<T> {
    /// Returns the parameter name as used in SQL
    fn name() -> &'static str;

    /// Returns the DuckDB logical type for this parameter
    fn kind() -> LogicalTypeHandle;

    /// Returns the complete parameter definition (name and type)
    fn definition() -> (String, LogicalTypeHandle) {
        (Self::name().to_string(), Self::kind())
    }

    /// Converts a provided DuckDB value into the parameter type
    fn parse(value: &Value) -> Result<T, RustyHtmlError>;

    /// Extracts the parameter value from bind information, None if not provided
    fn read(bind: &BindInfo) -> Result<Option<T>, RustyHtmlError> {
        bind.get_named_parameter(Self::name())
            .map(|value| Self::parse(&value))
            .transpose()
    }
}

/// Document location (path or URL) parameter handler
pub(crate) struct LocationParam;

/// CSS selector parameter handler
pub(crate) struct SelectorParam;

/// Selector match index parameter handler
pub(crate) struct IndexParam;

/// Character encoding parameter handler
pub(crate) struct EncodingParam;

/// Location column name parameter handler
pub(crate) struct LocationColumnParam;

impl Param<String> for LocationParam {
    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Varchar)
    }

    fn read(bind: &BindInfo, index: u64) -> Result<String, RustyHtmlError> {
        Ok(bind.get_parameter(index).to_varchar())
    }
}

impl NamedParam<String> for SelectorParam {
    fn name() -> &'static str {
        "selector"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Varchar)
    }

    fn parse(value: &Value) -> Result<String, RustyHtmlError> {
        Ok(value.to_varchar())
    }
}

impl IndexParam {
    /// Checks that a match index is not negative.
    fn check(index: i64) -> Result<usize, ExtensionError> {
        usize::try_from(index).map_err(|_| ExtensionError::InvalidParameter {
            name: Self::name().to_string(),
            message: format!("{index} is negative"),
        })
    }
}

impl NamedParam<usize> for IndexParam {
    fn name() -> &'static str {
        "index"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Bigint)
    }

    fn parse(value: &Value) -> Result<usize, RustyHtmlError> {
        Ok(Self::check(value.to_int64())?)
    }
}

impl EncodingParam {
    /// Resolves a WHATWG encoding label such as `utf-8`, `latin1` or `shift_jis`.
    fn lookup(label: &str) -> Result<&'static Encoding, HtmlError> {
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| HtmlError::UnknownEncoding(label.to_owned()))
    }
}

impl NamedParam<&'static Encoding> for EncodingParam {
    fn name() -> &'static str {
        "encoding"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Varchar)
    }

    fn parse(value: &Value) -> Result<&'static Encoding, RustyHtmlError> {
        Ok(Self::lookup(value.to_varchar().as_str())?)
    }
}

impl NamedParam<String> for LocationColumnParam {
    fn name() -> &'static str {
        "location_column"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Varchar)
    }

    fn parse(value: &Value) -> Result<String, RustyHtmlError> {
        Ok(value.to_varchar())
    }
}

/// Creates a reader from table function parameters.
///
/// # Arguments
///
/// * `location` - Path or URL of the HTML document
/// * `selector` - Optional CSS selector (best table if None or blank)
/// * `index` - Optional position among the selector's matches
/// * `encoding` - Optional document encoding (UTF-8 if None)
pub(crate) fn open_reader(
    location: &str,
    selector: &Option<String>,
    index: Option<usize>,
    encoding: Option<&'static Encoding>,
) -> Result<HtmlReader, HtmlError> {
    let criteria = Criteria {
        selector: selector.to_owned(),
        index,
    };
    let reader = HtmlReader::open(location, criteria)?;
    Ok(match encoding {
        Some(encoding) => reader.with_encoding(encoding),
        None => reader,
    })
}
