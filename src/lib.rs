//! # DuckDB HTML Table Extension
//!
//! A DuckDB extension for querying the data table of an HTML page directly in SQL.
//!
//! ## Features
//!
//! - **Local and remote documents**: read from file paths, `file:` URLs, or any URL
//!   DuckDB's `read_blob` can fetch (`http`, `https`, `s3`, ...)
//! - **Best-table detection**: without a selector the densest table of the page is
//!   chosen (most rows times cells in the first row), skipping layout tables
//! - **Explicit selection**: pick a table with a CSS selector, and an index when the
//!   selector matches several elements
//! - **Header handling**: header cells of the first row become column names, tables
//!   without header cells get `col0`, `col1`, ...
//! - **Configurable encoding**: any WHATWG encoding label, UTF-8 by default
//!
//! ## Table Functions
//!
//! - `read_html`: Read the rows of an HTML table, one VARCHAR column per heading
//! - `analyze_html`: List the column headings of an HTML table
extern crate duckdb;
extern crate duckdb_loadable_macros;
extern crate libduckdb_sys;

mod bridge;
mod database;
mod error;
mod extension;
mod helpers;
mod html;

use crate::extension::analyze_html::AnalyzeHtmlTableFunction;
use crate::extension::read_html::ReadHtmlTableFunction;
use anyhow::{Context, Result};
use duckdb::Connection;
use duckdb_loadable_macros::duckdb_entrypoint_c_api;
use libduckdb_sys as ffi;

/// Extension entry point for DuckDB.
///
/// Registers the `analyze_html` and `read_html` table functions.
///
/// # Errors
///
/// Returns an error if either table function fails to register with DuckDB.
#[duckdb_entrypoint_c_api()]
pub unsafe fn extension_entrypoint(connection: Connection) -> Result<()> {
    connection
        .register_table_function::<AnalyzeHtmlTableFunction>("analyze_html")
        .context("Failed to register analyze_html table function")?;
    connection
        .register_table_function::<ReadHtmlTableFunction>("read_html")
        .context("Failed to register read_html table function")?;
    Ok(())
}
