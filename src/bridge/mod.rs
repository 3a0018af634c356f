use duckdb::vtab::Value;
use libduckdb_sys::{duckdb_free, duckdb_get_int64, duckdb_get_varchar, duckdb_value};
use std::{ffi::CStr, os::raw::c_void};

/// Typed access to the DuckDB values handed to table functions as parameters.
///
/// # Safety Warning
///
/// Relies on `Value` being a plain wrapper around a `duckdb_value` pointer. That layout
/// is an implementation detail of duckdb-rs and must be checked on every upgrade.
pub(crate) trait ValueBridge {
    /// Extracts the raw `duckdb_value` pointer from the `Value` struct.
    ///
    /// # Safety
    ///
    /// Only valid while `Value` has exactly the layout of `duckdb_value`
    /// (`size_of::<Value>() == size_of::<duckdb_value>()`).
    unsafe fn get_value_ptr(&self) -> duckdb_value;

    /// Returns the value as an i64
    fn to_int64(&self) -> i64 {
        unsafe { duckdb_get_int64(self.get_value_ptr()) }
    }

    /// Returns the value as an owned UTF-8 string
    fn to_varchar(&self) -> String {
        unsafe {
            let varchar = duckdb_get_varchar(self.get_value_ptr());
            let string = CStr::from_ptr(varchar).to_string_lossy().into_owned();
            duckdb_free(varchar as *mut c_void);
            string
        }
    }
}

impl ValueBridge for Value {
    unsafe fn get_value_ptr(&self) -> duckdb_value {
        *(self as *const Value as *const duckdb_value)
    }
}
