//! Utilities for writing table values into DuckDB vectors.

use duckdb::core::FlatVector;
use duckdb::core::Inserter;

/// Writes a cell text, or NULL for a missing cell.
pub(super) fn write_varchar(vector: &mut FlatVector, row: usize, value: Option<&str>) {
    match value {
        Some(value) => vector.insert(row, value),
        None => vector.set_null(row),
    }
}

/// Writes a primitive value directly to a vector using pointer arithmetic.
pub(super) fn write_primitive<T>(vector: &mut FlatVector, index: usize, value: T) {
    unsafe {
        let pointer: *mut T = vector.as_mut_ptr();
        std::ptr::write(pointer.add(index), value);
    }
}
