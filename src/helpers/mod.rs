//! Helpers for fetching documents and normalizing their text.

pub(crate) mod reader;
pub(crate) mod string;
