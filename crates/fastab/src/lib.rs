#![doc = include_str!("../README.md")]

pub mod column;
pub mod convert;
pub mod error;
pub mod options;
pub mod read;
pub mod tokenize;

pub use crate::column::{Column, ColumnData, Table};
pub use crate::error::{Error, Result};
pub use crate::options::{FillValue, ReadOptions};
pub use crate::read::Reader;

use std::io::Read;

/// Read a table from a string.
pub fn read_str(input: &str, options: &ReadOptions) -> Result<Table> {
    Reader::new(options.clone())?.read_str(input)
}

/// Read a table from raw bytes.
pub fn read_bytes(input: &[u8], options: &ReadOptions) -> Result<Table> {
    Reader::new(options.clone())?.read_bytes(input)
}

/// Read a table from any `io::Read` source.
pub fn read_from_reader<R: Read>(reader: R, options: &ReadOptions) -> Result<Table> {
    Reader::new(options.clone())?.read_from_reader(reader)
}
