use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid line at row {line}: {message}")]
    InvalidLine { line: usize, message: String },

    #[error("too many columns at row {line}")]
    TooManyCols { line: usize },

    #[error("not enough columns at row {line}")]
    NotEnoughCols { line: usize },

    #[error("conversion error: field does not parse as the requested type")]
    Conversion,

    #[error("parameter error: {0}")]
    Parameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
