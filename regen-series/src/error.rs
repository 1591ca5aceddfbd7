//! Error types for reading and interpreting rainfall series data.

use thiserror::Error;

/// Errors produced while parsing rainfall series input.
#[derive(Error, Debug)]
pub enum SeriesError {
    /// CSV-level error (malformed quoting, IO failure mid-read).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp field that is not valid RFC 3339.
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// A value field that is not a number.
    #[error("invalid value: {0}")]
    Value(#[from] std::num::ParseFloatError),

    /// A record that does not match the expected shape.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },
}

pub type Result<T> = std::result::Result<T, SeriesError>;
