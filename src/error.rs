//! Error types for csvtable

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a load, save, or re-key operation
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be opened
    #[error("failed to open csv file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file could not be created or written
    #[error("failed to write csv file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed CSV content
    #[error("csv read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The record type has no field matching the table's key field
    #[error("key field `{key_field}` not found on record type {record}")]
    KeyFieldNotFound {
        key_field: String,
        record: &'static str,
    },

    /// A cell could not be converted to its field type (strict mode only)
    #[error("line {line}: column `{column}` value {value:?} does not fit field `{field}`")]
    InvalidCell {
        /// 1-based line in the file, header included
        line: usize,
        column: String,
        field: &'static str,
        value: String,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
