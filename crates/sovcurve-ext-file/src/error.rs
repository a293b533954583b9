//! Snapshot loading errors.

use thiserror::Error;

/// Errors raised while loading a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// The snapshot could not be opened or read.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A row could not be decoded.
    #[error("Parse error at line {line}: {message}")]
    ParseError {
        /// 1-based line in the file, 0 when unknown.
        line: u64,
        /// Decoder message.
        message: String,
    },
}

impl FileError {
    pub(crate) fn from_csv(err: &csv::Error) -> Self {
        if err.is_io_error() {
            return Self::IoError(err.to_string());
        }
        Self::ParseError {
            line: err.position().map_or(0, csv::Position::line),
            message: err.to_string(),
        }
    }
}
