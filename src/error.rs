use thiserror::Error;

use crate::validation::ColumnType;

/// Failures the grid surfaces to its caller.
///
/// Out-of-range edit targets are not part of this enum: they are skipped
/// silently and only counted (see [`crate::edit::PasteOutcome`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid input for column type: {kind}")]
    Validation {
        column: String,
        kind: ColumnType,
        value: String,
    },
    #[error("Nothing to ingest: input contains no lines")]
    EmptyInput,
    #[error("Rows per page must be greater than zero")]
    InvalidPageSize,
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Clipboard access failed: {0}")]
    Clipboard(String),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<csv::Error> for GridError {
    fn from(e: csv::Error) -> Self {
        GridError::Csv(e.to_string())
    }
}

#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for GridError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        GridError::Export(e.to_string())
    }
}

#[cfg(feature = "xlsx")]
impl From<calamine::XlsxError> for GridError {
    fn from(e: calamine::XlsxError) -> Self {
        GridError::Import(e.to_string())
    }
}

pub type GridResult<T> = Result<T, GridError>;
