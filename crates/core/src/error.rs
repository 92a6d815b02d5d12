//! Error types for xlsplit.

use std::path::PathBuf;
use thiserror::Error;
use xlsplit_sheet::SheetError;

/// Result type for xlsplit operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors that can occur while opening, configuring or splitting a workbook.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The source file is unreadable or not a structurally valid workbook.
    #[error("Invalid document {}: {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: SheetError,
    },

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A sheet's key cell is not a valid A1 address.
    #[error("Invalid key cell '{cell}' on sheet '{sheet}'")]
    InvalidKeyCell { sheet: String, cell: String },

    /// No sheet with this name exists in the source document.
    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    /// Workbook model error while building or saving a destination.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
