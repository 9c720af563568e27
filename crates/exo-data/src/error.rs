//! Error types for catalog ingestion and the scene pipeline

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading, transforming or writing a catalog.
///
/// Degenerate numeric input (constant columns, non-positive radii) is not an
/// error; it shows up as NaN in the output.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' is not {expected}")]
    ColumnType { column: String, expected: &'static str },

    #[error("Column '{column}' has {found} rows, table has {expected}")]
    ColumnLength { column: String, expected: usize, found: usize },

    #[error("Row {row} has {found} fields, header has {expected}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("{0} is not a csv file")]
    UnsupportedFormat(String),

    #[error("Archive query failed: {0}")]
    Query(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
