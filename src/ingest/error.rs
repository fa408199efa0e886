use crate::record::SchemaError;

/// Errors that can occur while reading or writing replicate tables
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Required grouping column is absent from the header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be interpreted
    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        /// 1-based line number in the input
        line: u64,
        /// Column name
        column: String,
        /// Offending cell content
        value: String,
    },

    /// Replicate data violates the schema contract
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// Runs with different column layouts cannot share one CSV table
    #[error("Run '{0}' has a different column layout than earlier runs")]
    ColumnLayoutConflict(String),

    /// Temporary output file could not be moved into place
    #[error("Failed to persist output file: {0}")]
    PersistError(#[from] tempfile::PersistError),
}
