use thiserror::Error;

/// Errors raised while decoding statements and extracting ledger transactions
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Generic failure while parsing content (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// File format is not supported by the library
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Failed to read the file content from disk
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was called without content nor a file path
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Structural (file-level) errors ──────────────────────────────────────────

    /// No row carries both the date and the description markers
    #[error("Header row not found")]
    HeaderNotFound,

    /// Header row was found but one of the required columns is missing
    #[error("Column could not be located: {0}")]
    ColumnUnresolved(&'static str),

    /// The workbook could not be decoded into a grid
    #[error("Failed to decode workbook: {0}")]
    WorkbookDecode(String),

    /// The requested worksheet does not exist in the workbook
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    // ── Row-level errors (absorbed by the extraction pass) ──────────────────────

    /// Amount cell is not a signed decimal
    #[error("Invalid amount: {0}")]
    AmountInvalid(String),

    /// Date cell could not be parsed day-first
    #[error("Invalid date: {0}")]
    DateInvalid(String),

    // ── Batch/output errors ─────────────────────────────────────────────────────

    /// Failed to write the aggregated ledger
    #[error("Failed to write ledger: {0}")]
    WriteFailed(String),

    /// The batch was started with no input files
    #[error("No input files")]
    NoInputFiles,

    /// No file in the batch produced a transaction
    #[error("No valid transactions extracted")]
    NoTransactions,
}

impl From<csv::Error> for StatementParseError {
    fn from(err: csv::Error) -> Self {
        StatementParseError::WriteFailed(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for StatementParseError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        StatementParseError::WriteFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StatementParseError {
    fn from(err: serde_json::Error) -> Self {
        StatementParseError::WriteFailed(err.to_string())
    }
}

/// Convenience alias for results carrying the crate error
pub type StatementResult<T> = Result<T, StatementParseError>;
