//! Error types for the docex-core library.

use thiserror::Error;

/// Main error type for the docex library.
#[derive(Error, Debug)]
pub enum DocexError {
    /// User input rejected before anything ran.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Extraction run failed.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Result export failed.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by user-input validation.
///
/// None of these are fatal: the operation is aborted and all prior state
/// is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A schema field has an empty name.
    #[error("all fields must have a name (field {index} is empty)")]
    EmptyFieldName { index: usize },

    /// Attempt to remove the only remaining field of a schema.
    #[error("a schema must keep at least one field")]
    LastField,

    /// Field index outside the builder's field list.
    #[error("field index {index} out of range (schema has {len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    /// Extraction triggered without a schema.
    #[error("please select a schema")]
    NoSchemaSelected,

    /// Selected schema no longer exists in the registry.
    #[error("schema index {index} out of range ({len} schemas registered)")]
    SchemaIndexOutOfRange { index: usize, len: usize },

    /// Extraction triggered without files.
    #[error("please select files to process")]
    NoFilesSelected,

    /// A selected file exceeds the configured size limit.
    #[error("file {name} is {size_bytes} bytes, limit is {limit_bytes} bytes")]
    FileTooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    /// Field type outside `text`, `number`, `date`.
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),
}

/// Errors related to running an extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The run was cancelled before the service answered.
    #[error("extraction cancelled")]
    Cancelled,

    /// The service did not answer within the configured timeout.
    #[error("extraction timed out after {0}s")]
    Timeout(u64),

    /// The extraction service reported a failure.
    #[error("extraction service failed: {0}")]
    Service(String),

    /// The service returned a different number of results than files.
    #[error("expected {expected} results, service returned {actual}")]
    ResultCountMismatch { expected: usize, actual: usize },

    /// A result carries a key that is not part of the requested schema.
    #[error("result for {file} contains field {field} not in the schema")]
    ForeignField { file: String, field: String },
}

/// Errors related to result export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writer produced invalid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Writer could not be flushed.
    #[error("CSV writer error: {0}")]
    Writer(String),

    /// Selected record does not exist.
    #[error("record index {index} out of range ({len} results)")]
    RecordOutOfRange { index: usize, len: usize },
}

/// Result type for the docex library.
pub type Result<T> = std::result::Result<T, DocexError>;
