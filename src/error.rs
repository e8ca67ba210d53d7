//! Error types for dataset analysis

use thiserror::Error;

/// Main error type for dataset analysis
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset is structurally unusable for the requested operation
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    /// Series lengths disagree with the shared label axis
    ///
    /// Reports which series broke the alignment and by how much, for
    /// debugging ragged dataset files.
    #[error("Shape mismatch in series '{identifier}': expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Identifier of the offending series
        identifier: String,
        /// Expected number of values (length of the first series)
        expected: usize,
        /// Actual number of values in the offending series
        actual: usize,
    },

    /// Reduction attempted over an undefined domain
    #[error("Empty reduction: {0}")]
    EmptyReduction(String),

    /// Quantile probability outside [0, 1]
    #[error("Invalid quantile probability: {0}")]
    InvalidQuantile(f64),

    /// Format catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Dataset source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Format catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Catalog contains no patterns
    #[error("Catalog is empty")]
    Empty,

    /// Pattern is not a valid date format
    #[error("Invalid pattern '{0}'")]
    InvalidPattern(String),
}

/// Dataset source errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file could not be deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path is neither a dataset file nor a directory of them
    #[error("Not a dataset path: {0}")]
    NotADataset(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
