use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the post analytics tools.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An input file is valid JSON but its top-level value is not an array.
    #[error("Expected a top-level JSON array in {path}")]
    NotAnArray { path: PathBuf },

    /// A post record is missing a required field, has a field of the wrong
    /// shape, or carries an unparsable timestamp.
    #[error("Malformed record #{index} in {path}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    /// A timestamp string did not match the expected format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The document store could not be reached.
    #[error("Could not connect to document store: {0}")]
    Connection(String),

    /// The document store rejected or failed an operation.
    #[error("Document store error: {0}")]
    Store(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the analytics crates.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
