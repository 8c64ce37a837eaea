//! I/O error types for arbor-io.

use std::path::PathBuf;

/// Errors from reading attribute and example files and writing results.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the attribute file has no header line.
    #[error("no attribute names in {path}")]
    NoAttributes {
        /// Path to the attribute file.
        path: PathBuf,
    },

    /// Returned when an attribute name in the header is blank.
    #[error("attribute {position} in {path} has an empty name")]
    EmptyAttributeName {
        /// Path to the attribute file.
        path: PathBuf,
        /// Zero-based position of the blank name.
        position: usize,
    },

    /// Returned when the example file contains zero rows.
    #[error("empty dataset (no example rows) in {path}")]
    EmptyDataset {
        /// Path to the example file.
        path: PathBuf,
    },

    /// Returned when a row has a different number of values than there are attributes.
    #[error("inconsistent row length in {path} at line {line}: {got} values, expected {expected}")]
    InconsistentRowLength {
        /// Path to the example file.
        path: PathBuf,
        /// Zero-based index among example rows (blank lines not counted).
        row_index: usize,
        /// One-based line number in the file.
        line: u64,
        /// Expected number of values (attribute count).
        expected: usize,
        /// Actual number of values in this row.
        got: usize,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result artifact cannot be encoded as JSON.
    #[error("cannot encode {path} as JSON")]
    EncodeJson {
        /// Path of the artifact being written.
        path: PathBuf,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },
}
