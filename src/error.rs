//! Error types for inference and dataset ingestion.

use std::path::PathBuf;

/// Errors from the inference core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BayesError {
    /// Returned when a feature name is not a column of the dataset.
    #[error("unknown feature \"{feature}\"")]
    UnknownFeature {
        /// The name that was looked up.
        feature: String,
    },

    /// Returned when a target value never occurs in the training rows.
    #[error("target \"{target}\" never takes the value \"{value}\"")]
    UnknownTargetValue {
        /// The target feature.
        target: String,
        /// The value that was never observed.
        value: String,
    },

    /// Returned when an observation does not cover exactly the non-target columns.
    #[error("observation has {got} features, expected {expected}")]
    InvalidObservation {
        /// Number of non-target columns in the dataset.
        expected: usize,
        /// Number of entries in the observation.
        got: usize,
    },

    /// Returned when an observation of the right size lacks a non-target column.
    #[error("observation is missing feature \"{feature}\"")]
    MissingObservedFeature {
        /// The non-target column that has no observed value.
        feature: String,
    },

    /// Returned when the target feature is also used as the conditioned feature.
    #[error("feature \"{feature}\" is the target and cannot be conditioned on itself")]
    TargetAsFeature {
        /// The offending feature.
        feature: String,
    },

    /// Returned when a correlation table is used with a target it was not built for.
    #[error("correlation table was built for target \"{built_for}\", not \"{requested}\"")]
    CorrelationTargetMismatch {
        /// Target the table was built for.
        built_for: String,
        /// Target passed to the estimator.
        requested: String,
    },

    /// Returned when a header name appears twice.
    #[error("duplicate feature name \"{name}\"")]
    DuplicateFeature {
        /// The repeated name.
        name: String,
    },

    /// Returned when a row has a different width than the header.
    #[error("row {row_index} has {got} values, expected {expected}")]
    RowLength {
        /// Zero-based index of the offending row.
        row_index: usize,
        /// Number of headers.
        expected: usize,
        /// Number of values in the row.
        got: usize,
    },
}

/// Errors from reading a delimited dataset file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the records do not form a valid dataset.
    #[error("invalid dataset in {path}")]
    InvalidDataset {
        /// Path to the file.
        path: PathBuf,
        /// Underlying dataset error (duplicate header or ragged row).
        source: BayesError,
    },
}
