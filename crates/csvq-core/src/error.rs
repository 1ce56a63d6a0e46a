//! Error types for loading, filtering and aggregating tables.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a query over a table.
#[derive(Debug, Error)]
pub enum QueryError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("File '{}' not found", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be opened or read.
    #[error("Cannot read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed delimited text (bad quoting, invalid UTF-8, ...).
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    // === Filter Errors ===
    /// Condition string contains no recognized operator.
    #[error("Invalid condition format: {condition}")]
    InvalidCondition { condition: String },

    /// Column is not part of the table.
    #[error("Unknown column: {column}")]
    UnknownColumn { column: String },

    /// Operator symbol outside the supported set.
    #[error("Unsupported operator: {operator}")]
    UnsupportedOperator { operator: String },

    /// Ordering comparison between a number and text.
    #[error("Cannot compare {left} with {right} using '{operator}' in column {column}")]
    TypeMismatch {
        column: String,
        operator: &'static str,
        left: &'static str,
        right: &'static str,
    },

    // === Aggregation Errors ===
    /// A cell in the aggregated column is not a number.
    #[error("Cannot aggregate non-numeric column: {column}")]
    NonNumericColumn { column: String },

    /// Aggregate operation name outside the supported set.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Aggregation over zero rows.
    #[error("Cannot aggregate column {column} over an empty row set")]
    EmptyInput { column: String },

    /// Aggregate argument is not of the form `column=operation`.
    #[error("Invalid aggregate format: {spec} (expected column=operation)")]
    InvalidAggregateSpec { spec: String },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
