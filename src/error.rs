//! Error types for the payment file encoder.

use crate::validate::Violation;
use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, FileError>;

/// Errors that can occur while building or serializing a payment file.
///
/// Validation problems are reported as plain data by the validator; they only
/// become a `FileError` once a caller asks for a file to be produced from
/// records that did not pass.
#[derive(Error, Debug)]
pub enum FileError {
    /// Failed to open, read or write a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in the payment input
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A character has no Windows-1252 representation
    #[error("Field '{field}' contains {ch:?}, which cannot be encoded as Windows-1252")]
    Encoding { field: String, ch: char },

    /// A structurally required value had the wrong kind
    #[error("Invalid value for '{field}' at row {row}: {message}")]
    Construction {
        row: usize,
        field: &'static str,
        message: String,
    },

    /// A payment failed validation; `index` is 1-based file order
    #[error("Payment {index} is invalid: {}", format_violations(.violations))]
    InvalidPayment {
        index: usize,
        violations: Vec<Violation>,
    },

    /// The summed amount of a file does not fit the end record's amount field
    #[error("Total amount {total} of {count} payments does not fit the 13-digit amount field")]
    TotalOutOfRange { count: usize, total: i128 },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: bank-payment-file <payments.csv> [YYYY-MM-DD]")]
    MissingArgument,

    /// Unparseable command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
