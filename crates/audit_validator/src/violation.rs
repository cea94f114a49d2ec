//! Violation types reported by the validation stages.
//!
//! Violations are never propagated as errors: stages render them into
//! findings. Keeping them as a typed enum gives every stage the same wording.

use audit_core::{CellValue, ColumnType};
use thiserror::Error;

/// A single data quality violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Expected columns absent from the table
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Column classified differently than expected
    #[error("'{column}' -> expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    /// Column contains nulls
    #[error("'{column}': {count} NULLs ({percent:.1}% of rows)")]
    Nulls {
        column: String,
        count: usize,
        percent: f64,
    },

    /// Numeric value outside the configured bound
    #[error("Row {row}: {key_column} '{key}' has {column} = {value}")]
    OutOfRange {
        row: usize,
        key_column: String,
        key: String,
        column: String,
        value: CellValue,
    },

    /// Value not in the allow-list
    #[error("Row {row}: {key_column} '{key}' has {column} = '{value}'")]
    NotAllowed {
        row: usize,
        key_column: String,
        key: String,
        column: String,
        value: CellValue,
    },

    /// Primary key value shared by several rows
    #[error("'{key}' appears {count} times")]
    DuplicateKey { key: CellValue, count: usize },
}

impl Violation {
    /// Creates a new type mismatch violation.
    pub fn type_mismatch(column: impl Into<String>, expected: ColumnType, actual: ColumnType) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }
}
