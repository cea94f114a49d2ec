//! Error types for the audit data model.
//!
//! Validation findings are never errors. The types here cover malformed
//! tables, invalid configurations and report serialization.

use thiserror::Error;

/// Result type for audit core operations.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Main error type for audit core operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A row does not have one cell per column
    #[error("Row {row} has {actual} cells but the table has {expected} columns")]
    RowWidth {
        /// Index of the offending row
        row: usize,
        /// Number of columns in the table
        expected: usize,
        /// Number of cells in the row
        actual: usize,
    },

    /// Column declared twice (table header or expected schema)
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Expected schema is empty
    #[error("Expected schema has no columns defined")]
    EmptySchema,

    /// Primary key column name is blank
    #[error("Primary key column name is empty")]
    EmptyPrimaryKey,

    /// Numeric bound with min above max
    #[error("Invalid bound for column '{column}': minimum {min} exceeds maximum {max}")]
    InvalidBound {
        /// Bounded column
        column: String,
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// Allow-list without any values
    #[error("Allow-list for column '{0}' is empty")]
    EmptyAllowList(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuditError {
    /// Creates a new invalid bound error.
    pub fn invalid_bound(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self::InvalidBound {
            column: column.into(),
            min,
            max,
        }
    }

    /// Creates a new row width error.
    pub fn row_width(row: usize, expected: usize, actual: usize) -> Self {
        Self::RowWidth {
            row,
            expected,
            actual,
        }
    }
}
