//! Loading collaborators for the data quality audit.
//!
//! Two inputs reach the pipeline from disk:
//!
//! - the dataset, a delimited text file turned into an [`audit_core::Table`]
//! - an optional rule file (YAML/TOML) overriding the default [`audit_core::AuditConfig`]
//!
//! # Example
//!
//! ```rust
//! use audit_loader::{read_table, LoadErrorKind, DEFAULT_DELIMITER};
//!
//! let csv = "Story_ID,Est_Hours\nS1-01,4\nS1-02,6.5\n";
//! let table = read_table(csv.as_bytes(), DEFAULT_DELIMITER).unwrap();
//! assert_eq!(table.row_count(), 2);
//!
//! let err = read_table("".as_bytes(), DEFAULT_DELIMITER).unwrap_err();
//! assert_eq!(err.kind(), LoadErrorKind::Empty);
//! ```

mod config;
mod error;
mod table;

pub use config::*;
pub use error::*;
pub use table::*;
