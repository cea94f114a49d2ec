//! # Data Quality Audit Core
//!
//! Core data structures for the data quality audit pipeline.
//!
//! This crate provides the building blocks shared by the loader, the validation
//! stages and the CLI:
//!
//! - **Table**: an in-memory dataset of named columns and typed cells
//! - **AuditConfig**: the fixed rule set (expected schema, allow-lists, numeric bound)
//! - **Finding**: a single observation emitted by a stage
//! - **AuditReport**: the ordered stage reports of one pipeline run
//!
//! ## Example
//!
//! ```rust
//! use audit_core::{AuditConfig, CellValue, ColumnType, Table};
//!
//! let mut table = Table::new(vec!["Story_ID".to_string(), "Est_Hours".to_string()]);
//! table
//!     .push_row(vec![CellValue::from("S1-01"), CellValue::Float(4.0)])
//!     .unwrap();
//!
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.column_type("Est_Hours"), Some(ColumnType::Float));
//!
//! let config = AuditConfig::default();
//! assert_eq!(config.primary_key, "Story_ID");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod report;
pub mod table;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use report::*;
pub use table::*;
