//! # Data Quality Audit Validator
//!
//! Validation stages and the pipeline that runs them. Six stages execute in
//! order against the same table:
//!
//! 1. Schema validation (column presence and type)
//! 2. Null detection
//! 3. Full-row duplicate detection
//! 4. Primary key duplicate detection
//! 5. Business rules (numeric range, allowed values)
//! 6. Quality scoring
//!
//! ## Example
//!
//! ```rust,no_run
//! use audit_core::AuditConfig;
//! use audit_validator::{AuditPipeline, TracingSink};
//! use std::path::Path;
//!
//! let pipeline = AuditPipeline::new(AuditConfig::default());
//!
//! match pipeline.run_file(Path::new("sprint_backlog.csv"), b',', &mut TracingSink) {
//!     Ok(report) => {
//!         if let Some(score) = report.score() {
//!             println!("Score: {:.1} ({})", score.score, score.rating);
//!         }
//!     }
//!     Err(err) => eprintln!("{} ({})", err, err.kind()),
//! }
//! ```

mod duplicates;
mod engine;
mod nulls;
mod rules;
mod schema;
mod scoring;
mod sink;
mod stage;
mod violation;

pub use duplicates::*;
pub use engine::*;
pub use nulls::*;
pub use rules::*;
pub use schema::*;
pub use scoring::*;
pub use sink::*;
pub use stage::*;
pub use violation::*;
