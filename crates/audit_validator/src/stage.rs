//! The stage abstraction shared by validators and the scorer.

use audit_core::{AuditConfig, StageReport, Table};

/// One independent step of the audit pipeline.
///
/// A stage reads the table and the configuration and returns its findings.
/// It never mutates the table and never looks at other stages' results, so
/// stages can be tested in isolation with synthetic configurations.
///
/// # Example
///
/// ```rust
/// use audit_core::{AuditConfig, Severity, StageReport, Table};
/// use audit_validator::QualityStage;
///
/// struct RowCount;
///
/// impl QualityStage for RowCount {
///     fn name(&self) -> &'static str {
///         "row_count"
///     }
///
///     fn run(&self, table: &Table, _config: &AuditConfig) -> StageReport {
///         let mut report = StageReport::new(self.name());
///         report.record(Severity::Info, format!("{} rows", table.row_count()));
///         report
///     }
/// }
/// ```
pub trait QualityStage: Send + Sync {
    /// Stable stage name used in findings and reports.
    fn name(&self) -> &'static str;

    /// Runs the stage against a table.
    fn run(&self, table: &Table, config: &AuditConfig) -> StageReport;
}
