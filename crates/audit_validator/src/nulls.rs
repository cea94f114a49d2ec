//! Missing-value detection.

use crate::{QualityStage, Violation};
use audit_core::{AuditConfig, Severity, StageReport, Table};

/// Counts null cells per column.
pub struct NullChecker;

impl NullChecker {
    /// Creates a new null checker.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentage of `count` over `total`, 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Indices of the rows holding a null in `column`, ascending.
pub fn null_rows(table: &Table, column: &str) -> Vec<usize> {
    table
        .column_values(column)
        .map(|values| {
            values
                .enumerate()
                .filter(|(_, v)| v.is_null())
                .map(|(i, _)| i)
                .collect()
        })
        .unwrap_or_default()
}

impl QualityStage for NullChecker {
    fn name(&self) -> &'static str {
        "nulls"
    }

    fn run(&self, table: &Table, _config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());

        if table.is_empty() {
            return report;
        }

        for column in table.columns() {
            let rows = null_rows(table, column);
            if rows.is_empty() {
                continue;
            }

            let violation = Violation::Nulls {
                column: column.clone(),
                count: rows.len(),
                percent: percentage(rows.len(), table.row_count()),
            };
            report.record(Severity::Warning, violation.to_string());
            report.record_rows(
                Severity::Debug,
                format!("'{column}' null rows: {rows:?}"),
                rows,
            );
            report.add_issues(1);
        }

        if !report.failed() {
            report.record(Severity::Info, "No NULL values found");
        }

        report
    }
}
