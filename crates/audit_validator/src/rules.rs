//! Business rule validation.
//!
//! Two kinds of rules are checked:
//! - Range: the bounded column must lie within `[min, max]`
//! - Allowed values: each constrained column must hold one of its allow-listed values
//!
//! Every sub-check runs even if an earlier one failed. A sub-check whose
//! column is absent from the table is skipped.

use crate::{QualityStage, Violation};
use audit_core::{AuditConfig, EnumConstraint, NumericBound, Severity, StageReport, Table};

/// Placeholder used when the primary key cannot be read for a row.
pub const NO_KEY: &str = "<no key>";

/// Rows whose value breaks the bound, or `None` if the column is absent.
pub fn range_violations(table: &Table, bound: &NumericBound) -> Option<Vec<usize>> {
    let values = table.column_values(&bound.column)?;
    Some(
        values
            .enumerate()
            .filter(|(_, v)| bound.is_violated_by(v))
            .map(|(i, _)| i)
            .collect(),
    )
}

/// Rows whose value is not allow-listed, or `None` if the column is absent.
pub fn enum_violations(table: &Table, constraint: &EnumConstraint) -> Option<Vec<usize>> {
    let values = table.column_values(&constraint.column)?;
    Some(
        values
            .enumerate()
            .filter(|(_, v)| !constraint.allows(v))
            .map(|(i, _)| i)
            .collect(),
    )
}

/// Validates value ranges and allow-lists.
pub struct BusinessRuleValidator;

impl BusinessRuleValidator {
    /// Creates a new business rule validator.
    pub fn new() -> Self {
        Self
    }

    fn key_of(table: &Table, config: &AuditConfig, row: usize) -> String {
        table
            .value(row, &config.primary_key)
            .map(ToString::to_string)
            .unwrap_or_else(|| NO_KEY.to_string())
    }

    fn check_range(
        &self,
        table: &Table,
        config: &AuditConfig,
        bound: &NumericBound,
        report: &mut StageReport,
    ) {
        let Some(rows) = range_violations(table, bound) else {
            report.record(
                Severity::Debug,
                format!("Column '{}' not present, range check skipped", bound.column),
            );
            return;
        };

        if rows.is_empty() {
            report.record(
                Severity::Info,
                format!(
                    "All {} values are in valid range [{}, {}]",
                    bound.column, bound.min, bound.max
                ),
            );
            return;
        }

        report.add_issues(rows.len());
        report.record_rows(
            Severity::Warning,
            format!("Found {} rows with invalid {}", rows.len(), bound.column),
            rows.clone(),
        );

        for row in rows {
            let violation = Violation::OutOfRange {
                row,
                key_column: config.primary_key.clone(),
                key: Self::key_of(table, config, row),
                column: bound.column.clone(),
                value: table.value(row, &bound.column).cloned().unwrap_or_default(),
            };
            report.record_rows(Severity::Warning, violation.to_string(), vec![row]);
        }
    }

    fn check_allowed(
        &self,
        table: &Table,
        config: &AuditConfig,
        constraint: &EnumConstraint,
        report: &mut StageReport,
    ) {
        let Some(rows) = enum_violations(table, constraint) else {
            report.record(
                Severity::Debug,
                format!(
                    "Column '{}' not present, allowed values check skipped",
                    constraint.column
                ),
            );
            return;
        };

        if rows.is_empty() {
            report.record(
                Severity::Info,
                format!("All {} values are valid", constraint.column),
            );
            return;
        }

        report.add_issues(rows.len());
        report.record_rows(
            Severity::Warning,
            format!("Found {} rows with invalid {}", rows.len(), constraint.column),
            rows.clone(),
        );

        for row in rows {
            let violation = Violation::NotAllowed {
                row,
                key_column: config.primary_key.clone(),
                key: Self::key_of(table, config, row),
                column: constraint.column.clone(),
                value: table.value(row, &constraint.column).cloned().unwrap_or_default(),
            };
            report.record_rows(Severity::Warning, violation.to_string(), vec![row]);
        }
    }
}

impl Default for BusinessRuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityStage for BusinessRuleValidator {
    fn name(&self) -> &'static str {
        "business_rules"
    }

    fn run(&self, table: &Table, config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());

        if let Some(bound) = &config.numeric_bound {
            self.check_range(table, config, bound, &mut report);
        }

        for constraint in &config.allowed_values {
            self.check_allowed(table, config, constraint, &mut report);
        }

        report
    }
}
