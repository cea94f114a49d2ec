//! Schema validation logic.
//!
//! Checks that every expected column is present and that its runtime
//! classification matches the configured type. Extra columns are allowed.

use crate::{QualityStage, Violation};
use audit_core::{AuditConfig, Severity, StageReport, Table};

/// Validates the column set and column types of a table.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityStage for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn run(&self, table: &Table, config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());

        let (present, missing): (Vec<_>, Vec<_>) = config
            .expected_schema
            .iter()
            .partition(|spec| table.has_column(&spec.name));

        if missing.is_empty() {
            report.record(Severity::Info, "All expected columns are present");
        } else {
            let names: Vec<String> = missing.iter().map(|spec| spec.name.clone()).collect();
            report.record(Severity::Error, Violation::MissingColumns(names).to_string());
            report.add_issues(missing.len());
        }

        for spec in present {
            let Some(actual) = table.column_type(&spec.name) else {
                continue;
            };

            if actual == spec.expected {
                report.record(Severity::Info, format!("'{}' -> {} (correct)", spec.name, actual));
            } else {
                let violation = Violation::type_mismatch(&spec.name, spec.expected, actual);
                report.record(Severity::Warning, violation.to_string());
                report.add_issues(1);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::{CellValue, ConfigBuilder, Verdict};
    use pretty_assertions::assert_eq;

    fn config() -> AuditConfig {
        ConfigBuilder::new("Story_ID")
            .text_column("Story_ID")
            .float_column("Est_Hours")
            .text_column("Phase")
            .build()
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_matching_schema() {
        let table = table(
            &["Story_ID", "Est_Hours", "Phase", "Extra"],
            vec![vec!["S1".into(), CellValue::Float(4.0), "Foundation".into(), CellValue::Null]],
        );

        let report = SchemaValidator::new().run(&table, &config());

        assert_eq!(report.verdict, Verdict::Passed);
        assert_eq!(report.issues, 0);
        assert!(report.findings.iter().all(|f| f.severity == Severity::Info));
        assert_eq!(report.findings[1].message, "'Story_ID' -> text (correct)");
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let table = table(&["Story_ID"], vec![vec!["S1".into()]]);

        let report = SchemaValidator::new().run(&table, &config());

        let errors: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Missing columns: Est_Hours, Phase");
        assert_eq!(report.issues, 2);
        assert_eq!(report.verdict, Verdict::Failed);
    }

    #[test]
    fn test_type_mismatch() {
        let table = table(
            &["Story_ID", "Est_Hours", "Phase"],
            vec![
                vec!["S1".into(), CellValue::Float(4.0), "Foundation".into()],
                vec!["S2".into(), "four".into(), "Foundation".into()],
            ],
        );

        let report = SchemaValidator::new().run(&table, &config());

        assert_eq!(report.issues, 1);
        let warning = report
            .findings
            .iter()
            .find(|f| f.severity == Severity::Warning)
            .unwrap();
        assert_eq!(warning.message, "'Est_Hours' -> expected float, got text");
    }

    #[test]
    fn test_all_null_column_is_float() {
        let config = ConfigBuilder::new("Story_ID").text_column("Notes").build();
        let table = table(&["Notes"], vec![vec![CellValue::Null], vec![CellValue::Null]]);

        let report = SchemaValidator::new().run(&table, &config);

        assert_eq!(report.issues, 1);
        assert_eq!(report.findings[1].message, "'Notes' -> expected text, got float");
    }

    #[test]
    fn test_empty_table_uses_column_classification() {
        let table = table(&["Story_ID", "Est_Hours", "Phase"], vec![]);

        let report = SchemaValidator::new().run(&table, &config());

        // No cells: every column classifies as float.
        assert_eq!(report.issues, 2);
    }
}
