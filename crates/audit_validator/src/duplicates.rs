//! Duplicate detection, on whole rows and on the primary key.
//!
//! Both checkers group rows with a stable sort over an explicit row
//! comparator, so equal rows end up adjacent and keep their original order.
//! Nulls compare equal to each other.

use crate::{QualityStage, Violation};
use audit_core::{AuditConfig, CellValue, Severity, StageReport, Table};
use std::cmp::Reverse;

/// Groups of two or more rows that are equal on `columns`.
///
/// Groups come out in sorted-key order; indices inside a group are ascending.
pub fn duplicate_groups(table: &Table, columns: &[usize]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..table.row_count()).collect();
    order.sort_by(|&a, &b| table.compare_rows_on(a, b, columns));

    order
        .chunk_by(|&a, &b| table.compare_rows_on(a, b, columns).is_eq())
        .filter(|group| group.len() > 1)
        .map(<[usize]>::to_vec)
        .collect()
}

fn all_columns(table: &Table) -> Vec<usize> {
    (0..table.column_count()).collect()
}

/// Every row that has at least one identical sibling, sorted by all columns.
pub fn full_duplicate_rows(table: &Table) -> Vec<usize> {
    duplicate_groups(table, &all_columns(table))
        .into_iter()
        .flatten()
        .collect()
}

/// Number of rows that repeat an earlier identical row.
///
/// The first occurrence of each distinct row is not counted.
pub fn repeated_row_count(table: &Table) -> usize {
    duplicate_groups(table, &all_columns(table))
        .iter()
        .map(|group| group.len() - 1)
        .sum()
}

/// Reports rows identical to another row in every column.
pub struct FullDuplicateChecker;

impl FullDuplicateChecker {
    /// Creates a new full-row duplicate checker.
    pub fn new() -> Self {
        Self
    }
}

impl Default for FullDuplicateChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityStage for FullDuplicateChecker {
    fn name(&self) -> &'static str {
        "full_duplicates"
    }

    fn run(&self, table: &Table, _config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());
        let rows = full_duplicate_rows(table);

        if rows.is_empty() {
            report.record(Severity::Info, "No full row duplicates found");
            return report;
        }

        let message = format!(
            "Found {} duplicate rows (all occurrences):\n{}",
            rows.len(),
            table.render_rows(&rows)
        );
        report.add_issues(rows.len());
        report.record_rows(Severity::Warning, message, rows);
        report
    }
}

/// Reports rows sharing a primary key value.
pub struct KeyDuplicateChecker;

impl KeyDuplicateChecker {
    /// Creates a new primary key duplicate checker.
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyDuplicateChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityStage for KeyDuplicateChecker {
    fn name(&self) -> &'static str {
        "key_duplicates"
    }

    fn run(&self, table: &Table, config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());
        let key = config.primary_key.as_str();

        let Some(key_index) = table.column_index(key) else {
            report.record(
                Severity::Warning,
                format!("Column '{key}' not found. Skipping this check."),
            );
            report.skip();
            return report;
        };

        let mut groups = duplicate_groups(table, &[key_index]);
        if groups.is_empty() {
            report.record(Severity::Info, format!("All {key} values are unique"));
            return report;
        }

        let mut rows: Vec<usize> = groups.iter().flatten().copied().collect();
        rows.sort_unstable();
        report.add_issues(rows.len());
        report.record_rows(
            Severity::Critical,
            format!("Found {} rows with duplicate {key} values", rows.len()),
            rows.clone(),
        );

        // Most repeated first, ties by first appearance.
        groups.sort_by_key(|group| (Reverse(group.len()), group[0]));
        for group in &groups {
            let violation = Violation::DuplicateKey {
                key: table.value(group[0], key).cloned().unwrap_or(CellValue::Null),
                count: group.len(),
            };
            report.record_rows(Severity::Critical, violation.to_string(), group.clone());
        }

        report.record_rows(
            Severity::Critical,
            format!("Rows with duplicate {key} values:\n{}", table.render_rows(&rows)),
            rows,
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::{ConfigBuilder, Verdict};
    use pretty_assertions::assert_eq;

    fn table(rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(vec!["Story_ID".into(), "Est_Hours".into()], rows).unwrap()
    }

    fn row(id: &str, hours: f64) -> Vec<CellValue> {
        vec![id.into(), CellValue::Float(hours)]
    }

    #[test]
    fn test_groups_keep_index_order() {
        let table = table(vec![
            row("B", 1.0),
            row("A", 1.0),
            row("B", 1.0),
            row("A", 1.0),
            row("C", 1.0),
        ]);

        assert_eq!(duplicate_groups(&table, &[0, 1]), vec![vec![1, 3], vec![0, 2]]);
    }

    #[test]
    fn test_full_duplicates_are_symmetric() {
        let table = table(vec![row("S1", 2.0), row("S2", 3.0), row("S1", 2.0)]);

        let report = FullDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.verdict, Verdict::Failed);
        assert_eq!(report.issues, 2);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Warning);
        assert_eq!(report.findings[0].rows, vec![0, 2]);
        assert!(
            report.findings[0]
                .message
                .starts_with("Found 2 duplicate rows (all occurrences):\n")
        );
    }

    #[test]
    fn test_repeated_row_count_excludes_first_occurrence() {
        let table = table(vec![
            row("S1", 2.0),
            row("S1", 2.0),
            row("S1", 2.0),
            row("S2", 3.0),
            row("S2", 3.0),
        ]);

        assert_eq!(full_duplicate_rows(&table).len(), 5);
        assert_eq!(repeated_row_count(&table), 3);
    }

    #[test]
    fn test_nulls_compare_equal() {
        let table = table(vec![
            vec![CellValue::Null, CellValue::Null],
            vec![CellValue::Null, CellValue::Null],
        ]);

        assert_eq!(full_duplicate_rows(&table), vec![0, 1]);
    }

    #[test]
    fn test_no_full_duplicates() {
        let table = table(vec![row("S1", 2.0), row("S1", 2.5)]);

        let report = FullDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.verdict, Verdict::Passed);
        assert_eq!(report.findings[0].message, "No full row duplicates found");
    }

    #[test]
    fn test_duplicate_keys() {
        let table = table(vec![
            row("S1", 1.0),
            row("S2", 2.0),
            row("S2", 3.0),
            row("S1", 4.0),
            row("S3", 5.0),
            row("S2", 6.0),
        ]);

        let report = KeyDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.verdict, Verdict::Failed);
        assert_eq!(report.issues, 5);
        assert!(report.findings.iter().all(|f| f.severity == Severity::Critical));

        let messages: Vec<_> = report.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages[0], "Found 5 rows with duplicate Story_ID values");
        assert_eq!(messages[1], "'S2' appears 3 times");
        assert_eq!(messages[2], "'S1' appears 2 times");
        assert!(messages[3].starts_with("Rows with duplicate Story_ID values:\n"));
        assert_eq!(report.findings[1].rows, vec![1, 2, 5]);
        assert_eq!(report.findings[2].rows, vec![0, 3]);
    }

    #[test]
    fn test_duplicate_key_rows_in_table_order() {
        let table = table(vec![
            row("S2", 1.0),
            row("S1", 2.0),
            row("S2", 3.0),
            row("S1", 4.0),
        ]);

        let report = KeyDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.findings[0].rows, vec![0, 1, 2, 3]);
        assert_eq!(report.findings[3].rows, vec![0, 1, 2, 3]);
        let rendered: Vec<&str> = report.findings[3]
            .message
            .lines()
            .filter(|line| line.contains("S1") || line.contains("S2"))
            .collect();
        assert_eq!(rendered.len(), 4);
        assert!(rendered[0].contains("S2"));
        assert!(rendered[1].contains("S1"));
        assert!(rendered[2].contains("S2"));
        assert!(rendered[3].contains("S1"));
    }

    #[test]
    fn test_ties_ordered_by_first_appearance() {
        let table = table(vec![
            row("S9", 1.0),
            row("S1", 1.0),
            row("S9", 2.0),
            row("S1", 2.0),
        ]);

        let report = KeyDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.findings[1].message, "'S9' appears 2 times");
        assert_eq!(report.findings[2].message, "'S1' appears 2 times");
    }

    #[test]
    fn test_unique_keys_pass() {
        let table = table(vec![row("S1", 1.0), row("S2", 1.0)]);

        let report = KeyDuplicateChecker::new().run(&table, &AuditConfig::default());

        assert_eq!(report.verdict, Verdict::Passed);
        assert_eq!(report.findings[0].message, "All Story_ID values are unique");
    }

    #[test]
    fn test_missing_key_column_skips() {
        let config = ConfigBuilder::new("Ticket").build();
        let table = table(vec![row("S1", 1.0), row("S1", 1.0)]);

        let report = KeyDuplicateChecker::new().run(&table, &config);

        assert_eq!(report.verdict, Verdict::Skipped);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Warning);
        assert_eq!(
            report.findings[0].message,
            "Column 'Ticket' not found. Skipping this check."
        );
    }
}
