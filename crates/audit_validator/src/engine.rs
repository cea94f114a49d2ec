//! Main audit pipeline.
//!
//! This module provides the `AuditPipeline` that runs the six quality stages
//! in order against one table and merges their reports.

use crate::{
    BusinessRuleValidator, DiscardSink, FindingSink, FullDuplicateChecker, KeyDuplicateChecker,
    NullChecker, QualityScorer, QualityStage, SchemaValidator,
};
use audit_core::{AuditConfig, AuditReport, AuditStats, Table};
use audit_loader::{LoadError, load_table};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// Sequential data quality audit.
///
/// Stages run strictly in order and each sees the same immutable table and
/// configuration. A failing stage never stops the ones after it.
///
/// # Example
///
/// ```rust
/// use audit_core::{AuditConfig, CellValue, Table, Verdict};
/// use audit_validator::AuditPipeline;
///
/// let table = Table::from_rows(
///     vec!["Story_ID".into(), "Est_Hours".into()],
///     vec![
///         vec!["S1-01".into(), CellValue::Float(4.0)],
///         vec!["S1-01".into(), CellValue::Float(250.0)],
///     ],
/// )
/// .unwrap();
///
/// let pipeline = AuditPipeline::new(AuditConfig::default());
/// let report = pipeline.run(&table);
///
/// assert_eq!(report.stage("key_duplicates").unwrap().verdict, Verdict::Failed);
/// for finding in report.findings() {
///     println!("{finding}");
/// }
/// ```
pub struct AuditPipeline {
    config: AuditConfig,
    stages: Vec<Box<dyn QualityStage>>,
}

impl AuditPipeline {
    /// Creates a pipeline with the six standard stages.
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            stages: vec![
                Box::new(SchemaValidator::new()),
                Box::new(NullChecker::new()),
                Box::new(FullDuplicateChecker::new()),
                Box::new(KeyDuplicateChecker::new()),
                Box::new(BusinessRuleValidator::new()),
                Box::new(QualityScorer::new()),
            ],
        }
    }

    /// The configuration every stage receives.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Stage names, in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage against the table.
    pub fn run(&self, table: &Table) -> AuditReport {
        self.run_with_sink(table, &mut DiscardSink)
    }

    /// Runs every stage, handing each stage's findings to `sink` as soon as
    /// the stage completes.
    pub fn run_with_sink(&self, table: &Table, sink: &mut dyn FindingSink) -> AuditReport {
        let start = Instant::now();
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Starting data quality audit"
        );

        let mut stages = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            debug!(stage = stage.name(), "Running stage");
            sink.stage_started(stage.name());

            let report = stage.run(table, &self.config);
            for finding in &report.findings {
                sink.record(finding);
            }
            sink.stage_finished(&report);

            debug!(
                stage = stage.name(),
                verdict = %report.verdict,
                issues = report.issues,
                "Stage finished"
            );
            stages.push(report);
        }

        let report = AuditReport {
            source: None,
            stages,
            stats: AuditStats {
                rows: table.row_count(),
                columns: table.column_count(),
                duration_ms: start.elapsed().as_millis() as u64,
                generated_at: Utc::now(),
            },
        };

        info!(
            failed_stages = report.failed_stages(),
            duration_ms = report.stats.duration_ms,
            "Audit completed"
        );
        report
    }

    /// Loads a delimited file and audits it.
    ///
    /// # Errors
    ///
    /// Returns the `LoadError` if the file cannot be loaded. No stage runs in
    /// that case.
    pub fn run_file(
        &self,
        path: &Path,
        delimiter: u8,
        sink: &mut dyn FindingSink,
    ) -> Result<AuditReport, LoadError> {
        let table = load_table(path, delimiter).inspect_err(|err| {
            error!(
                critical = true,
                kind = %err.kind(),
                path = %path.display(),
                "Cannot load data: {err}"
            );
        })?;

        let mut report = self.run_with_sink(&table, sink);
        report.source = Some(path.display().to_string());
        Ok(report)
    }
}

impl Default for AuditPipeline {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::{CellValue, Finding, Verdict};
    use audit_loader::LoadErrorKind;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        Table::from_rows(
            vec!["Story_ID".into(), "Est_Hours".into()],
            vec![
                vec!["S1".into(), CellValue::Float(3.0)],
                vec!["S2".into(), CellValue::Float(5.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_stage_order() {
        let pipeline = AuditPipeline::default();

        assert_eq!(
            pipeline.stage_names(),
            vec![
                "schema",
                "nulls",
                "full_duplicates",
                "key_duplicates",
                "business_rules",
                "quality_score",
            ]
        );
    }

    #[test]
    fn test_report_follows_stage_order() {
        let pipeline = AuditPipeline::default();

        let report = pipeline.run(&table());

        let stages: Vec<_> = report.stages.iter().map(|s| s.stage.as_str()).collect();
        assert_eq!(stages, pipeline.stage_names());
        assert_eq!(report.stats.rows, 2);
        assert_eq!(report.stats.columns, 2);
        assert_eq!(report.stage("quality_score").unwrap().verdict, Verdict::Completed);
    }

    #[test]
    fn test_sink_sees_every_finding_in_order() {
        let pipeline = AuditPipeline::default();
        let mut sink: Vec<Finding> = Vec::new();

        let report = pipeline.run_with_sink(&table(), &mut sink);

        let expected: Vec<Finding> = report.findings().cloned().collect();
        assert_eq!(sink, expected);
    }

    #[test]
    fn test_failing_stage_does_not_stop_pipeline() {
        // Schema fails (nine expected columns missing), later stages still run.
        let report = AuditPipeline::default().run(&table());

        assert_eq!(report.stage("schema").unwrap().verdict, Verdict::Failed);
        assert_eq!(report.stages.len(), 6);
        assert!(report.score().is_some());
    }

    #[test]
    fn test_run_file_missing_runs_no_stage() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink: Vec<Finding> = Vec::new();

        let err = AuditPipeline::default()
            .run_file(&dir.path().join("missing.csv"), b',', &mut sink)
            .unwrap_err();

        assert_eq!(err.kind(), LoadErrorKind::NotFound);
        assert!(sink.is_empty());
    }
}
