//! Destinations for findings as stages complete.

use audit_core::{Finding, Severity, StageReport, Verdict};
use tracing::{debug, error, info, warn};

/// Receives findings in emission order while the pipeline runs.
pub trait FindingSink {
    /// Called before a stage runs.
    fn stage_started(&mut self, _stage: &str) {}

    /// Called once per finding, in order.
    fn record(&mut self, finding: &Finding);

    /// Called after all findings of a stage have been recorded.
    fn stage_finished(&mut self, _report: &StageReport) {}
}

/// Collects findings in memory.
impl FindingSink for Vec<Finding> {
    fn record(&mut self, finding: &Finding) {
        self.push(finding.clone());
    }
}

/// Drops every finding.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl FindingSink for DiscardSink {
    fn record(&mut self, _finding: &Finding) {}
}

/// Emits findings as `tracing` events.
///
/// Severity maps onto the event level; critical findings are logged at
/// `ERROR` with a `critical = true` field. The subscriber supplies the
/// timestamp and output format.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FindingSink for TracingSink {
    fn stage_started(&mut self, stage: &str) {
        info!(stage, "Running stage");
    }

    fn record(&mut self, finding: &Finding) {
        let stage = finding.stage.as_str();
        let message = finding.message.as_str();
        match finding.severity {
            Severity::Debug => debug!(stage, rows = ?finding.rows, "{message}"),
            Severity::Info => info!(stage, "{message}"),
            Severity::Warning => warn!(stage, "{message}"),
            Severity::Error => error!(stage, "{message}"),
            Severity::Critical => error!(stage, critical = true, "{message}"),
        }
    }

    fn stage_finished(&mut self, report: &StageReport) {
        let stage = report.stage.as_str();
        match report.verdict {
            Verdict::Failed => warn!(stage, issues = report.issues, "Result: FAILED"),
            verdict => info!(stage, %verdict, "Result: {verdict}"),
        }
    }
}
