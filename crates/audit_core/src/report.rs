//! Findings and reports.
//!
//! Every stage returns a [`StageReport`] holding its verdict and the ordered
//! findings it produced. The pipeline collects them, in stage order, into an
//! [`AuditReport`]. Findings are append-only: nothing revises a finding once
//! it has been recorded.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Detail suppressed from the default report
    Debug,
    /// Informational
    Info,
    /// Soft data quality problem
    Warning,
    /// Structural problem
    Error,
    /// Integrity violation or fatal condition
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.pad(label)
    }
}

/// A single observation produced by a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// How serious the observation is
    pub severity: Severity,

    /// Name of the stage that produced it
    pub stage: String,

    /// Human-readable message
    pub message: String,

    /// Rows the finding refers to, by index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(severity: Severity, stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage: stage.into(),
            message: message.into(),
            rows: Vec::new(),
        }
    }

    /// Attaches row references.
    pub fn with_rows(mut self, rows: Vec<usize>) -> Self {
        self.rows = rows;
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.stage, self.message)
    }
}

/// Outcome of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No issues found
    Passed,
    /// At least one issue found
    Failed,
    /// Prerequisite column absent; the check did not run
    Skipped,
    /// Stage reports a measurement instead of pass/fail
    Completed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
            Self::Completed => "COMPLETED",
        };
        f.pad(label)
    }
}

/// Quality rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityRating {
    /// 90 and above
    Excellent,
    /// 70 to below 90
    Good,
    /// 50 to below 70
    Fair,
    /// Below 50
    Poor,
}

impl QualityRating {
    /// Maps a score to its band.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::Excellent,
            s if s >= 70.0 => Self::Good,
            s if s >= 50.0 => Self::Fair,
            _ => Self::Poor,
        }
    }

    /// Short guidance attached to the band.
    pub fn remark(&self) -> Option<&'static str> {
        match self {
            Self::Excellent | Self::Good => None,
            Self::Fair => Some("needs work"),
            Self::Poor => Some("critical issues"),
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
        };
        match self.remark() {
            Some(remark) => write!(f, "{label} ({remark})"),
            None => write!(f, "{label}"),
        }
    }
}

/// Points removed from the score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    /// Category label (e.g. "NULLs", "Invalid Phase")
    pub category: String,
    /// Points deducted
    pub points: f64,
}

/// Composite quality score of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Score in `[0, 100]`
    pub score: f64,
    /// Band of the score
    pub rating: QualityRating,
    /// Every deduction that was computed, including zero ones
    pub deductions: Vec<Deduction>,
}

impl QualityScore {
    /// Deductions that actually removed points.
    pub fn positive_deductions(&self) -> impl Iterator<Item = &Deduction> {
        self.deductions.iter().filter(|d| d.points > 0.0)
    }
}

/// Result of one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage name
    pub stage: String,

    /// Outcome
    pub verdict: Verdict,

    /// Number of issues counted toward the verdict
    pub issues: usize,

    /// Findings, in emission order
    pub findings: Vec<Finding>,

    /// Score, for scoring stages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<QualityScore>,
}

impl StageReport {
    /// Creates an empty, passing report for a stage.
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            verdict: Verdict::Passed,
            issues: 0,
            findings: Vec::new(),
            score: None,
        }
    }

    /// Records a finding attributed to this stage.
    pub fn record(&mut self, severity: Severity, message: impl Into<String>) -> &mut Finding {
        self.push(Finding::new(severity, self.stage.clone(), message))
    }

    /// Records a finding that refers to specific rows.
    pub fn record_rows(&mut self, severity: Severity, message: impl Into<String>, rows: Vec<usize>) {
        self.push(Finding::new(severity, self.stage.clone(), message).with_rows(rows));
    }

    fn push(&mut self, finding: Finding) -> &mut Finding {
        self.findings.push(finding);
        let last = self.findings.len() - 1;
        &mut self.findings[last]
    }

    /// Counts issues; any issue turns the verdict to `Failed`.
    pub fn add_issues(&mut self, count: usize) {
        self.issues += count;
        if self.issues > 0 && self.verdict == Verdict::Passed {
            self.verdict = Verdict::Failed;
        }
    }

    /// Marks the stage as skipped.
    pub fn skip(&mut self) {
        self.verdict = Verdict::Skipped;
    }

    /// Attaches a score and marks the stage as completed.
    pub fn complete(&mut self, score: QualityScore) {
        self.verdict = Verdict::Completed;
        self.score = Some(score);
    }

    /// Returns true if the stage found issues.
    pub fn failed(&self) -> bool {
        self.verdict == Verdict::Failed
    }
}

/// Statistics about an audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStats {
    /// Rows in the audited table
    pub rows: usize,

    /// Columns in the audited table
    pub columns: usize,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

/// Report of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Where the table came from, if loaded from a file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Stage reports, in execution order
    pub stages: Vec<StageReport>,

    /// Run statistics
    pub stats: AuditStats,
}

impl AuditReport {
    /// All findings, in stage order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.stages.iter().flat_map(|s| s.findings.iter())
    }

    /// Findings at or above the given severity, in stage order.
    pub fn findings_at_least(&self, min: Severity) -> impl Iterator<Item = &Finding> {
        self.findings().filter(move |f| f.severity >= min)
    }

    /// Looks up a stage report by name.
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == name)
    }

    /// The quality score, if a scoring stage ran.
    pub fn score(&self) -> Option<&QualityScore> {
        self.stages.iter().find_map(|s| s.score.as_ref())
    }

    /// Number of stages that failed.
    pub fn failed_stages(&self) -> usize {
        self.stages.iter().filter(|s| s.failed()).count()
    }

    /// Returns true if no stage failed. Skipped stages do not count as failures.
    pub fn passed(&self) -> bool {
        self.failed_stages() == 0
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
