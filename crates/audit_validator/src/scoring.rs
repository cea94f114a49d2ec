//! Composite quality scoring.
//!
//! The score starts at 100 and loses capped points per category:
//!
//! | Category            | Points                         | Cap |
//! |---------------------|--------------------------------|-----|
//! | NULLs               | null % of all cells / 5        | 20  |
//! | Duplicates          | repeated row % / 6.67          | 15  |
//! | Invalid (enum)      | invalid row % / 6.67           | 15  |
//! | Invalid (bound)     | invalid row % / 10             | 10  |
//!
//! Only scored allow-lists contribute an enum deduction. The scorer
//! recomputes every count from the table and never reads other stages.

use crate::duplicates::repeated_row_count;
use crate::nulls::percentage;
use crate::rules::{enum_violations, range_violations};
use crate::QualityStage;
use audit_core::{
    AuditConfig, Deduction, QualityRating, QualityScore, Severity, StageReport, Table,
};

const MAX_SCORE: f64 = 100.0;

const NULL_DIVISOR: f64 = 5.0;
const NULL_CAP: f64 = 20.0;

const DUPLICATE_DIVISOR: f64 = 6.67;
const DUPLICATE_CAP: f64 = 15.0;

const ENUM_DIVISOR: f64 = 6.67;
const ENUM_CAP: f64 = 15.0;

const BOUND_DIVISOR: f64 = 10.0;
const BOUND_CAP: f64 = 10.0;

fn deduction(category: impl Into<String>, percent: f64, divisor: f64, cap: f64) -> Deduction {
    Deduction {
        category: category.into(),
        points: (percent / divisor).min(cap),
    }
}

/// Computes the quality score of a table.
pub fn score_table(table: &Table, config: &AuditConfig) -> QualityScore {
    let rows = table.row_count();
    let mut deductions = Vec::new();

    let null_cells: usize = table.rows().flatten().filter(|v| v.is_null()).count();
    deductions.push(deduction(
        "NULLs",
        percentage(null_cells, table.total_cells()),
        NULL_DIVISOR,
        NULL_CAP,
    ));

    deductions.push(deduction(
        "Duplicates",
        percentage(repeated_row_count(table), rows),
        DUPLICATE_DIVISOR,
        DUPLICATE_CAP,
    ));

    for constraint in config.scored_allow_lists() {
        if let Some(invalid) = enum_violations(table, constraint) {
            deductions.push(deduction(
                format!("Invalid {}", constraint.column),
                percentage(invalid.len(), rows),
                ENUM_DIVISOR,
                ENUM_CAP,
            ));
        }
    }

    if let Some(bound) = &config.numeric_bound
        && let Some(invalid) = range_violations(table, bound)
    {
        deductions.push(deduction(
            format!("Invalid {}", bound.column),
            percentage(invalid.len(), rows),
            BOUND_DIVISOR,
            BOUND_CAP,
        ));
    }

    let total: f64 = deductions.iter().map(|d| d.points).sum();
    let score = (MAX_SCORE - total).max(0.0);

    QualityScore {
        score,
        rating: QualityRating::from_score(score),
        deductions,
    }
}

/// Scores the table with weighted, capped deductions.
pub struct QualityScorer;

impl QualityScorer {
    /// Creates a new quality scorer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityStage for QualityScorer {
    fn name(&self) -> &'static str {
        "quality_score"
    }

    fn run(&self, table: &Table, config: &AuditConfig) -> StageReport {
        let mut report = StageReport::new(self.name());
        let score = score_table(table, config);

        report.record(
            Severity::Info,
            format!("Quality Score: {:.1}/{MAX_SCORE}", score.score),
        );
        report.record(Severity::Info, format!("Rating: {}", score.rating));

        let mut any = false;
        for d in score.positive_deductions() {
            any = true;
            report.record(
                Severity::Info,
                format!("Deduction {}: -{:.1} points", d.category, d.points),
            );
        }
        if !any {
            report.record(Severity::Info, "No deductions");
        }

        report.complete(score);
        report
    }
}
