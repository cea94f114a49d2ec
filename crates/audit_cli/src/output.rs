use anyhow::Result;
use audit_core::{AuditReport, QualityRating, Severity, StageReport, Verdict};
use colored::*;
use serde_json::json;

pub fn print_audit_report(report: &AuditReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn verdict_marker(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Passed => "✓".green().bold(),
        Verdict::Failed => "✗".red().bold(),
        Verdict::Skipped => "⊘".yellow().bold(),
        Verdict::Completed => "●".blue().bold(),
    }
}

fn verdict_label(verdict: Verdict) -> ColoredString {
    let label = verdict.to_string();
    match verdict {
        Verdict::Passed => label.green(),
        Verdict::Failed => label.red(),
        Verdict::Skipped => label.yellow(),
        Verdict::Completed => label.blue(),
    }
}

fn print_stage(stage: &StageReport) {
    println!(
        "\n{} {} {}",
        verdict_marker(stage.verdict),
        format!("{:<16}", stage.stage).bold(),
        verdict_label(stage.verdict)
    );

    for finding in stage.findings.iter().filter(|f| f.severity >= Severity::Warning) {
        for (i, line) in finding.message.lines().enumerate() {
            let line = match finding.severity {
                Severity::Warning => line.yellow(),
                _ => line.red(),
            };
            if i == 0 {
                println!("    {:<8} {}", finding.severity, line);
            } else {
                println!("             {}", line);
            }
        }
    }
}

fn print_text_report(report: &AuditReport) {
    println!("\n{}", "═".repeat(70));
    println!("{}", "  DATA QUALITY AUDIT REPORT".bold());
    println!("{}", "═".repeat(70));

    if let Some(source) = &report.source {
        println!("  Source:  {}", source);
    }
    println!(
        "  Table:   {} rows x {} columns",
        report.stats.rows, report.stats.columns
    );

    for stage in &report.stages {
        print_stage(stage);
    }

    if let Some(score) = report.score() {
        let rating = match score.rating {
            QualityRating::Excellent | QualityRating::Good => score.rating.to_string().green(),
            QualityRating::Fair => score.rating.to_string().yellow(),
            QualityRating::Poor => score.rating.to_string().red(),
        };
        println!("\n{}", "Quality Score:".bold());
        println!("  {:.1}/100  {}", score.score, rating.bold());
        for deduction in score.positive_deductions() {
            println!("  - {}: -{:.1} points", deduction.category, deduction.points);
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Stages failed: {}", report.failed_stages());
    println!(
        "  Findings:      {} ({} at warning or above)",
        report.findings().filter(|f| f.severity > Severity::Debug).count(),
        report.findings_at_least(Severity::Warning).count()
    );
    println!("  Duration:      {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(70));
}

fn print_json_report(report: &AuditReport) -> Result<()> {
    let output = json!({
        "passed": report.passed(),
        "report": report,
        "summary": {
            "failed_stages": report.failed_stages(),
            "score": report.score().map(|s| s.score),
            "rating": report.score().map(|s| s.rating),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
