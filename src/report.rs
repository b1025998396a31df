//! Aggregated run reporting
//!
//! Collects per-card lint results into one report with totals, a
//! timestamp, and text/JSON rendering. Parse failures and structural
//! findings count toward the same total.

use serde::Serialize;

use crate::lint::CardReport;

/// Aggregated result of one lint run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub files_checked: usize,
    pub files_with_findings: usize,
    pub total_findings: usize,
    /// Only cards that produced findings; clean cards appear in the counts
    pub cards: Vec<CardReport>,
}

impl RunReport {
    /// Build a report from per-card results
    pub fn from_reports(reports: Vec<CardReport>) -> Self {
        let files_checked = reports.len();
        let cards: Vec<CardReport> = reports.into_iter().filter(|r| !r.is_clean()).collect();
        let total_findings = cards.iter().map(|r| r.diagnostics.len()).sum();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            files_checked,
            files_with_findings: cards.len(),
            total_findings,
            cards,
        }
    }

    /// Whether any card produced findings
    pub fn has_findings(&self) -> bool {
        self.total_findings > 0
    }
}

/// Print a human-readable run report
pub fn print_text_report(report: &RunReport) {
    for card in &report.cards {
        println!("\n--- Findings in {}:", card.source);
        for diagnostic in &card.diagnostics {
            println!("  - {}", diagnostic);
        }
    }

    println!("\n📊 SUMMARY:");
    println!("   Files checked: {}", report.files_checked);
    println!("   With findings: {}", report.files_with_findings);
    println!("   Findings:      {}", report.total_findings);

    if report.has_findings() {
        println!("\n❌ Linting complete. Found {} finding(s).", report.total_findings);
    } else {
        println!("\n✅ Linting complete. All files are valid.");
    }
}
