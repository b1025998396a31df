//! Card Linter CLI
//!
//! Validates card data files against the rule sets extracted from the
//! schema document. Exit status is 1 when any finding is produced or the
//! schema document cannot be loaded, 0 otherwise.
//!
//! Usage:
//!   card-lint                         # lint the configured cards directory
//!   card-lint assets/data/cards/fireball.json
//!   card-lint --schema docs/card_logic_schema.md --format json cards/

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardlint::{
    lint_card_dir, lint_card_file, load_definitions, print_text_report, CardLinter, LintConfig,
    ReportFormat, RunReport,
};

#[derive(Parser)]
#[command(name = "card-lint")]
#[command(about = "Validate card data files against the schema document")]
struct Cli {
    /// Card files or directories to lint (default: configured cards directory)
    paths: Vec<PathBuf>,

    /// Path to the schema document (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    /// Output format (text, json; overrides config)
    #[arg(short, long)]
    format: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(findings) => {
            if findings > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<usize> {
    let config = LintConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    // Definitions load first; empty rule sets abort before any card is read.
    let schema_path = cli.schema.unwrap_or_else(|| config.document_path());
    let defs = load_definitions(&schema_path)?;
    let linter = CardLinter::new(&defs);

    let paths = if cli.paths.is_empty() {
        vec![config.cards_dir()]
    } else {
        cli.paths
    };

    let mut reports = Vec::new();
    for path in &paths {
        if path.is_dir() {
            reports.extend(lint_card_dir(&linter, path, &config.scan.exclude)?);
        } else if path.is_file() {
            reports.push(lint_card_file(&linter, path));
        } else {
            anyhow::bail!("path not found: {}", path.display());
        }
    }

    let report = RunReport::from_reports(reports);

    let format = match cli.format.as_deref() {
        Some("json") => ReportFormat::Json,
        Some("text") => ReportFormat::Text,
        Some(other) => anyhow::bail!("unknown format '{}', use text or json", other),
        None => config.report.format,
    };

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print_text_report(&report),
    }

    Ok(report.total_findings)
}
