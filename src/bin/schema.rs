//! Schema Inspection CLI
//!
//! Extracts and prints the rule sets the linter would run with, without
//! linting anything. Useful when editing the schema document: a section
//! that moves or gets retitled shows up here as an empty set.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardlint::{extract_definitions, LintConfig, SchemaDefinitions};

#[derive(Parser)]
#[command(name = "card-schema")]
#[command(about = "Inspect the rule sets extracted from the schema document")]
struct Cli {
    /// Path to the schema document (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Exit nonzero if any rule set is empty
    #[arg(long)]
    check: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(incomplete) => {
            if incomplete {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = LintConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let path = cli.schema.unwrap_or_else(|| config.document_path());

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("reading schema document {}", path.display()))?;
    let defs = extract_definitions(&content);

    match cli.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&defs)?),
        _ => {
            println!("Rule sets from {}:", path.display());
            print_section("Required top-level keys", &defs.required_keys);
            print_section("Allowed top-level keys", &defs.allowed_keys);
            print_section("Card types", &defs.card_types);
            print_section("Action types", &defs.actions);
            print_section("Trigger conditions", &defs.triggers);
        }
    }

    let missing = defs.missing_sections();
    if !missing.is_empty() {
        eprintln!("\n⚠️  Empty rule sets: {}", missing.join(", "));
    }

    Ok(cli.check && !missing.is_empty())
}

fn print_section(title: &str, set: &HashSet<String>) {
    println!("\n{} ({}):", title, set.len());
    for item in SchemaDefinitions::sorted(set) {
        println!("  - {}", item);
    }
}
