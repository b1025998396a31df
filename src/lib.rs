//! Card Data Linter
//!
//! Validates structured card definitions against the rule sets extracted
//! from a hand-authored schema document, catching malformed or
//! semantically unsafe card data before it reaches the game engine.
//!
//! ## Features
//!
//! - **Schema-derived rules**: required/allowed keys, card types, action
//!   types, and trigger conditions come straight from the schema document
//! - **Safety contracts**: hardcoded per-action invariants (rollback,
//!   expiry, copy semantics, creation bounds, swap atomicity)
//! - **Batch diagnostics**: every check runs on every card; nothing is
//!   dropped and nothing fail-fasts
//! - **Fail-closed loading**: an empty rule set aborts the run before any
//!   card is validated
//!
//! ## Flow
//!
//! ```text
//! schema document ──extract──▶ SchemaDefinitions (read-only for the run)
//!                                     │
//! card files ──walk/parse──▶ CardLinter::lint_card ──▶ diagnostics
//!                                     │
//!                              RunReport ──▶ text / JSON, exit status
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod lint;
pub mod registry;
pub mod report;
pub mod schema;

pub use config::{LintConfig, ReportFormat};
pub use error::{LintError, Result};
pub use extract::{extract_definitions, load_definitions};
pub use lint::{lint_card_dir, lint_card_file, CardLinter, CardReport, Diagnostic};
pub use registry::ParamRegistry;
pub use report::{print_text_report, RunReport};
pub use schema::SchemaDefinitions;
