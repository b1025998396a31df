//! Card Record Linting
//!
//! Validates one card record at a time against the rule sets extracted
//! from the schema document plus a set of engine-level safety contracts.
//!
//! ## Checks
//! 1. **Top-level shape**: required keys present, no unknown keys
//! 2. **Vocabulary**: card type, action types, trigger conditions must be
//!    in the schema's rule sets
//! 3. **Identity**: the record's `id` must match its source file stem
//! 4. **Safety contracts**: hardcoded per-action invariants (rollback,
//!    expiry, copy semantics, creation bounds, swap atomicity)
//!
//! Linting is batch, not fail-fast: every check runs regardless of earlier
//! failures, and every failed check appends exactly one diagnostic.

mod action;
mod effect;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{LintError, Result};
use crate::registry::ParamRegistry;
use crate::schema::SchemaDefinitions;

/// One reported validation failure, tied to a path within the record
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Path within the record (empty for top-level findings)
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of linting a single card record
#[derive(Debug, Clone, Serialize)]
pub struct CardReport {
    /// External identifier derived from the source file stem
    pub card_id: String,
    /// Display path of the source file
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl CardReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The card record linter
///
/// Borrows the schema definitions for the run; validation of one card
/// never touches another, so a single linter can be shared freely.
pub struct CardLinter<'a> {
    pub(crate) defs: &'a SchemaDefinitions,
    pub(crate) registry: ParamRegistry,
}

impl<'a> CardLinter<'a> {
    pub fn new(defs: &'a SchemaDefinitions) -> Self {
        Self {
            defs,
            registry: ParamRegistry::new(),
        }
    }

    /// Lint a card record against the schema definitions.
    ///
    /// `card_id` is the externally derived identifier (the source file
    /// stem); the record's own `id` field must agree with it.
    pub fn lint_card(&self, card_id: &str, card: &Value) -> Vec<Diagnostic> {
        let mut out = Vec::new();

        let Some(obj) = card.as_object() else {
            return vec![Diagnostic::new("", "card record is not an object")];
        };

        // 1. Required top-level keys, sorted for stable output
        for key in SchemaDefinitions::sorted(&self.defs.required_keys) {
            if !obj.contains_key(key) {
                out.push(Diagnostic::new(
                    "",
                    format!("missing required top-level key: '{}'", key),
                ));
            }
        }

        // 2. Unknown top-level keys
        for key in obj.keys() {
            if !self.defs.allowed_keys.contains(key) {
                out.push(Diagnostic::new(
                    "",
                    format!("unknown top-level key: '{}'", key),
                ));
            }
        }

        // 3. Card type membership
        if let Some(card_type) = obj.get("type") {
            let rendered = display_value(card_type);
            if !self.defs.card_types.contains(rendered.as_str()) {
                out.push(Diagnostic::new(
                    "type",
                    format!("invalid card type: '{}'", rendered),
                ));
            }
        }

        // 4. Identifier consistency with the source file
        match obj.get("id") {
            Some(Value::String(id)) if id == card_id => {}
            other => out.push(Diagnostic::new(
                "id",
                format!(
                    "card id from file '{}' does not match 'id' field: {}",
                    card_id,
                    other
                        .map(|v| format!("'{}'", display_value(v)))
                        .unwrap_or_else(|| "missing".to_string()),
                ),
            )),
        }

        // 5. Named variant effects under core_mechanism
        if let Some(variants) = obj
            .get("core_mechanism")
            .and_then(Value::as_object)
            .and_then(|cm| cm.get("variants"))
            .and_then(Value::as_object)
        {
            for (name, content) in variants {
                if let Some(effect) = content.as_object().and_then(|c| c.get("effect")) {
                    self.check_effect(
                        effect,
                        &format!("core_mechanism.variants.{}", name),
                        &mut out,
                    );
                }
            }
        }

        // 6. Top-level effect
        if let Some(effect) = obj.get("effect") {
            self.check_effect(effect, "effect", &mut out);
        }

        // 7. Trigger list
        if let Some(triggers) = obj.get("triggers") {
            match triggers.as_array() {
                None => out.push(Diagnostic::new(
                    "triggers",
                    "must be a list of trigger objects",
                )),
                Some(items) => {
                    for (i, trigger) in items.iter().enumerate() {
                        let path = format!("triggers[{}]", i);
                        match trigger.as_object().and_then(|t| t.get("condition")) {
                            None => {
                                out.push(Diagnostic::new(path, "missing a 'condition' key"))
                            }
                            Some(cond) => {
                                let rendered = display_value(cond);
                                if !self.defs.triggers.contains(rendered.as_str()) {
                                    out.push(Diagnostic::new(
                                        path,
                                        format!("invalid condition: '{}'", rendered),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }

        // 8. Usage limit contract
        if let Some(usage_limit) = obj.get("usage_limit") {
            match usage_limit.as_object() {
                None => out.push(Diagnostic::new(
                    "usage_limit",
                    "must be an object with 'reset_timing'",
                )),
                Some(ul) => {
                    let declared = match ul.get("reset_timing") {
                        None | Some(Value::Null) => false,
                        Some(Value::String(s)) => !s.is_empty(),
                        Some(_) => true,
                    };
                    if !declared {
                        out.push(Diagnostic::new(
                            "usage_limit",
                            "must include 'reset_timing' (e.g. end_of_turn)",
                        ));
                    }
                }
            }
        }

        out
    }
}

/// Render a JSON value for a diagnostic message: strings bare, everything
/// else as compact JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lint one card file. The card's external identifier is the file stem;
/// a file that fails to read or parse yields a single diagnostic on that
/// record and never stops the batch.
pub fn lint_card_file(linter: &CardLinter, path: &Path) -> CardReport {
    let card_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = path.display().to_string();

    let diagnostics = match fs::read_to_string(path) {
        Err(e) => vec![Diagnostic::new("", format!("could not read file: {}", e))],
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Err(e) => vec![Diagnostic::new("", format!("invalid JSON: {}", e))],
            Ok(card) => linter.lint_card(&card_id, &card),
        },
    };

    CardReport {
        card_id,
        source,
        diagnostics,
    }
}

/// Lint every `.json` file under a directory, skipping excluded file
/// names (conventionally the card manifest). Files are visited in sorted
/// order so reports are deterministic.
pub fn lint_card_dir(
    linter: &CardLinter,
    dir: &Path,
    exclude: &[String],
) -> Result<Vec<CardReport>> {
    if !dir.is_dir() {
        return Err(LintError::CardDirNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|x| x == "json").unwrap_or(false))
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| !exclude.iter().any(|x| x == name))
                .unwrap_or(true)
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();

    Ok(files.iter().map(|p| lint_card_file(linter, p)).collect())
}
