//! Schema document extraction
//!
//! Scrapes the five rule sets out of the hand-authored schema document.
//! The document is markdown with conventionally numbered sub-headings and
//! table sections; the exact heading and column wording is load-bearing.
//! This is regex extraction, not a markdown parser — a section that moves
//! or gets retitled extracts as empty, which [`load_definitions`] turns
//! into a hard abort rather than a silently permissive run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

use crate::error::{LintError, Result};
use crate::schema::SchemaDefinitions;

/// Sub-heading label for the required top-level key list
const REQUIRED_KEYS_LABEL: &str = "Required Top-Level Keys";
/// Sub-heading label for the optional top-level key list
const OPTIONAL_KEYS_LABEL: &str = "Optional Top-Level Keys";
/// Sub-heading label for the card type list
const CARD_TYPES_LABEL: &str = "Valid Card Types";

/// Extract all five rule sets from schema document text.
///
/// Missing sections come back as empty sets with a warning; deciding
/// whether that is fatal belongs to the caller.
pub fn extract_definitions(content: &str) -> SchemaDefinitions {
    let required_keys = extract_list_section(content, REQUIRED_KEYS_LABEL);
    let optional_keys = extract_list_section(content, OPTIONAL_KEYS_LABEL);

    // Allowed keys are not a distinct list in the document: required ∪ optional.
    let allowed_keys: HashSet<String> = required_keys.union(&optional_keys).cloned().collect();

    SchemaDefinitions {
        required_keys,
        allowed_keys,
        card_types: extract_list_section(content, CARD_TYPES_LABEL),
        actions: extract_actions_table(content),
        triggers: extract_triggers_table(content),
    }
}

/// Read the schema document and build complete definitions.
///
/// Aborts with [`LintError::IncompleteDefinitions`] if any rule set is
/// empty — partial definitions must never silently pass everything.
pub fn load_definitions(path: &Path) -> Result<SchemaDefinitions> {
    let content = fs::read_to_string(path).map_err(|source| LintError::SchemaDocument {
        path: path.to_path_buf(),
        source,
    })?;

    let defs = extract_definitions(&content);
    info!(
        "loaded schema definitions from {}: {} required keys, {} allowed keys, \
         {} card types, {} actions, {} trigger conditions",
        path.display(),
        defs.required_keys.len(),
        defs.allowed_keys.len(),
        defs.card_types.len(),
        defs.actions.len(),
        defs.triggers.len(),
    );

    let missing = defs.missing_sections();
    if !missing.is_empty() {
        return Err(LintError::IncompleteDefinitions { missing });
    }
    Ok(defs)
}

/// Collect list items under a numbered `###` sub-heading whose title
/// contains `label`. Captures up to the next heading of equal or higher
/// level; items are bare words or words in code/emphasis markup at the
/// start of a line.
fn extract_list_section(content: &str, label: &str) -> HashSet<String> {
    let section = Regex::new(&format!(
        r"(?s)###\s*\d+\.\d+[^\n]*{}(.*?)(?:###|##|\z)",
        regex::escape(label)
    ))
    .unwrap();

    let Some(caps) = section.captures(content) else {
        warn!("could not find list section for '{}'", label);
        return HashSet::new();
    };

    let item = Regex::new(r"(?m)^\s*-\s*[`*_]*(\w+)").unwrap();
    item.captures_iter(&caps[1])
        .map(|c| c[1].to_string())
        .collect()
}

/// Collect action type names from the table under the top-level section
/// heading containing "Action". The capture runs from the table's
/// header-separator row to the next horizontal rule or end of document.
fn extract_actions_table(content: &str) -> HashSet<String> {
    let section =
        Regex::new(r"(?s)##\s*\d+\.[^\n]*Action.*?\|.*?\n\|[-|: ]+\n(.*?)(?:---|\z)").unwrap();

    let Some(caps) = section.captures(content) else {
        warn!("could not find actions table");
        return HashSet::new();
    };
    collect_code_tokens(&caps[1])
}

/// Collect trigger condition names from the table whose header row names
/// the event-type field.
fn extract_triggers_table(content: &str) -> HashSet<String> {
    let section =
        Regex::new(r"(?s)\|[^\n]*`EVENT_TYPE`[^\n]*\n\|[-|: ]+\n(.*?)(?:---|\z)").unwrap();

    let Some(caps) = section.captures(content) else {
        warn!("could not find triggers table");
        return HashSet::new();
    };
    collect_code_tokens(&caps[1])
}

/// Every code-formatted UPPER_SNAKE token found in a table cell
fn collect_code_tokens(table_body: &str) -> HashSet<String> {
    let token = Regex::new(r"\|\s*`([A-Z_]+)`").unwrap();
    token
        .captures_iter(table_body)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Card Logic Schema

## 2. Card Structure

### 2.1 Required Top-Level Keys

- `id`
- `type`
- name
- `type`

### 2.2 Optional Top-Level Keys

- *effect*
- `triggers`

### 2.3 Valid Card Types

- `attack`
- `defense`

---

## 4. Action Reference

| Action | Description |
|--------|-------------|
| `MOVE` | Move a unit |
| `DEAL_DAMAGE` | Deal damage |

---

## 5. Trigger Conditions

| Condition (`EVENT_TYPE`) | Description |
|--------------------------|-------------|
| `ON_TURN_START` | Start of turn |
| `ON_DAMAGE` | Damage dealt |
";

    #[test]
    fn test_list_extraction_collapses_duplicates_and_markup() {
        let keys = extract_list_section(DOC, REQUIRED_KEYS_LABEL);
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("id"));
        assert!(keys.contains("type"));
        assert!(keys.contains("name"));
    }

    #[test]
    fn test_allowed_keys_are_union() {
        let defs = extract_definitions(DOC);
        assert!(defs.allowed_keys.contains("id"));
        assert!(defs.allowed_keys.contains("effect"));
        assert!(defs.allowed_keys.contains("triggers"));
        assert_eq!(defs.allowed_keys.len(), 5);
    }

    #[test]
    fn test_table_extraction() {
        let defs = extract_definitions(DOC);
        assert_eq!(defs.actions.len(), 2);
        assert!(defs.actions.contains("DEAL_DAMAGE"));
        assert_eq!(defs.triggers.len(), 2);
        assert!(defs.triggers.contains("ON_TURN_START"));
    }

    #[test]
    fn test_missing_section_yields_empty_set() {
        let defs = extract_definitions("# Empty Document\n\nNothing here.\n");
        assert!(defs.required_keys.is_empty());
        assert!(defs.actions.is_empty());
        assert!(defs.triggers.is_empty());
        assert!(!defs.is_complete());
    }

    #[test]
    fn test_load_definitions_aborts_on_incomplete_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.md");
        std::fs::write(&path, "# Schema\n\n### 2.1 Required Top-Level Keys\n- `id`\n").unwrap();

        let err = load_definitions(&path).unwrap_err();
        match err {
            LintError::IncompleteDefinitions { missing } => {
                assert!(missing.contains(&"card_types".to_string()));
                assert!(missing.contains(&"actions".to_string()));
            }
            other => panic!("Expected IncompleteDefinitions, got {:?}", other),
        }
    }

    #[test]
    fn test_load_definitions_missing_file() {
        let err = load_definitions(Path::new("/nonexistent/schema.md")).unwrap_err();
        assert!(matches!(err, LintError::SchemaDocument { .. }));
    }
}
