//! Rule set definitions extracted from the schema document

use std::collections::HashSet;

use serde::Serialize;

/// The five rule sets every validation run is checked against.
///
/// Built once per run by [`extract::load_definitions`] and treated as
/// read-only from then on; the linter borrows it rather than holding
/// process-wide state, so synthetic definitions drop straight into tests.
///
/// [`extract::load_definitions`]: crate::extract::load_definitions
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaDefinitions {
    /// Top-level keys every card record must carry
    pub required_keys: HashSet<String>,
    /// All top-level keys a card record may carry (required ∪ optional)
    pub allowed_keys: HashSet<String>,
    /// Valid values for a card's `type` field
    pub card_types: HashSet<String>,
    /// Known action type names
    pub actions: HashSet<String>,
    /// Known trigger condition names
    pub triggers: HashSet<String>,
}

impl SchemaDefinitions {
    /// Names of the rule sets that came back empty.
    ///
    /// An empty set means its section was missing or unparseable; a run
    /// against it would validate everything as always-valid, so loading
    /// aborts when this is non-empty.
    pub fn missing_sections(&self) -> Vec<String> {
        let sections: [(&str, &HashSet<String>); 5] = [
            ("required_keys", &self.required_keys),
            ("allowed_keys", &self.allowed_keys),
            ("card_types", &self.card_types),
            ("actions", &self.actions),
            ("triggers", &self.triggers),
        ];

        sections
            .iter()
            .filter(|(_, set)| set.is_empty())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Whether all five rule sets are populated
    pub fn is_complete(&self) -> bool {
        self.missing_sections().is_empty()
    }

    /// A rule set's contents, sorted for stable display
    pub fn sorted(set: &HashSet<String>) -> Vec<&str> {
        let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
        items.sort_unstable();
        items
    }
}
