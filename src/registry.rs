//! Action parameter registry
//!
//! A static, hand-authored mapping from action type name to the set of
//! parameter names that action requires. The schema document's parameter
//! tables are prose and not reliably machine-readable, so this table is
//! maintained alongside the linter as source of truth and must be kept in
//! sync with the document's action list by hand.

use std::collections::HashMap;

/// Required parameter names per action type.
///
/// An action type absent from this registry gets no required-parameter
/// check at all — membership in the schema's action set is still enforced,
/// but nothing says which params it needs. Callers extending the schema
/// document should audit coverage via [`ParamRegistry::contains`].
pub struct ParamRegistry {
    required: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for ParamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamRegistry {
    pub fn new() -> Self {
        let required: HashMap<&'static str, &'static [&'static str]> = [
            // Resource actions
            ("GAIN_RESOURCE", &["target", "resource", "value"] as &[_]),
            ("LOSE_RESOURCE", &["target", "resource", "value"]),
            ("PAY_COST", &["target", "resource", "value"]),
            ("DEAL_DAMAGE", &["target", "value"]),
            ("SWAP_RESOURCES", &["target_a", "target_b", "resource"]),
            ("SET_RESOURCE", &["target", "resource", "value"]),
            ("TRANSFER_RESOURCE", &["from", "to", "resource", "value"]),
            // Movement actions
            ("MOVE", &["target", "value"]),
            ("SWAP_POSITION", &["target_a", "target_b"]),
            // Status and rule actions
            ("APPLY_STATUS", &["target", "status_id"]),
            ("REMOVE_STATUS", &["target", "status_id"]),
            ("MODIFY_RULE", &["rule_id", "scope", "mutation", "duration"]),
            // Interaction and information actions
            ("CHOICE", &["target", "options"]),
            ("LOOKUP", &["target", "info_type"]),
            ("INTERRUPT", &["target_action", "interrupt_type"]),
            ("COPY_EFFECT", &["target", "source_effect"]),
            // Card and deck actions
            ("DRAW_CARD", &["target", "deck", "count"]),
            ("DISCARD_CARD", &["target", "count"]),
            ("SWAP_HAND_CARDS", &["target_a", "target_b", "count", "atomic"]),
            ("SWAP_DISCARD_PILES", &["target_a", "target_b", "atomic"]),
            ("RECOVER_CARD_FROM_DISCARD", &["target", "deck", "count"]),
            // Entity actions
            ("CREATE_ENTITY", &["entity_type", "position"]),
            ("DESTROY_ENTITY", &["target_entity_id"]),
            // Game flow actions
            ("SKIP_PHASE", &["phase"]),
            ("PROPOSE_ALLIANCE", &["target", "duration"]),
            ("EXECUTE_LATER", &["delay", "effect", "expiry_time"]),
            ("TRIGGER_EVENT", &["event_id", "participants"]),
        ]
        .into_iter()
        .collect();

        Self { required }
    }

    /// Required parameter names for an action type, if registered
    pub fn required(&self, action_type: &str) -> Option<&'static [&'static str]> {
        self.required.get(action_type).copied()
    }

    /// Whether an action type has a registry entry
    pub fn contains(&self, action_type: &str) -> bool {
        self.required.contains_key(action_type)
    }

    /// Number of registered action types
    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
