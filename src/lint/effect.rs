//! Effect object validation
//!
//! An effect bundles an optional `actions` list with an optional `cost`
//! list. Cost items come in two shapes: a resource cost (`resource` +
//! `value`) or an action cost (an object with an `action` key). Action
//! costs carry the same semantic contracts as effect actions and are
//! validated identically.

use serde_json::Value;

use super::{CardLinter, Diagnostic};

impl CardLinter<'_> {
    pub(crate) fn check_effect(&self, effect: &Value, path: &str, out: &mut Vec<Diagnostic>) {
        let Some(obj) = effect.as_object() else {
            out.push(Diagnostic::new(path, "effect is not a valid object"));
            return;
        };

        if let Some(actions) = obj.get("actions") {
            match actions.as_array() {
                None => out.push(Diagnostic::new(
                    format!("{}.actions", path),
                    "must be a list of action objects",
                )),
                Some(items) => {
                    for (i, action) in items.iter().enumerate() {
                        self.check_action(action, &format!("{}.actions[{}]", path, i), out);
                    }
                }
            }
        }

        if let Some(cost) = obj.get("cost") {
            match cost.as_array() {
                None => out.push(Diagnostic::new(
                    format!("{}.cost", path),
                    "must be a list of cost items",
                )),
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let item_path = format!("{}.cost[{}]", path, i);

                        let is_resource_cost = item
                            .as_object()
                            .map(|o| o.contains_key("resource") && o.contains_key("value"))
                            .unwrap_or(false);
                        let is_action_cost = item
                            .as_object()
                            .map(|o| o.contains_key("action"))
                            .unwrap_or(false);

                        if !is_resource_cost && !is_action_cost {
                            out.push(Diagnostic::new(
                                item_path.clone(),
                                "invalid cost item; must be a resource object or an action object",
                            ));
                        }

                        if is_action_cost {
                            self.check_action(item, &item_path, out);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lint::CardLinter;
    use crate::schema::SchemaDefinitions;
    use serde_json::json;
    use std::collections::HashSet;

    fn defs() -> SchemaDefinitions {
        let actions: HashSet<String> = ["MOVE", "MODIFY_RULE", "PAY_COST"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        SchemaDefinitions {
            required_keys: ["id"].iter().map(|s| s.to_string()).collect(),
            allowed_keys: ["id", "effect"].iter().map(|s| s.to_string()).collect(),
            card_types: ["attack"].iter().map(|s| s.to_string()).collect(),
            actions,
            triggers: ["ON_PLAY"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_non_object_effect() {
        let defs = defs();
        let linter = CardLinter::new(&defs);
        let mut out = Vec::new();
        linter.check_effect(&json!("zap"), "effect", &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("not a valid object"));
    }

    #[test]
    fn test_actions_must_be_a_list() {
        let defs = defs();
        let linter = CardLinter::new(&defs);
        let mut out = Vec::new();
        linter.check_effect(&json!({"actions": {"action": "MOVE"}}), "effect", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].path, "effect.actions");
    }

    #[test]
    fn test_cost_item_shapes() {
        let defs = defs();
        let linter = CardLinter::new(&defs);
        let mut out = Vec::new();
        linter.check_effect(
            &json!({
                "cost": [
                    {"resource": "mana", "value": 2},
                    {"action": "PAY_COST", "params": {"target": "self", "resource": "hp", "value": 1}},
                    {"note": "neither shape"}
                ]
            }),
            "effect",
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].path, "effect.cost[2]");
        assert!(out[0].message.contains("invalid cost item"));
    }

    #[test]
    fn test_action_cost_carries_action_contracts() {
        let defs = defs();
        let linter = CardLinter::new(&defs);
        let mut out = Vec::new();
        // A MODIFY_RULE cost must still declare scope and rollback info.
        linter.check_effect(
            &json!({
                "cost": [
                    {"action": "MODIFY_RULE", "params": {"rule_id": "r1", "scope": "turn", "mutation": "m", "duration": 1}}
                ]
            }),
            "effect",
            &mut out,
        );
        assert!(out.is_empty(), "unexpected diagnostics: {:?}", out);

        let mut out = Vec::new();
        linter.check_effect(
            &json!({
                "cost": [
                    {"action": "MODIFY_RULE", "params": {"rule_id": "r1", "scope": "game", "mutation": "m", "duration": 1}}
                ]
            }),
            "effect",
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].path, "effect.cost[0]");
        assert!(out[0].message.contains("invalid scope 'game'"));
    }
}
