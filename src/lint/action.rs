//! Action object validation
//!
//! Generic checks (type membership, parameter presence) come from the
//! schema's rule sets and the parameter registry. On top of those sit the
//! semantic safety contracts: per-type invariants baked into the linter
//! because they encode engine-level guarantees the schema document cannot
//! express structurally.

use serde_json::{Map, Value};

use super::{display_value, CardLinter, Diagnostic};

const MODIFY_RULE_SCOPES: [&str; 3] = ["turn", "phase", "persistent"];
const COPY_SEMANTICS: [&str; 3] = ["snapshot", "reference", "forbidden"];

impl CardLinter<'_> {
    pub(crate) fn check_action(&self, action: &Value, path: &str, out: &mut Vec<Diagnostic>) {
        let Some(obj) = action.as_object() else {
            out.push(Diagnostic::new(path, "action is not a valid object"));
            return;
        };

        // Unknown types still run the remaining checks with whatever type
        // string was given; required-param lookups simply find no entry.
        let action_type = match obj.get("action") {
            None | Some(Value::Null) => {
                out.push(Diagnostic::new(path, "missing the 'action' key"));
                None
            }
            Some(value) => {
                let ty = display_value(value);
                if !self.defs.actions.contains(ty.as_str()) {
                    out.push(Diagnostic::new(
                        path,
                        format!("unknown action type '{}'", ty),
                    ));
                }
                Some(ty)
            }
        };

        let empty = Map::new();
        let params = match obj.get("params") {
            None => {
                out.push(Diagnostic::new(path, "missing the 'params' key"));
                &empty
            }
            // A non-object params value leaves nothing to look keys up in.
            Some(value) => value.as_object().unwrap_or(&empty),
        };

        let Some(ty) = action_type else {
            return;
        };

        if let Some(required) = self.registry.required(&ty) {
            let missing: Vec<&str> = required
                .iter()
                .copied()
                .filter(|p| !params.contains_key(*p))
                .collect();
            if !missing.is_empty() {
                out.push(Diagnostic::new(
                    path,
                    format!(
                        "action '{}' is missing required params: {}",
                        ty,
                        missing.join(", ")
                    ),
                ));
            }
        }

        self.check_contracts(&ty, params, path, out);
    }

    /// Per-type semantic safety contracts, independent of the generic
    /// required-parameter checks.
    fn check_contracts(
        &self,
        ty: &str,
        params: &Map<String, Value>,
        path: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        match ty {
            "MODIFY_RULE" => {
                match params.get("scope") {
                    None | Some(Value::Null) => out.push(Diagnostic::new(
                        path,
                        "MODIFY_RULE must include a 'scope' param (turn/phase/persistent)",
                    )),
                    Some(scope) => {
                        let rendered = display_value(scope);
                        if !MODIFY_RULE_SCOPES.contains(&rendered.as_str()) {
                            out.push(Diagnostic::new(
                                path,
                                format!(
                                    "MODIFY_RULE has invalid scope '{}'; use one of turn/phase/persistent",
                                    rendered
                                ),
                            ));
                        }
                    }
                }
                // A rule mutation with no declared end cannot be reverted.
                if !has_param(params, "duration") && !has_param(params, "rollback_condition") {
                    out.push(Diagnostic::new(
                        path,
                        "MODIFY_RULE should include 'duration' or 'rollback_condition' to allow safe rollback",
                    ));
                }
            }

            "EXECUTE_LATER" => {
                // No expiry means the deferred effect can dangle forever.
                if !has_param(params, "expiry_time")
                    && !has_param(params, "max_turns")
                    && !has_param(params, "delay")
                {
                    out.push(Diagnostic::new(
                        path,
                        "EXECUTE_LATER should include 'expiry_time', 'max_turns' or 'delay' to avoid dangling events",
                    ));
                }
                // The author must state whether referenced state is captured
                // at schedule time or re-read at resolution.
                if !has_param(params, "snapshot_args") && !has_param(params, "late_resolve") {
                    out.push(Diagnostic::new(
                        path,
                        "EXECUTE_LATER should state 'snapshot_args' or 'late_resolve' to clarify resolution semantics",
                    ));
                }
            }

            "COPY_EFFECT" => match params.get("copy_semantics") {
                None | Some(Value::Null) => out.push(Diagnostic::new(
                    path,
                    "COPY_EFFECT must declare 'copy_semantics' (snapshot|reference|forbidden)",
                )),
                Some(semantics) => {
                    let rendered = display_value(semantics);
                    if !COPY_SEMANTICS.contains(&rendered.as_str()) {
                        out.push(Diagnostic::new(
                            path,
                            format!(
                                "COPY_EFFECT has invalid copy_semantics '{}'; use snapshot|reference|forbidden",
                                rendered
                            ),
                        ));
                    }
                }
            },

            "CREATE_ENTITY" => {
                if !has_param(params, "max_instances") && !has_param(params, "create_stack_limit") {
                    out.push(Diagnostic::new(
                        path,
                        "CREATE_ENTITY should include 'max_instances' or 'create_stack_limit' to prevent runaway creation",
                    ));
                }
            }

            _ => {}
        }

        // Swaps that can partially fail must declare how they recover.
        if ty.starts_with("SWAP")
            && !params.contains_key("atomic")
            && !params.contains_key("fallback_policy")
        {
            out.push(Diagnostic::new(
                path,
                format!(
                    "{} must include 'atomic' boolean or 'fallback_policy' to avoid partial swaps",
                    ty
                ),
            ));
        }
    }
}

/// Present with a non-null value
fn has_param(params: &Map<String, Value>, name: &str) -> bool {
    params.get(name).map(|v| !v.is_null()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use crate::lint::CardLinter;
    use crate::schema::SchemaDefinitions;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn defs() -> SchemaDefinitions {
        let to_set = |items: &[&str]| -> HashSet<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        SchemaDefinitions {
            required_keys: to_set(&["id"]),
            allowed_keys: to_set(&["id", "effect"]),
            card_types: to_set(&["attack"]),
            actions: to_set(&[
                "MOVE",
                "DEAL_DAMAGE",
                "MODIFY_RULE",
                "EXECUTE_LATER",
                "COPY_EFFECT",
                "CREATE_ENTITY",
                "SWAP_POSITION",
                "SWAP_HAND_CARDS",
            ]),
            triggers: to_set(&["ON_PLAY"]),
        }
    }

    fn check(action: Value) -> Vec<String> {
        let defs = defs();
        let linter = CardLinter::new(&defs);
        let mut out = Vec::new();
        linter.check_action(&action, "effect.actions[0]", &mut out);
        out.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_non_object_action() {
        let msgs = check(json!(42));
        assert_eq!(msgs, vec!["action is not a valid object"]);
    }

    #[test]
    fn test_missing_action_key_stops_after_params_check() {
        let msgs = check(json!({"params": {}}));
        assert_eq!(msgs, vec!["missing the 'action' key"]);
    }

    #[test]
    fn test_unknown_type_still_checks_params_presence() {
        let msgs = check(json!({"action": "SUMMON_WEATHER"}));
        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].contains("unknown action type 'SUMMON_WEATHER'"));
        assert!(msgs[1].contains("missing the 'params' key"));
    }

    #[test]
    fn test_missing_required_params_reported_together() {
        let msgs = check(json!({"action": "DEAL_DAMAGE", "params": {}}));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("missing required params: target, value"));
    }

    #[test]
    fn test_non_object_params_treated_as_empty() {
        let msgs = check(json!({"action": "DEAL_DAMAGE", "params": [1, 2]}));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("missing required params: target, value"));
    }

    // Scenario: MODIFY_RULE with a valid scope but no rollback path.
    // A null duration satisfies key presence but not the rollback contract.
    #[test]
    fn test_modify_rule_rollback_contract() {
        let msgs = check(json!({
            "action": "MODIFY_RULE",
            "params": {"rule_id": "r1", "scope": "turn", "mutation": "m", "duration": null}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("should include 'duration' or 'rollback_condition'"));
        assert!(!msgs[0].contains("scope"));
    }

    #[test]
    fn test_modify_rule_invalid_scope() {
        let msgs = check(json!({
            "action": "MODIFY_RULE",
            "params": {"rule_id": "r1", "scope": "forever", "mutation": "m", "duration": 2}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("invalid scope 'forever'"));
    }

    #[test]
    fn test_execute_later_contracts() {
        let msgs = check(json!({
            "action": "EXECUTE_LATER",
            "params": {"delay": null, "effect": {}, "expiry_time": null}
        }));
        assert!(msgs.iter().any(|m| m.contains("avoid dangling events")));
        assert!(msgs.iter().any(|m| m.contains("'snapshot_args' or 'late_resolve'")));

        let msgs = check(json!({
            "action": "EXECUTE_LATER",
            "params": {"delay": 1, "effect": {}, "expiry_time": 3, "snapshot_args": true}
        }));
        assert!(msgs.is_empty(), "unexpected: {:?}", msgs);
    }

    #[test]
    fn test_copy_effect_semantics() {
        let msgs = check(json!({
            "action": "COPY_EFFECT",
            "params": {"target": "t", "source_effect": "s"}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("must declare 'copy_semantics'"));

        let msgs = check(json!({
            "action": "COPY_EFFECT",
            "params": {"target": "t", "source_effect": "s", "copy_semantics": "deep"}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("invalid copy_semantics 'deep'"));

        let msgs = check(json!({
            "action": "COPY_EFFECT",
            "params": {"target": "t", "source_effect": "s", "copy_semantics": "snapshot"}
        }));
        assert!(msgs.is_empty());
    }

    #[test]
    fn test_create_entity_bounds() {
        let msgs = check(json!({
            "action": "CREATE_ENTITY",
            "params": {"entity_type": "token", "position": "front"}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("'max_instances' or 'create_stack_limit'"));
    }

    // Scenario: a swap with both targets but no atomicity declaration.
    #[test]
    fn test_swap_prefix_requires_atomicity() {
        let msgs = check(json!({
            "action": "SWAP_POSITION",
            "params": {"target_a": "x", "target_b": "y"}
        }));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("'atomic' boolean or 'fallback_policy'"));

        let msgs = check(json!({
            "action": "SWAP_POSITION",
            "params": {"target_a": "x", "target_b": "y", "fallback_policy": "revert"}
        }));
        assert!(msgs.is_empty());
    }
}
