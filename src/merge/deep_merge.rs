use serde_json::{Map, Value};
use tracing::debug;

/// Merge `patch` over `base`, returning a new value.
///
/// Only objects are merged recursively. Arrays and scalars in the patch
/// replace whatever the base held. A `null` patch at the root leaves the
/// base untouched, while a `null` inside a patch object overwrites the
/// matching base field.
///
/// Recursion depth follows the nesting depth of `patch`.
pub fn deep_merge(base: &Value, patch: &Value) -> Value {
    match patch {
        Value::Null => base.clone(),
        Value::Object(fields) => Value::Object(merge_fields(base.as_object(), fields)),
        other => other.clone(),
    }
}

/// Three-way reconciliation used for case updates.
///
/// The patch wins over the stored record, the stored record wins over
/// the defaults, and the defaults fill anything absent from both.
pub fn reconcile(defaults: &Value, stored: &Value, patch: &Value) -> Value {
    debug!(
        "Reconciling case data (stored: {}, patch: {})",
        kind(stored),
        kind(patch)
    );
    deep_merge(defaults, &deep_merge(stored, patch))
}

fn merge_fields(base: Option<&Map<String, Value>>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.cloned().unwrap_or_default();

    for (key, value) in patch {
        let next = match value {
            Value::Object(nested) => {
                Value::Object(merge_fields(merged.get(key).and_then(Value::as_object), nested))
            }
            other => other.clone(),
        };
        merged.insert(key.clone(), next);
    }

    merged
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_patch_returns_base() {
        let base = json!({"a": 1, "b": {"c": [1, 2]}});
        assert_eq!(deep_merge(&base, &Value::Null), base);
    }

    #[test]
    fn empty_patch_copies_base() {
        let base = json!({"a": 1, "b": {"c": "x"}});
        assert_eq!(deep_merge(&base, &json!({})), base);
    }

    #[test]
    fn scalar_field_is_overwritten() {
        assert_eq!(deep_merge(&json!({"a": 1}), &json!({"a": 2})), json!({"a": 2}));
    }

    #[test]
    fn nested_siblings_are_preserved() {
        let merged = deep_merge(&json!({"a": {"x": 1, "y": 2}}), &json!({"a": {"y": 3}}));
        assert_eq!(merged, json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let merged = deep_merge(&json!({"a": [1, 2, 3]}), &json!({"a": [9]}));
        assert_eq!(merged, json!({"a": [9]}));
    }

    #[test]
    fn nested_null_overwrites_field() {
        let merged = deep_merge(&json!({"a": {"x": 1}, "b": 2}), &json!({"a": null}));
        assert_eq!(merged, json!({"a": null, "b": 2}));
    }

    #[test]
    fn root_array_or_scalar_patch_replaces_base() {
        let base = json!({"a": 1});
        assert_eq!(deep_merge(&base, &json!([1, 2])), json!([1, 2]));
        assert_eq!(deep_merge(&base, &json!("x")), json!("x"));
        assert_eq!(deep_merge(&base, &json!(false)), json!(false));
    }

    #[test]
    fn object_patch_over_non_object_starts_empty() {
        assert_eq!(deep_merge(&json!(7), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(deep_merge(&Value::Null, &json!({"a": {"b": 1}})), json!({"a": {"b": 1}}));

        let merged = deep_merge(&json!({"a": "flat"}), &json!({"a": {"b": 1}}));
        assert_eq!(merged, json!({"a": {"b": 1}}));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = json!({"a": {"x": 1}});
        let patch = json!({"a": {"y": 2}});
        let _ = deep_merge(&base, &patch);
        assert_eq!(base, json!({"a": {"x": 1}}));
        assert_eq!(patch, json!({"a": {"y": 2}}));
    }

    #[test]
    fn merge_is_idempotent() {
        let base = json!({"a": {"x": 1, "y": [1]}, "b": "keep"});
        let patch = json!({"a": {"y": [2, 3], "z": null}, "c": true});
        let once = deep_merge(&base, &patch);
        assert_eq!(deep_merge(&once, &patch), once);
    }

    #[test]
    fn reconcile_layers_patch_stored_defaults() {
        let defaults = json!({
            "applicant": {"firstName": null, "phone": null},
            "status": "draft",
            "documents": []
        });
        let stored = json!({"applicant": {"firstName": "Ana", "phone": "555-0100"}});
        let patch = json!({"applicant": {"phone": "555-0199"}});

        let merged = reconcile(&defaults, &stored, &patch);
        assert_eq!(
            merged,
            json!({
                "applicant": {"firstName": "Ana", "phone": "555-0199"},
                "status": "draft",
                "documents": []
            })
        );
    }

    #[test]
    fn reconcile_without_stored_or_patch_yields_defaults() {
        let defaults = json!({"status": "draft"});
        assert_eq!(reconcile(&defaults, &Value::Null, &Value::Null), defaults);
    }
}
