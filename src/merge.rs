//! Recursive merging of JSON key-value mappings
//!
//! Used to layer partial translation or configuration objects onto a base.
//! Nested objects merge field by field; every other value (including arrays)
//! is a leaf and the source side wins.

use serde_json::{Map, Value};

/// Merge `source` into `target` in place
pub fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, source_value) in source {
        if let (Some(Value::Object(target_child)), Value::Object(source_child)) =
            (target.get_mut(key), source_value)
        {
            deep_merge(target_child, source_child);
            continue;
        }
        target.insert(key.clone(), source_value.clone());
    }
}

/// Merge two mappings without touching either input
pub fn merged(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut output = target.clone();
    deep_merge(&mut output, source);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_nested_merge() {
        let target = object(json!({"a": 1, "b": {"c": 2, "e": {"f": 4, "g": 6}}}));
        let source = object(json!({"b": {"d": 3, "e": {"f": 5, "h": 7}}}));

        let output = merged(&target, &source);

        assert_eq!(
            Value::Object(output),
            json!({"a": 1, "b": {"c": 2, "d": 3, "e": {"f": 5, "g": 6, "h": 7}}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_wholesale() {
        let target = object(json!({"list": [1, 2, 3], "nested": {"tags": ["a", "b"]}}));
        let source = object(json!({"list": [9], "nested": {"tags": []}}));

        let output = merged(&target, &source);

        assert_eq!(
            Value::Object(output),
            json!({"list": [9], "nested": {"tags": []}})
        );
    }

    #[test]
    fn test_non_object_overwrites_object_and_back() {
        let target = object(json!({"a": {"x": 1}, "b": "text"}));
        let source = object(json!({"a": "flat", "b": {"y": 2}}));

        let output = merged(&target, &source);

        assert_eq!(Value::Object(output), json!({"a": "flat", "b": {"y": 2}}));
    }

    #[test]
    fn test_null_in_source_overwrites() {
        let target = object(json!({"a": 1}));
        let source = object(json!({"a": null}));
        assert_eq!(Value::Object(merged(&target, &source)), json!({"a": null}));
    }

    #[test]
    fn test_merged_leaves_inputs_untouched_and_is_deterministic() {
        let target = object(json!({"a": {"b": 1}}));
        let source = object(json!({"a": {"c": 2}}));
        let target_before = target.clone();
        let source_before = source.clone();

        let first = merged(&target, &source);
        let second = merged(&target, &source);

        assert_eq!(first, second);
        assert_eq!(target, target_before);
        assert_eq!(source, source_before);
    }

    #[test]
    fn test_deep_merge_in_place() {
        let mut target = object(json!({"keep": true}));
        deep_merge(&mut target, &object(json!({"add": {"n": 1}})));
        deep_merge(&mut target, &object(json!({"add": {"n": 1}})));
        assert_eq!(Value::Object(target), json!({"keep": true, "add": {"n": 1}}));
    }

    #[test]
    fn test_empty_source_is_identity() {
        let target = object(json!({"a": [1], "b": {"c": null}}));
        assert_eq!(merged(&target, &Map::new()), target);
    }
}
