//! Structurele diff van een instellingenboom ten opzichte van de standaardboom.

use serde_json::{Map, Value as JsonValue};

/// Sleutels van `live` waarvan de waarde (diep vergeleken) afwijkt van `base`.
///
/// Er wordt alleen gerecursed zolang beide kanten objecten zijn. Zodra een van
/// beide een array, scalar of `null` is, wordt de volledige waarde van `live`
/// overgenomen: één gewijzigd array-element levert dus de hele array op.
#[must_use]
pub fn deep_object_diff(live: &Map<String, JsonValue>, base: &JsonValue) -> Map<String, JsonValue> {
    let mut diff = Map::new();

    for (key, live_value) in live {
        let base_value = base.get(key);
        if base_value.is_some_and(|base_value| json_equal(live_value, base_value)) {
            continue;
        }

        match (live_value, base_value) {
            (JsonValue::Object(live_object), Some(nested @ JsonValue::Object(_))) => {
                diff.insert(
                    key.clone(),
                    JsonValue::Object(deep_object_diff(live_object, nested)),
                );
            }
            _ => {
                diff.insert(key.clone(), live_value.clone());
            }
        }
    }

    diff
}

/// Diepe gelijkheid waarbij getallen op hun f64-waarde vergeleken worden, zodat
/// `1` en `1.0` gelijk zijn.
#[must_use]
pub fn json_equal(left: &JsonValue, right: &JsonValue) -> bool {
    match (left, right) {
        (JsonValue::Number(a), JsonValue::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (JsonValue::Array(a), JsonValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| json_equal(a, b))
        }
        (JsonValue::Object(a), JsonValue::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| json_equal(value, other)))
        }
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn identical_trees_produce_empty_diff() {
        let tree = json!({ "range": { "xMin": -5.0 }, "scale": [1.0, 1.0, 0.5] });
        assert!(deep_object_diff(&object(tree.clone()), &tree).is_empty());
    }

    #[test]
    fn recurses_into_nested_records() {
        let base = json!({ "range": { "xMin": -5.0, "xMax": 5.0 }, "frozen": false });
        let live = json!({ "range": { "xMin": -5.0, "xMax": 8.0 }, "frozen": false });
        assert_eq!(
            JsonValue::Object(deep_object_diff(&object(live), &base)),
            json!({ "range": { "xMax": 8.0 } })
        );
    }

    #[test]
    fn changed_array_element_emits_whole_array() {
        let base = json!({ "camera": { "position": [-0.75, -1.5, 0.25] } });
        let live = json!({ "camera": { "position": [-0.75, -1.5, 0.3] } });
        assert_eq!(
            JsonValue::Object(deep_object_diff(&object(live), &base)),
            json!({ "camera": { "position": [-0.75, -1.5, 0.3] } })
        );
    }

    #[test]
    fn keys_missing_from_base_are_emitted() {
        let base = json!({ "camera": { "position": [0.0, 0.0, 1.5] } });
        let live = json!({ "camera": { "position": [0.0, 0.0, 1.5] }, "focus": 1.5 });
        assert_eq!(
            JsonValue::Object(deep_object_diff(&object(live), &base)),
            json!({ "focus": 1.5 })
        );
    }

    #[test]
    fn record_replacing_scalar_is_taken_verbatim() {
        let base = json!({ "offset": null });
        let live = json!({ "offset": { "x": 1 } });
        assert_eq!(
            JsonValue::Object(deep_object_diff(&object(live), &base)),
            json!({ "offset": { "x": 1 } })
        );
    }

    #[test]
    fn integer_and_float_forms_compare_equal() {
        assert!(json_equal(&json!({ "t": 0 }), &json!({ "t": 0.0 })));
        assert!(!json_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }
}
