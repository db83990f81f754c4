//! Diep samenvoegen van ongetypeerde instellingenbomen.

use serde_json::{Map, Value as JsonValue};

/// Voegt `overlay` samen over `base`.
///
/// Objecten worden sleutel voor sleutel recursief samengevoegd. Arrays en
/// scalaire waarden uit `overlay` vervangen de basiswaarde volledig; er is geen
/// samenvoeging per element. `null` in `overlay` telt als afwezig.
#[must_use]
pub fn deep_merge(base: JsonValue, overlay: &JsonValue) -> JsonValue {
    match (base, overlay) {
        (JsonValue::Object(mut target), JsonValue::Object(source)) => {
            for (key, value) in source {
                if value.is_null() {
                    continue;
                }
                // in place, so the key keeps its position
                match target.get_mut(key) {
                    Some(existing) => {
                        let previous = std::mem::take(existing);
                        *existing = deep_merge(previous, value);
                    }
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
            JsonValue::Object(target)
        }
        (base, JsonValue::Null) => base,
        (_, replacement) => replacement.clone(),
    }
}

/// Dwingt `value` in de vorm van `template`.
///
/// Iedere bladwaarde waarvan het JSON-type niet overeenkomt met het sjabloon
/// wordt vervangen door de sjabloonwaarde, zodat een ongeldig veld terugvalt op
/// zijn standaard zonder de rest van de boom te verliezen. Sleutels die het
/// sjabloon niet kent vallen weg. Een `null` in het sjabloon accepteert alles;
/// het getypeerde optionele veld beslist daarna of de waarde bruikbaar is.
#[must_use]
pub fn conform(value: &JsonValue, template: &JsonValue) -> JsonValue {
    match (value, template) {
        (JsonValue::Object(source), JsonValue::Object(shape)) => {
            let mut conformed = Map::new();
            for (key, fallback) in shape {
                let entry = match source.get(key) {
                    Some(candidate) => conform(candidate, fallback),
                    None => fallback.clone(),
                };
                conformed.insert(key.clone(), entry);
            }
            JsonValue::Object(conformed)
        }
        (candidate, JsonValue::Null) => candidate.clone(),
        (JsonValue::Array(items), JsonValue::Array(shape)) => {
            let compatible = items.len() == shape.len()
                && items
                    .iter()
                    .zip(shape)
                    .all(|(item, expected)| same_kind(item, expected));
            if compatible {
                JsonValue::Array(items.clone())
            } else {
                template.clone()
            }
        }
        (candidate, expected) if same_kind(candidate, expected) => candidate.clone(),
        (_, fallback) => fallback.clone(),
    }
}

fn same_kind(value: &JsonValue, expected: &JsonValue) -> bool {
    match (value, expected) {
        (JsonValue::Number(number), JsonValue::Number(shape)) => {
            if shape.is_u64() {
                number.is_u64()
            } else {
                true
            }
        }
        (JsonValue::String(_), JsonValue::String(_))
        | (JsonValue::Bool(_), JsonValue::Bool(_))
        | (JsonValue::Object(_), JsonValue::Object(_))
        | (_, JsonValue::Null) => true,
        (JsonValue::Array(items), JsonValue::Array(shape)) => {
            items.len() == shape.len()
                && items
                    .iter()
                    .zip(shape)
                    .all(|(item, expected)| same_kind(item, expected))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_nested_records_key_by_key() {
        let base = json!({ "range": { "xMin": -5.0, "xMax": 5.0 }, "frozen": false });
        let merged = deep_merge(base, &json!({ "range": { "xMin": -2.0 } }));
        assert_eq!(
            merged,
            json!({ "range": { "xMin": -2.0, "xMax": 5.0 }, "frozen": false })
        );
    }

    #[test]
    fn arrays_replace_instead_of_merging() {
        let base = json!({ "camera": { "position": [-0.75, -1.5, 0.25] } });
        let merged = deep_merge(base, &json!({ "camera": { "position": [1.0] } }));
        assert_eq!(merged, json!({ "camera": { "position": [1.0] } }));
    }

    #[test]
    fn null_overlay_keeps_default() {
        let base = json!({ "frozen": true });
        let merged = deep_merge(base, &json!({ "frozen": null, "extra": 1 }));
        assert_eq!(merged, json!({ "frozen": true, "extra": 1 }));
    }

    #[test]
    fn conform_replaces_mistyped_leaves_only() {
        let template = json!({
            "range": { "xMin": -5.0, "xMax": 5.0 },
            "camera": { "position": [0.0, 0.0, 1.5] },
            "containerId": null,
        });
        let value = json!({
            "range": { "xMin": "wide", "xMax": 7 },
            "camera": { "position": [1.0, "up", 2.0] },
            "containerId": "plot",
            "unknown": true,
        });

        assert_eq!(
            conform(&value, &template),
            json!({
                "range": { "xMin": -5.0, "xMax": 7 },
                "camera": { "position": [0.0, 0.0, 1.5] },
                "containerId": "plot",
            })
        );
    }

    #[test]
    fn conform_rejects_fractional_integers() {
        let template = json!({ "divide": 10 });
        assert_eq!(conform(&json!({ "divide": 2.5 }), &template), template);
        assert_eq!(
            conform(&json!({ "divide": 4 }), &template),
            json!({ "divide": 4 })
        );
    }
}
