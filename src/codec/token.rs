//! Compacte, deelbare representatie van een configuratie: base64 van de JSON-diff.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value as JsonValue};

use super::CodecError;
use super::diff::deep_object_diff;
use crate::settings::{DefaultTree, Settings, settings_tree};

/// Sleutel waarmee gedecodeerde instellingen gemarkeerd worden.
pub const FROM_LINK_KEY: &str = "fromURL";

/// De diff van de instellingen ten opzichte van de standaardboom.
pub fn settings_diff(
    settings: &Settings,
    defaults: &DefaultTree,
) -> Result<Map<String, JsonValue>, CodecError> {
    match settings_tree(settings)? {
        JsonValue::Object(live) => Ok(deep_object_diff(&live, defaults.as_value())),
        _ => Err(CodecError::NotAnObject),
    }
}

/// Codeert de diff als base64-token, geschikt voor een URL-parameter.
pub fn encode(settings: &Settings, defaults: &DefaultTree) -> Result<String, CodecError> {
    let diff = settings_diff(settings, defaults)?;
    let json = serde_json::to_string(&JsonValue::Object(diff))?;
    Ok(STANDARD.encode(json))
}

/// Decodeert een token tot gedeeltelijke instellingen, gemarkeerd met `fromURL`.
pub fn decode(token: &str) -> Result<JsonValue, CodecError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(CodecError::Empty);
    }

    let bytes = STANDARD.decode(trimmed)?;
    let value: JsonValue = serde_json::from_slice(&bytes)?;

    let JsonValue::Object(mut settings) = value else {
        return Err(CodecError::NotAnObject);
    };
    settings.insert(FROM_LINK_KEY.to_owned(), JsonValue::Bool(true));
    Ok(JsonValue::Object(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::resolve;
    use serde_json::json;

    #[test]
    fn defaults_encode_only_focus() {
        let resolved = resolve(&json!({}));
        let diff = settings_diff(&resolved.settings, &resolved.defaults).expect("diff");
        let keys: Vec<&String> = diff.keys().collect();
        assert_eq!(keys, ["focus"]);
    }

    #[test]
    fn round_trip_restores_changed_fields() {
        let mut resolved = resolve(&json!({ "twoDimensional": true }));
        resolved.settings.range.x_max = 12.0;
        resolved.settings.functions["b"].x = "t".to_owned();
        resolved.settings.camera.position = [0.0, 0.5, 1.25];

        let expected = settings_diff(&resolved.settings, &resolved.defaults).expect("diff");
        let token = encode(&resolved.settings, &resolved.defaults).expect("encode");
        let mut decoded = decode(&token).expect("decode");

        let object = decoded.as_object_mut().expect("object");
        assert_eq!(object.remove(FROM_LINK_KEY), Some(JsonValue::Bool(true)));
        assert_eq!(*object, expected);
        assert_eq!(object["range"], json!({ "xMax": 12.0 }));
        assert_eq!(object["camera"], json!({ "position": [0.0, 0.5, 1.25] }));
        assert_eq!(object["twoDimensional"], json!(true));
    }

    #[test]
    fn decoding_rejects_garbage() {
        assert!(matches!(decode(""), Err(CodecError::Empty)));
        assert!(matches!(decode("!!!"), Err(CodecError::Base64(_))));
        let not_json = STANDARD.encode("not json");
        assert!(matches!(decode(&not_json), Err(CodecError::Json(_))));
        let array = STANDARD.encode("[1,2,3]");
        assert!(matches!(decode(&array), Err(CodecError::NotAnObject)));
    }

    #[test]
    fn token_uses_standard_alphabet() {
        // `window.btoa('{"a":1}')`
        let decoded = decode("eyJhIjoxfQ==").expect("decode");
        assert_eq!(decoded, json!({ "a": 1, "fromURL": true }));
    }
}
