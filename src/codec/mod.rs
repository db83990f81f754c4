//! Delen van een configuratie via de URL.
//!
//! Een configuratie wordt gedeeld als diff ten opzichte van de standaardboom,
//! geserialiseerd als JSON en gecodeerd in base64 (`?settings=<token>`).

pub mod diff;
pub mod token;

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

pub use diff::{deep_object_diff, json_equal};
pub use token::{FROM_LINK_KEY, decode, encode, settings_diff};

/// Naam van de query-parameter die het token draagt.
pub const SETTINGS_PARAM: &str = "settings";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("instellingentoken is leeg")]
    Empty,
    #[error("instellingentoken is geen geldige base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("instellingentoken bevat geen geldige JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("instellingentoken beschrijft geen object")]
    NotAnObject,
}

/// Decodeert een token; ieder probleem levert een leeg object op, zodat de
/// pagina terugvalt op de volledige standaardwaarden.
#[must_use]
pub fn decode_or_default(token: &str) -> JsonValue {
    match decode(token) {
        Ok(settings) => settings,
        Err(error) => {
            log::warn!("gedeelde instellingen genegeerd: {error}");
            JsonValue::Object(Map::new())
        }
    }
}

/// Bouwt de deel-URL: de huidige locatie zonder query, plus het token.
#[must_use]
pub fn share_url(href: &str, token: &str) -> String {
    let base = href.split('?').next().unwrap_or(href);
    format!("{base}?{SETTINGS_PARAM}={token}")
}

/// Zoekt de eerste `settings`-parameter in een query-string (met of zonder `?`).
#[must_use]
pub fn settings_param(query: &str) -> Option<String> {
    query_param(query, SETTINGS_PARAM)
}

/// Eerste waarde van `name` in de query, percent-gedecodeerd.
#[must_use]
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key) == name).then(|| percent_decode(value))
        })
}

/// Percent-decodering zoals `decodeURIComponent`: `+` blijft een `+`, ongeldige
/// escapes blijven letterlijk staan.
fn percent_decode(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%' && index + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[index + 1]), hex_digit(bytes[index + 2])) {
                decoded.push(high << 4 | low);
                index += 3;
                continue;
            }
        }
        decoded.push(bytes[index]);
        index += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn share_url_replaces_existing_query() {
        assert_eq!(
            share_url("https://demo.example/curves.html?settings=old", "abc="),
            "https://demo.example/curves.html?settings=abc="
        );
        assert_eq!(
            share_url("https://demo.example/curves.html", "xyz"),
            "https://demo.example/curves.html?settings=xyz"
        );
    }

    #[test]
    fn finds_first_settings_param() {
        assert_eq!(
            settings_param("?a=1&settings=eyJhIjoxfQ%3D%3D&settings=other").as_deref(),
            Some("eyJhIjoxfQ==")
        );
        assert_eq!(settings_param("a=1&b=2"), None);
        assert_eq!(settings_param(""), None);
    }

    #[test]
    fn percent_decoding_keeps_plus_and_invalid_escapes() {
        assert_eq!(percent_decode("a+b%2Fc"), "a+b/c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn malformed_token_falls_back_to_empty_settings() {
        assert_eq!(decode_or_default("%%%"), json!({}));
    }
}
