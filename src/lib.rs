#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod codec;
pub mod color;
pub mod curve;
pub mod demo;
pub mod expression;
pub mod panel;
pub mod scene;
pub mod settings;
pub mod state;
pub mod swizzle;

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

pub use demo::{Demo, DemoError};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for the page script.
#[wasm_bindgen]
pub struct Engine {
    demo: Demo,
}

#[wasm_bindgen]
impl Engine {
    /// Bouw een demo uit instellingen in JSON; leeg of ongeldig levert de standaarddemo.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Engine {
        let demo = match settings_json.as_deref() {
            Some(source) => Demo::from_json(source),
            None => Demo::new(&JsonValue::Object(serde_json::Map::new())),
        };
        Engine { demo }
    }

    /// Bouw een demo uit een gedeeld `settings`-token.
    #[wasm_bindgen]
    pub fn from_token(token: &str) -> Engine {
        Engine {
            demo: Demo::from_token(token),
        }
    }

    /// Bouw een demo uit `window.location.search`.
    #[wasm_bindgen]
    pub fn from_query(query: &str) -> Engine {
        debug_log!("demo uit query: {query}");
        Engine {
            demo: Demo::from_query(query),
        }
    }

    #[wasm_bindgen]
    pub fn is_two_dimensional(&self) -> bool {
        self.demo.settings().two_dimensional
    }

    /// De volledige scène als lijst van tekengroepen.
    #[wasm_bindgen]
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        to_js(&self.demo.scene())
    }

    /// Haalt de scène op in een "diff" formaat ten opzichte van wat al getekend is.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.demo.render())
    }

    /// Beschrijving van het bedieningspaneel.
    #[wasm_bindgen]
    pub fn panel(&self) -> Result<JsValue, JsValue> {
        to_js(&self.demo.panel())
    }

    /// Verwerk een wijziging uit het paneel: `path` is de binding van het element.
    #[wasm_bindgen]
    pub fn update(&mut self, path: &str, value: JsValue) -> Result<JsValue, JsValue> {
        let value: JsonValue = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        let outcome = self.demo.update(path, &value).map_err(to_js_error)?;
        to_js(&outcome)
    }

    /// Eén timerslag voor de animatie van een curve.
    #[wasm_bindgen]
    pub fn tick(&mut self, curve_id: &str) -> Result<JsValue, JsValue> {
        let outcome = self.demo.tick(curve_id).map_err(to_js_error)?;
        to_js(&outcome)
    }

    /// Interval in milliseconden van een lopende animatie.
    #[wasm_bindgen]
    pub fn animation_interval(&self, curve_id: &str) -> Option<f64> {
        self.demo.animation_state(curve_id).interval_ms
    }

    /// Animaties die bij het laden meteen moeten starten.
    #[wasm_bindgen]
    pub fn animations(&self) -> Result<JsValue, JsValue> {
        to_js(&self.demo.animations())
    }

    #[wasm_bindgen]
    pub fn toggle_all_animations(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.demo.toggle_all_animations())
    }

    /// Deel-URL; `camera` is de positie van de renderercamera.
    #[wasm_bindgen]
    pub fn share_url(&mut self, href: &str, camera: Option<Vec<f64>>) -> Result<String, JsValue> {
        let camera = camera_position(camera)?;
        self.demo.share_url(href, camera).map_err(to_js_error)
    }

    /// Deel-URL met verborgen vergelijkingen.
    #[wasm_bindgen]
    pub fn share_url_hidden(
        &mut self,
        href: &str,
        camera: Option<Vec<f64>>,
    ) -> Result<String, JsValue> {
        let camera = camera_position(camera)?;
        self.demo.share_url_hidden(href, camera).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.demo.settings_json().map_err(to_js_error)
    }
}

impl Engine {
    /// Toegang tot de onderliggende demo, voor native gebruik.
    #[must_use]
    pub fn demo(&self) -> &Demo {
        &self.demo
    }
}

fn camera_position(camera: Option<Vec<f64>>) -> Result<Option<[f64; 3]>, JsValue> {
    match camera {
        None => Ok(None),
        Some(values) => <[f64; 3]>::try_from(values.as_slice())
            .map(Some)
            .map_err(|_| js_error("camerapositie moet precies drie getallen bevatten")),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, camera_position};

    #[test]
    fn camera_position_requires_three_components() {
        assert_eq!(camera_position(None).ok(), Some(None));
        assert_eq!(
            camera_position(Some(vec![1.0, 2.0, 3.0])).ok(),
            Some(Some([1.0, 2.0, 3.0]))
        );
        assert!(camera_position(Some(vec![1.0, 2.0])).is_err());
    }

    #[test]
    fn engine_without_settings_uses_defaults() {
        let engine = Engine::new(None);
        assert!(!engine.is_two_dimensional());
        assert_eq!(engine.animation_interval("a"), Some(10.0));
        assert_eq!(engine.animation_interval("b"), None);
    }

    #[test]
    fn engine_accepts_settings_json() {
        let engine = Engine::new(Some(r#"{ "twoDimensional": true }"#.to_owned()));
        assert!(engine.is_two_dimensional());
        assert_eq!(engine.demo().settings().range.x_min, -10.0);
    }

    #[test]
    fn share_url_rejects_short_camera() {
        let mut engine = Engine::new(None);
        assert!(engine.share_url("https://demo.example/", Some(vec![0.0])).is_err());

        let url = engine
            .share_url("https://demo.example/", Some(vec![0.0, 1.0, 2.0]))
            .expect("share url");
        let restored = Engine::from_query(url.split_once('?').map_or("", |(_, query)| query));
        assert_eq!(restored.demo().settings().camera.position, [0.0, 1.0, 2.0]);
    }
}
