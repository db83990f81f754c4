//! Instellingen van een demo: het getypeerde model, de standaardwaarden en het
//! samenvoegen van (gedeeltelijke) gebruikersinvoer tot een volledige configuratie.
//!
//! Resolutie faalt nooit. Ontbrekende of ongeldige velden vallen terug op de
//! standaardwaarde die bij de dimensionaliteit hoort.

pub mod defaults;
pub mod merge;
mod types;

use serde_json::{Map, Value as JsonValue};

use crate::color;

pub use types::{
    AxisLine, AxisScale, AxisSettings, AxisTicks, Camera, CurveSettings, Grids, Range,
    RangeBound, Settings, TicksFormat, TicksLabel,
};

/// Onveranderlijke momentopname van de standaardboom. Dient uitsluitend als
/// basis voor de diff bij het delen van een configuratie.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTree(JsonValue);

impl DefaultTree {
    #[must_use]
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }
}

/// Resultaat van [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: Settings,
    pub defaults: DefaultTree,
}

/// Serialiseert de instellingen naar de ongetypeerde boom die diff en merge gebruiken.
pub fn settings_tree(settings: &Settings) -> Result<JsonValue, serde_json::Error> {
    serde_json::to_value(settings)
}

/// Voegt gebruikersinstellingen samen met de berekende standaardwaarden.
#[must_use]
pub fn resolve(user: &JsonValue) -> ResolvedSettings {
    let two_dimensional = user
        .get("twoDimensional")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);

    let default_settings = defaults::default_settings(two_dimensional);
    let mut default_tree = settings_tree(&default_settings).unwrap_or_else(|error| {
        log::warn!("standaardinstellingen konden niet geserialiseerd worden: {error}");
        JsonValue::Null
    });
    // De basis claimt nooit twee dimensies: zo reist `twoDimensional: true`
    // altijd mee in de diff en kan de decoder de juiste standaardwaarden bouwen.
    if let Some(flag) = default_tree.get_mut("twoDimensional") {
        *flag = JsonValue::Bool(false);
    }

    let merged = merge::deep_merge(default_tree.clone(), user);
    let template = template_for(&merged, &default_tree, two_dimensional);
    let conformed = merge::conform(&merged, &template);

    let mut settings = typed_settings(conformed, &default_tree, &default_settings);

    settings.two_dimensional = two_dimensional;
    settings.from_url = user
        .get("fromURL")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false);
    settings.focus = Some(
        user.get("focus")
            .and_then(JsonValue::as_f64)
            .filter(|focus| focus.is_finite())
            .unwrap_or_else(|| settings.camera.distance()),
    );

    repair_curves(&mut settings, &default_settings);

    ResolvedSettings {
        settings,
        defaults: DefaultTree(default_tree),
    }
}

/// Zoals [`resolve`], maar vanaf JSON-tekst. Ongeldige JSON levert de standaardwaarden.
#[must_use]
pub fn resolve_str(source: &str) -> ResolvedSettings {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return resolve(&JsonValue::Object(Map::new()));
    }

    match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(value) => resolve(&value),
        Err(error) => {
            log::warn!("instellingen zijn geen geldige JSON: {error}");
            resolve(&JsonValue::Object(Map::new()))
        }
    }
}

/// Leest de gevormde boom als getypeerde instellingen. Lukt dat niet, dan
/// vallen alleen de secties terug op hun standaard die op zichzelf niet te
/// lezen zijn.
fn typed_settings(conformed: JsonValue, default_tree: &JsonValue, fallback: &Settings) -> Settings {
    let error = match serde_json::from_value::<Settings>(conformed.clone()) {
        Ok(settings) => return settings,
        Err(error) => error,
    };

    let (JsonValue::Object(mut sections), JsonValue::Object(default_sections)) =
        (conformed, default_tree)
    else {
        log::warn!("instellingen ongeldig, standaardwaarden worden gebruikt: {error}");
        return fallback.clone();
    };

    for (key, default_section) in default_sections {
        let Some(section) = sections.get(key) else {
            continue;
        };
        let mut candidate = default_sections.clone();
        candidate.insert(key.clone(), section.clone());
        if let Err(error) = serde_json::from_value::<Settings>(JsonValue::Object(candidate)) {
            log::warn!("sectie `{key}` ongeldig, standaardwaarde wordt gebruikt: {error}");
            sections.insert(key.clone(), default_section.clone());
        }
    }

    serde_json::from_value::<Settings>(JsonValue::Object(sections)).unwrap_or_else(|error| {
        log::warn!("instellingen ongeldig, standaardwaarden worden gebruikt: {error}");
        fallback.clone()
    })
}

/// De standaardboom, uitgebreid met een leeg curvesjabloon voor iedere curve die
/// alleen in de gebruikersinvoer voorkomt.
fn template_for(merged: &JsonValue, default_tree: &JsonValue, two_dimensional: bool) -> JsonValue {
    let mut template = default_tree.clone();

    let Some(user_curves) = merged.get("functions").and_then(JsonValue::as_object) else {
        return template;
    };
    let Some(template_curves) = template
        .get_mut("functions")
        .and_then(JsonValue::as_object_mut)
    else {
        return template;
    };

    for id in user_curves.keys() {
        if template_curves.contains_key(id) {
            continue;
        }
        match serde_json::to_value(defaults::blank_curve(id, two_dimensional)) {
            Ok(blank) => {
                template_curves.insert(id.clone(), blank);
            }
            Err(error) => log::warn!("curvesjabloon `{id}` mislukt: {error}"),
        }
    }

    template
}

/// Herstelt invarianten per curve: het id volgt de sleutel, de kleur is altijd
/// naar hex te herleiden en `tMin <= tMax`.
fn repair_curves(settings: &mut Settings, defaults: &Settings) {
    let two_dimensional = settings.two_dimensional;

    for (id, curve) in &mut settings.functions {
        let fallback = defaults
            .functions
            .get(id)
            .cloned()
            .unwrap_or_else(|| defaults::blank_curve(id, two_dimensional));

        curve.id.clone_from(id);

        if color::resolve_hex(&curve.color).is_none() {
            log::warn!(
                "onbekende kleur `{}` voor curve `{id}`, terug naar `{}`",
                curve.color,
                fallback.color
            );
            curve.color = fallback.color.clone();
        }

        if !curve.t_min.is_finite() || !curve.t_max.is_finite() || curve.t_min > curve.t_max {
            log::warn!(
                "parameterbereik [{}, {}] van curve `{id}` is ongeldig",
                curve.t_min,
                curve.t_max
            );
            curve.t_min = fallback.t_min;
            curve.t_max = fallback.t_max;
        }

        if !curve.t.is_finite() {
            curve.t = fallback.t;
        }
    }
}
