//! Wijzigingen vanuit het bedieningspaneel.
//!
//! Iedere bewerking die het paneel kan doen is een [`SettingsUpdate`]. [`apply`]
//! past hem toe op de instellingen en meldt welk deel van de scène opnieuw
//! opgebouwd moet worden. De dimensionaliteit ligt vast en heeft geen variant.

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::color;
use crate::settings::{CurveSettings, RangeBound, Settings};
use crate::swizzle::Axis;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    RangeBound { bound: RangeBound, value: f64 },
    ZoomEnabled(bool),
    Frozen(bool),
    /// Camerapositie zoals de renderer hem rapporteert (rendererruimte).
    CameraPosition([f64; 3]),
    Expression {
        curve: String,
        axis: Axis,
        expression: String,
    },
    Parameter { curve: String, value: f64 },
    ParameterMin { curve: String, value: f64 },
    ParameterMax { curve: String, value: f64 },
    Color { curve: String, color: String },
    Animate { curve: String, animate: bool },
    DisplayEquation { curve: String, display: bool },
}

/// Welk deel van de scène na een wijziging opnieuw getekend moet worden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "curve", rename_all = "camelCase")]
pub enum Redraw {
    /// Venster en aslabels.
    Scene,
    /// Camera-instellingen van de host (zoom, bevriezen, positie).
    Camera,
    /// De volledige visualisatie van één curve.
    Curve(String),
    /// Alleen het punt en de positievector van één curve.
    CurveParameter(String),
    /// De animatie van één curve start of stopt.
    Animation(String),
    /// Alleen het paneel verandert.
    Panel,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("onbekend instellingenpad `{0}`")]
    UnknownPath(String),
    #[error("waarde voor `{path}` moet {expected} zijn")]
    InvalidValue { path: String, expected: &'static str },
    #[error("waarde voor `{0}` moet een eindig getal zijn")]
    NonFinite(String),
    #[error("onbekende curve `{0}`")]
    UnknownCurve(String),
    #[error("onbekende kleur `{0}`")]
    UnknownColor(String),
    #[error("parameterbereik van curve `{curve}` wordt omgekeerd: tMin {t_min} > tMax {t_max}")]
    InvertedParameterRange { curve: String, t_min: f64, t_max: f64 },
}

impl SettingsUpdate {
    /// Vertaalt een paneelbinding (`range.xMin`, `functions.a.tMax`, ...) en
    /// haar nieuwe waarde naar een update.
    pub fn from_path(path: &str, value: &JsonValue) -> Result<Self, UpdateError> {
        if let Some(key) = path.strip_prefix("range.") {
            let bound =
                RangeBound::from_key(key).ok_or_else(|| UpdateError::UnknownPath(path.to_owned()))?;
            return Ok(Self::RangeBound {
                bound,
                value: number(path, value)?,
            });
        }

        if let Some(rest) = path.strip_prefix("functions.") {
            let (curve, field) = rest
                .rsplit_once('.')
                .ok_or_else(|| UpdateError::UnknownPath(path.to_owned()))?;
            return curve_update(path, curve.to_owned(), field, value);
        }

        match path {
            "zoomEnabled" => Ok(Self::ZoomEnabled(boolean(path, value)?)),
            "frozen" => Ok(Self::Frozen(boolean(path, value)?)),
            "camera.position" => Ok(Self::CameraPosition(vector(path, value)?)),
            _ => Err(UpdateError::UnknownPath(path.to_owned())),
        }
    }
}

fn curve_update(
    path: &str,
    curve: String,
    field: &str,
    value: &JsonValue,
) -> Result<SettingsUpdate, UpdateError> {
    let update = match field {
        "x" | "y" | "z" => SettingsUpdate::Expression {
            curve,
            axis: match field {
                "x" => Axis::X,
                "y" => Axis::Y,
                _ => Axis::Z,
            },
            expression: text(path, value)?,
        },
        "t" => SettingsUpdate::Parameter {
            curve,
            value: number(path, value)?,
        },
        "tMin" => SettingsUpdate::ParameterMin {
            curve,
            value: number(path, value)?,
        },
        "tMax" => SettingsUpdate::ParameterMax {
            curve,
            value: number(path, value)?,
        },
        "color" => SettingsUpdate::Color {
            curve,
            color: text(path, value)?,
        },
        "animate" => SettingsUpdate::Animate {
            curve,
            animate: boolean(path, value)?,
        },
        "displayEquation" => SettingsUpdate::DisplayEquation {
            curve,
            display: boolean(path, value)?,
        },
        _ => return Err(UpdateError::UnknownPath(path.to_owned())),
    };
    Ok(update)
}

fn number(path: &str, value: &JsonValue) -> Result<f64, UpdateError> {
    let number = match value {
        JsonValue::Number(number) => number.as_f64(),
        // Tekstvelden van het paneel leveren getallen soms als tekst aan.
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| UpdateError::InvalidValue {
        path: path.to_owned(),
        expected: "een getal",
    })
}

fn boolean(path: &str, value: &JsonValue) -> Result<bool, UpdateError> {
    value.as_bool().ok_or_else(|| UpdateError::InvalidValue {
        path: path.to_owned(),
        expected: "een boolean",
    })
}

fn text(path: &str, value: &JsonValue) -> Result<String, UpdateError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| UpdateError::InvalidValue {
            path: path.to_owned(),
            expected: "tekst",
        })
}

fn vector(path: &str, value: &JsonValue) -> Result<[f64; 3], UpdateError> {
    let invalid = || UpdateError::InvalidValue {
        path: path.to_owned(),
        expected: "een vector van drie getallen",
    };
    let items = value.as_array().filter(|items| items.len() == 3).ok_or_else(invalid)?;

    let mut vector = [0.0; 3];
    for (slot, item) in vector.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(invalid)?;
    }
    Ok(vector)
}

fn ensure_finite(path: &str, value: f64) -> Result<f64, UpdateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UpdateError::NonFinite(path.to_owned()))
    }
}

fn curve_mut<'a>(settings: &'a mut Settings, id: &str) -> Result<&'a mut CurveSettings, UpdateError> {
    settings
        .curve_mut(id)
        .ok_or_else(|| UpdateError::UnknownCurve(id.to_owned()))
}

/// Past een update toe. Bij een fout blijven de instellingen onaangeroerd.
pub fn apply(settings: &mut Settings, update: SettingsUpdate) -> Result<Redraw, UpdateError> {
    match update {
        SettingsUpdate::RangeBound { bound, value } => {
            let value = ensure_finite(&format!("range.{}", bound.key()), value)?;
            *settings.range.bound_mut(bound) = value;
            Ok(Redraw::Scene)
        }
        SettingsUpdate::ZoomEnabled(enabled) => {
            settings.zoom_enabled = enabled;
            Ok(Redraw::Camera)
        }
        SettingsUpdate::Frozen(frozen) => {
            settings.frozen = frozen;
            Ok(Redraw::Camera)
        }
        SettingsUpdate::CameraPosition(position) => {
            for component in position {
                ensure_finite("camera.position", component)?;
            }
            settings.camera.position = position;
            // Vanaf nu staat de positie in rendererruimte.
            settings.from_url = true;
            Ok(Redraw::Camera)
        }
        SettingsUpdate::Expression {
            curve,
            axis,
            expression,
        } => {
            let target = curve_mut(settings, &curve)?;
            *target.expression_mut(axis) = expression;
            Ok(Redraw::Curve(curve))
        }
        SettingsUpdate::Parameter { curve, value } => {
            let target = curve_mut(settings, &curve)?;
            let value = ensure_finite(&format!("functions.{curve}.t"), value)?;
            target.t = clamp(value, target.t_min, target.t_max);
            Ok(Redraw::CurveParameter(curve))
        }
        SettingsUpdate::ParameterMin { curve, value } => {
            let target = curve_mut(settings, &curve)?;
            let value = ensure_finite(&format!("functions.{curve}.tMin"), value)?;
            let t_max = target.t_max;
            set_parameter_range(target, value, t_max)?;
            Ok(Redraw::Curve(curve))
        }
        SettingsUpdate::ParameterMax { curve, value } => {
            let target = curve_mut(settings, &curve)?;
            let value = ensure_finite(&format!("functions.{curve}.tMax"), value)?;
            let t_min = target.t_min;
            set_parameter_range(target, t_min, value)?;
            Ok(Redraw::Curve(curve))
        }
        SettingsUpdate::Color { curve, color } => {
            let target = curve_mut(settings, &curve)?;
            if color::resolve_hex(&color).is_none() {
                return Err(UpdateError::UnknownColor(color));
            }
            target.color = color;
            Ok(Redraw::Curve(curve))
        }
        SettingsUpdate::Animate { curve, animate } => {
            curve_mut(settings, &curve)?.animate = animate;
            Ok(Redraw::Animation(curve))
        }
        SettingsUpdate::DisplayEquation { curve, display } => {
            curve_mut(settings, &curve)?.display_equation = display;
            Ok(Redraw::Panel)
        }
    }
}

fn set_parameter_range(curve: &mut CurveSettings, t_min: f64, t_max: f64) -> Result<(), UpdateError> {
    if t_min > t_max {
        return Err(UpdateError::InvertedParameterRange {
            curve: curve.id.clone(),
            t_min,
            t_max,
        });
    }
    curve.t_min = t_min;
    curve.t_max = t_max;
    curve.t = clamp(curve.t, t_min, t_max);
    Ok(())
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Keert de `animate`-vlag om van iedere curve waarvoor `drawable` waar is.
/// Geeft de ids van de omgezette curves terug.
pub fn toggle_all_animations(settings: &mut Settings, drawable: impl Fn(&str) -> bool) -> Vec<String> {
    let mut toggled = Vec::new();
    for (id, curve) in &mut settings.functions {
        if drawable(id) {
            curve.animate = !curve.animate;
            toggled.push(id.clone());
        }
    }
    toggled
}
