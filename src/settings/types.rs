//! Getypeerde instellingenboom van een demo.
//!
//! Sleutels worden in camelCase geserialiseerd zodat een gedeelde link exact
//! dezelfde vorm heeft als de instellingen die de JavaScript-host kent.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::swizzle::{Axis, PerAxis};

/// Volledige configuratie van één visualisatie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_option")]
    pub container_id: Option<String>,
    pub frozen: bool,
    pub zoom_enabled: bool,
    pub two_dimensional: bool,
    pub range: Range,
    pub scale: [f64; 3],
    pub camera: Camera,
    pub grids: Grids,
    pub axes: PerAxis<AxisSettings>,
    pub functions: IndexMap<String, CurveSettings>,
    /// Afstand van de camera tot de oorsprong. Ontbreekt in de standaardboom,
    /// zodat hij afgeleid wordt wanneer de gebruiker hem niet opgeeft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<f64>,
    /// Gezet door de decoder: de camerapositie komt dan al in rendererruimte binnen.
    #[serde(rename = "fromURL", default, skip_serializing)]
    pub from_url: bool,
}

impl Settings {
    /// De opgeslagen focus, of de norm van de camerapositie.
    #[must_use]
    pub fn focus(&self) -> f64 {
        self.focus.unwrap_or_else(|| self.camera.distance())
    }

    #[must_use]
    pub fn curve(&self, id: &str) -> Option<&CurveSettings> {
        self.functions.get(id)
    }

    pub fn curve_mut(&mut self, id: &str) -> Option<&mut CurveSettings> {
        self.functions.get_mut(id)
    }

    /// Assen die de demo tekent: `z` valt weg in de tweedimensionale modus.
    #[must_use]
    pub fn visible_axes(&self) -> &'static [Axis] {
        if self.two_dimensional {
            &[Axis::X, Axis::Y]
        } else {
            &Axis::SPATIAL
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Range {
    /// `[min, max]` per as, in gebruikersvolgorde.
    #[must_use]
    pub fn bounds(&self) -> [[f64; 2]; 3] {
        [
            [self.x_min, self.x_max],
            [self.y_min, self.y_max],
            [self.z_min, self.z_max],
        ]
    }

    pub fn bound_mut(&mut self, bound: RangeBound) -> &mut f64 {
        match bound {
            RangeBound::XMin => &mut self.x_min,
            RangeBound::XMax => &mut self.x_max,
            RangeBound::YMin => &mut self.y_min,
            RangeBound::YMax => &mut self.y_max,
            RangeBound::ZMin => &mut self.z_min,
            RangeBound::ZMax => &mut self.z_max,
        }
    }

    #[must_use]
    pub fn bound(&self, bound: RangeBound) -> f64 {
        match bound {
            RangeBound::XMin => self.x_min,
            RangeBound::XMax => self.x_max,
            RangeBound::YMin => self.y_min,
            RangeBound::YMax => self.y_max,
            RangeBound::ZMin => self.z_min,
            RangeBound::ZMax => self.z_max,
        }
    }
}

/// Eén van de zes grenzen van het venster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    XMin,
    XMax,
    YMin,
    YMax,
    ZMin,
    ZMax,
}

impl RangeBound {
    pub const ALL: [RangeBound; 6] = [
        Self::XMin,
        Self::XMax,
        Self::YMin,
        Self::YMax,
        Self::ZMin,
        Self::ZMax,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::XMin => "xMin",
            Self::XMax => "xMax",
            Self::YMin => "yMin",
            Self::YMax => "yMax",
            Self::ZMin => "zMin",
            Self::ZMax => "zMax",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bound| bound.key() == key)
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::XMin | Self::XMax => Axis::X,
            Self::YMin | Self::YMax => Axis::Y,
            Self::ZMin | Self::ZMax => Axis::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: [f64; 3],
}

impl Camera {
    #[must_use]
    pub fn distance(&self) -> f64 {
        let [x, y, z] = self.position;
        (x * x + y * y + z * z).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grids {
    pub xy: bool,
    pub xz: bool,
    pub yz: bool,
}

/// Weergave-opties voor één as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSettings {
    pub axis_label: String,
    pub label_offset: [f64; 3],
    pub axis: AxisLine,
    pub scale: AxisScale,
    pub ticks: AxisTicks,
    pub ticks_format: TicksFormat,
    pub ticks_label: TicksLabel,
}

/// `axis` is de as van de renderer waarop deze gebruikersas ligt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLine {
    pub width: f64,
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub divide: u32,
    pub nice: bool,
    pub zero: bool,
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTicks {
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TicksFormat {
    pub digits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TicksLabel {
    #[serde(default, deserialize_with = "lenient_option")]
    pub offset: Option<[f64; 3]>,
}

/// Leest een optioneel veld. Een waarde van de verkeerde vorm telt als
/// afwezig, zodat de rest van de boom bruikbaar blijft.
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error) => {
            log::warn!("optioneel veld genegeerd: {error}");
            Ok(None)
        }
    }
}

/// Eén parametrische functie `t -> (x, y, z)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSettings {
    pub id: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub animate: bool,
    pub display_equation: bool,
    pub t: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub color: String,
}

impl CurveSettings {
    /// Expressie van een ruimtelijke component.
    #[must_use]
    pub fn expression(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z | Axis::W => &self.z,
        }
    }

    pub fn expression_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z | Axis::W => &mut self.z,
        }
    }

    /// Geen van de drie expressies is leeg.
    #[must_use]
    pub fn has_expressions(&self) -> bool {
        Axis::SPATIAL
            .iter()
            .all(|axis| !self.expression(*axis).trim().is_empty())
    }
}
