//! Herordenen van assen tussen de gebruikersconventie en die van de renderer.
//!
//! De voorwaartse richting zet een waarde uit gebruikersruimte om naar de
//! asvolgorde van de render-bibliotheek. Dezelfde swizzle nogmaals toepassen
//! brengt een waarde uit de renderer terug naar gebruikersruimte; voor de twee
//! volgordes die de demo gebruikt (`xyz` en `yzx`) is dat precies de inverse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Benoemde componenten van een vector. `W` is het zwakke vierde kanaal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    pub const SPATIAL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
    const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::W];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::W => 3,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::W => "w",
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            'w' => Some(Self::W),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwizzleError {
    #[error("swizzle-volgorde moet 3 of 4 assen bevatten, kreeg `{0}`")]
    Length(String),
    #[error("onbekende as `{1}` in swizzle-volgorde `{0}`")]
    UnknownAxis(String, char),
    #[error("as `{1}` komt meerdere keren voor in swizzle-volgorde `{0}`")]
    Repeated(String, char),
    #[error("het `w`-kanaal mag alleen als vierde as voorkomen in `{0}`")]
    MisplacedW(String),
}

/// Een gevalideerde permutatie zoals `"yzx"`.
///
/// De eerste drie assen vormen altijd een permutatie van `x`, `y` en `z`; een
/// optionele vierde letter is het `w`-kanaal, dat alleen door ongetypeerde
/// waarden ([`SwizzleOrder::swizzle_value`]) wordt meegenomen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwizzleOrder {
    spatial: [Axis; 3],
    weak_w: bool,
}

impl SwizzleOrder {
    /// Volgorde van de tweedimensionale modus: de renderer gebruikt dezelfde assen.
    pub const IDENTITY: Self = Self {
        spatial: [Axis::X, Axis::Y, Axis::Z],
        weak_w: false,
    };

    /// Volgorde van de driedimensionale modus: de z-as van de gebruiker wijst omhoog.
    pub const CYCLIC: Self = Self {
        spatial: [Axis::Y, Axis::Z, Axis::X],
        weak_w: false,
    };

    #[must_use]
    pub fn for_dimensionality(two_dimensional: bool) -> Self {
        if two_dimensional {
            Self::IDENTITY
        } else {
            Self::CYCLIC
        }
    }

    fn axes(&self) -> impl Iterator<Item = Axis> + '_ {
        self.spatial
            .iter()
            .copied()
            .chain(self.weak_w.then_some(Axis::W))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        if self.weak_w { 4 } else { 3 }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Herordent een array: `out[j] = in[order[j]]`.
    #[must_use]
    pub fn swizzle_array<T: Clone>(&self, values: &[T; 3]) -> [T; 3] {
        let [a, b, c] = self.spatial;
        [
            values[a.index()].clone(),
            values[b.index()].clone(),
            values[c.index()].clone(),
        ]
    }

    /// Herordent een record per as met dezelfde semantiek als [`Self::swizzle_array`].
    #[must_use]
    pub fn swizzle_axes<T: Clone>(&self, values: &PerAxis<T>) -> PerAxis<T> {
        let [a, b, c] = self.spatial;
        PerAxis {
            x: values.get(a).clone(),
            y: values.get(b).clone(),
            z: values.get(c).clone(),
        }
    }

    /// Herordent een ongetypeerde JSON-waarde. Arrays en objecten volgen exact
    /// dezelfde permutatie; ontbrekende componenten worden `null`. Andere
    /// waarden worden ongewijzigd teruggegeven.
    #[must_use]
    pub fn swizzle_value(&self, value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::Array(items) => JsonValue::Array(
                self.axes()
                    .map(|axis| items.get(axis.index()).cloned().unwrap_or(JsonValue::Null))
                    .collect(),
            ),
            JsonValue::Object(map) => {
                let mut swizzled = Map::new();
                for (target, source) in Axis::ALL.iter().zip(self.axes()) {
                    let entry = map.get(source.name()).cloned().unwrap_or(JsonValue::Null);
                    swizzled.insert(target.name().to_owned(), entry);
                }
                JsonValue::Object(swizzled)
            }
            other => other.clone(),
        }
    }

    /// Renderer → gebruiker: dezelfde swizzle nogmaals toegepast.
    #[must_use]
    pub fn unswizzle_array<T: Clone>(&self, values: &[T; 3]) -> [T; 3] {
        self.swizzle_array(&self.swizzle_array(values))
    }

    #[must_use]
    pub fn unswizzle_axes<T: Clone>(&self, values: &PerAxis<T>) -> PerAxis<T> {
        self.swizzle_axes(&self.swizzle_axes(values))
    }
}

impl Default for SwizzleOrder {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FromStr for SwizzleOrder {
    type Err = SwizzleError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = source.trim().chars().collect();
        if chars.len() != 3 && chars.len() != 4 {
            return Err(SwizzleError::Length(source.to_owned()));
        }

        let mut axes = Vec::with_capacity(chars.len());
        for ch in chars {
            let axis = Axis::from_char(ch.to_ascii_lowercase())
                .ok_or_else(|| SwizzleError::UnknownAxis(source.to_owned(), ch))?;
            if axes.contains(&axis) {
                return Err(SwizzleError::Repeated(source.to_owned(), ch));
            }
            axes.push(axis);
        }

        if axes[..3].contains(&Axis::W) {
            return Err(SwizzleError::MisplacedW(source.to_owned()));
        }

        Ok(Self {
            spatial: [axes[0], axes[1], axes[2]],
            weak_w: axes.len() == 4,
        })
    }
}

impl fmt::Display for SwizzleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            f.write_str(axis.name())?;
        }
        Ok(())
    }
}

impl Serialize for SwizzleOrder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Een waarde per ruimtelijke as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerAxis<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> PerAxis<T> {
    pub fn from_fn(mut build: impl FnMut(Axis) -> T) -> Self {
        Self {
            x: build(Axis::X),
            y: build(Axis::Y),
            z: build(Axis::Z),
        }
    }

    /// Panics only for [`Axis::W`], which a per-axis record never carries.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
            Axis::W => unreachable!("PerAxis heeft geen w-kanaal"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        [(Axis::X, &self.x), (Axis::Y, &self.y), (Axis::Z, &self.z)].into_iter()
    }
}
