//! Gecompileerde parametrische curves en het register dat bijhoudt welke
//! curves tekenbaar zijn.

use std::collections::HashMap;

use thiserror::Error;

use crate::expression::{self, CompiledExpression, ExpressionError, PARAMETER};
use crate::settings::{CurveSettings, Settings};
use crate::swizzle::{Axis, PerAxis};

/// Aantal samples waarmee een curve over zijn parameterbereik getekend wordt.
pub const CURVE_SAMPLES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component {axis} van curve `{curve}`: {error}")]
pub struct CurveError {
    pub curve: String,
    pub axis: Axis,
    #[source]
    pub error: ExpressionError,
}

/// De drie componentfuncties van een tekenbare curve.
#[derive(Debug)]
pub struct CompiledCurve {
    components: PerAxis<CompiledExpression>,
}

impl CompiledCurve {
    /// Compileert x, y en z tegen `t`. Eén mislukte component maakt de hele
    /// curve ontekenbaar; gedeeltelijk succes wordt weggegooid.
    pub fn compile(curve: &CurveSettings) -> Result<Self, CurveError> {
        let compile_axis = |axis: Axis| {
            expression::compile(curve.expression(axis), PARAMETER).map_err(|error| CurveError {
                curve: curve.id.clone(),
                axis,
                error,
            })
        };

        Ok(Self {
            components: PerAxis {
                x: compile_axis(Axis::X)?,
                y: compile_axis(Axis::Y)?,
                z: compile_axis(Axis::Z)?,
            },
        })
    }

    #[must_use]
    pub fn eval(&self, t: f64) -> [f64; 3] {
        [
            self.components.x.eval(t),
            self.components.y.eval(t),
            self.components.z.eval(t),
        ]
    }

    /// Gelijkmatig verdeelde samples over `[t_min, t_max]`, inclusief beide
    /// grenzen. Niet-eindige punten worden `None` (een onderbreking in de lijn).
    #[must_use]
    pub fn sample(&self, t_min: f64, t_max: f64, samples: usize) -> Vec<Option<[f64; 3]>> {
        if samples == 0 {
            return Vec::new();
        }
        if samples == 1 {
            return vec![finite_point(self.eval(t_min))];
        }

        let span = t_max - t_min;
        let last = (samples - 1) as f64;
        (0..samples)
            .map(|index| {
                let t = t_min + span * (index as f64) / last;
                finite_point(self.eval(t))
            })
            .collect()
    }
}

fn finite_point(point: [f64; 3]) -> Option<[f64; 3]> {
    point.iter().all(|value| value.is_finite()).then_some(point)
}

/// Houdt per curve-id de laatst geslaagde compilatie bij, of de reden waarom
/// de curve niet tekenbaar is.
#[derive(Debug, Default)]
pub struct CurveRegistry {
    compiled: HashMap<String, CompiledCurve>,
    errors: HashMap<String, CurveError>,
}

impl CurveRegistry {
    #[must_use]
    pub fn compile_all(settings: &Settings) -> Self {
        let mut registry = Self::default();
        for curve in settings.functions.values() {
            registry.recompile(curve);
        }
        registry
    }

    /// Vervangt de gecompileerde functies van één curve als geheel. Geeft terug
    /// of de curve daarna tekenbaar is.
    pub fn recompile(&mut self, curve: &CurveSettings) -> bool {
        match CompiledCurve::compile(curve) {
            Ok(compiled) => {
                self.errors.remove(&curve.id);
                self.compiled.insert(curve.id.clone(), compiled);
                true
            }
            Err(error) => {
                log::debug!("curve `{}` is niet tekenbaar: {error}", curve.id);
                self.compiled.remove(&curve.id);
                self.errors.insert(curve.id.clone(), error);
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CompiledCurve> {
        self.compiled.get(id)
    }

    #[must_use]
    pub fn is_drawable(&self, id: &str) -> bool {
        self.compiled.contains_key(id)
    }

    #[must_use]
    pub fn error(&self, id: &str) -> Option<&CurveError> {
        self.errors.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::{blank_curve, default_settings};

    fn curve(x: &str, y: &str, z: &str) -> CurveSettings {
        let mut curve = blank_curve("d", false);
        curve.x = x.to_owned();
        curve.y = y.to_owned();
        curve.z = z.to_owned();
        curve
    }

    #[test]
    fn default_helix_is_drawable() {
        let registry = CurveRegistry::compile_all(&default_settings(false));
        assert!(registry.is_drawable("a"));
        assert!(!registry.is_drawable("b"));
        assert!(!registry.is_drawable("c"));

        let point = registry.get("a").expect("compiled").eval(0.0);
        assert!((point[0] - 3.0).abs() < 1e-9);
        assert!(point[1].abs() < 1e-9);
        assert!(point[2].abs() < 1e-9);
    }

    #[test]
    fn any_empty_component_makes_curve_undrawable() {
        for (x, y, z) in [("", "t", "t"), ("t", "", "t"), ("t", "t", "")] {
            let error = CompiledCurve::compile(&curve(x, y, z)).unwrap_err();
            assert_eq!(error.error, ExpressionError::Empty);
        }
    }

    #[test]
    fn any_invalid_component_makes_curve_undrawable() {
        let error = CompiledCurve::compile(&curve("t", "sin(", "t")).unwrap_err();
        assert_eq!(error.axis, Axis::Y);

        let error = CompiledCurve::compile(&curve("t", "t", "u+1")).unwrap_err();
        assert_eq!(error.axis, Axis::Z);
    }

    #[test]
    fn failed_recompile_drops_previous_functions() {
        let mut registry = CurveRegistry::default();
        assert!(registry.recompile(&curve("t", "t", "t")));
        assert!(registry.is_drawable("d"));

        assert!(!registry.recompile(&curve("t", "t", "bad(")));
        assert!(!registry.is_drawable("d"));
        assert!(registry.get("d").is_none());
        assert!(registry.error("d").is_some());

        assert!(registry.recompile(&curve("t", "2*t", "0")));
        assert!(registry.error("d").is_none());
    }

    #[test]
    fn samples_include_both_bounds_and_mark_gaps() {
        let compiled = CompiledCurve::compile(&curve("t", "1/t", "0")).expect("compiles");
        let samples = compiled.sample(-1.0, 1.0, 3);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], Some([-1.0, -1.0, 0.0]));
        assert_eq!(samples[1], None);
        assert_eq!(samples[2], Some([1.0, 1.0, 0.0]));
    }
}
