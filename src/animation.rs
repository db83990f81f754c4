//! Animatie van de `t`-slider van een curve.
//!
//! De host bezit de timers. Deze module houdt per curve een handle bij met de
//! stapgrootte en het interval; zolang de handle bestaat loopt de animatie.
//! Een tick op een vrijgegeven handle verandert niets en vertelt de host dat hij
//! zijn timer mag opruimen.

use std::collections::HashMap;

use serde::Serialize;

use crate::settings::CurveSettings;

/// Stapgrootte van de `t`-slider.
pub const SLIDER_STEP: f64 = 0.01;

/// Standaard afspeelsnelheid.
pub const DEFAULT_RATE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationHandle {
    pub step: f64,
    pub rate: f64,
    pub interval_ms: f64,
}

impl AnimationHandle {
    #[must_use]
    pub fn new(step: f64, rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            DEFAULT_RATE
        };
        Self {
            step,
            rate,
            interval_ms: step * 1000.0 / rate,
        }
    }
}

impl Default for AnimationHandle {
    fn default() -> Self {
        Self::new(SLIDER_STEP, DEFAULT_RATE)
    }
}

/// Resultaat van één timerslag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Tick {
    /// `t` is verhoogd; `wrapped` geeft aan dat hij terug naar `tMin` sprong.
    Advanced { t: f64, wrapped: bool },
    /// Er loopt geen animatie meer voor deze curve.
    Stopped,
}

#[derive(Debug, Default)]
pub struct Animator {
    handles: HashMap<String, AnimationHandle>,
}

impl Animator {
    /// Start de animatie van een curve. Een lopende animatie houdt zijn handle.
    pub fn start(&mut self, curve_id: &str) -> AnimationHandle {
        *self
            .handles
            .entry(curve_id.to_owned())
            .or_insert_with(AnimationHandle::default)
    }

    /// Geeft de handle vrij. Geeft terug of er een animatie liep.
    pub fn stop(&mut self, curve_id: &str) -> bool {
        self.handles.remove(curve_id).is_some()
    }

    #[must_use]
    pub fn is_running(&self, curve_id: &str) -> bool {
        self.handles.contains_key(curve_id)
    }

    #[must_use]
    pub fn handle(&self, curve_id: &str) -> Option<AnimationHandle> {
        self.handles.get(curve_id).copied()
    }

    /// Zet de animatiestatus van een curve gelijk aan zijn `animate`-vlag.
    pub fn sync(&mut self, curve: &CurveSettings) {
        if curve.animate {
            self.start(&curve.id);
        } else {
            self.stop(&curve.id);
        }
    }

    /// Verhoogt `t` met één stap. Voorbij `tMax` springt `t` terug naar `tMin`.
    pub fn tick(&self, curve: &mut CurveSettings) -> Tick {
        let Some(handle) = self.handles.get(&curve.id) else {
            return Tick::Stopped;
        };

        curve.t += handle.step;
        let wrapped = curve.t > curve.t_max;
        if wrapped {
            curve.t = curve.t_min;
        }

        Tick::Advanced {
            t: curve.t,
            wrapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::default_curves;

    #[test]
    fn default_interval_is_ten_milliseconds() {
        let handle = AnimationHandle::default();
        assert_eq!(handle.step, SLIDER_STEP);
        assert!((handle.interval_ms - 10.0).abs() < 1e-9);

        let doubled = AnimationHandle::new(SLIDER_STEP, 2.0);
        assert!((doubled.interval_ms - 5.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_rate_falls_back_to_default() {
        assert_eq!(AnimationHandle::new(SLIDER_STEP, 0.0).rate, DEFAULT_RATE);
        assert_eq!(AnimationHandle::new(SLIDER_STEP, f64::NAN).rate, DEFAULT_RATE);
    }

    #[test]
    fn tick_advances_and_wraps() {
        let mut curve = default_curves(false)["a"].clone();
        let mut animator = Animator::default();
        animator.start(&curve.id);

        match animator.tick(&mut curve) {
            Tick::Advanced { t, wrapped } => {
                assert!((t - 0.11).abs() < 1e-9);
                assert!(!wrapped);
            }
            Tick::Stopped => panic!("animatie hoort te lopen"),
        }

        curve.t = curve.t_max;
        assert_eq!(
            animator.tick(&mut curve),
            Tick::Advanced {
                t: curve.t_min,
                wrapped: true
            }
        );
    }

    #[test]
    fn released_handle_stops_ticking() {
        let mut curve = default_curves(false)["a"].clone();
        let mut animator = Animator::default();
        animator.sync(&curve);
        assert!(animator.is_running("a"));

        curve.animate = false;
        animator.sync(&curve);
        assert!(!animator.is_running("a"));

        let before = curve.t;
        assert_eq!(animator.tick(&mut curve), Tick::Stopped);
        assert_eq!(curve.t, before);
        assert!(!animator.stop("a"));
    }
}
