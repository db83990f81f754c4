//! De demo als geheel: instellingen, gecompileerde curves, animaties en de
//! tekening die de host al heeft. De wasm-facade in `lib.rs` is een dunne laag
//! hierboven; alle gedrag zit hier zodat het native te testen is.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::animation::{Animator, Tick};
use crate::codec::{self, CodecError};
use crate::curve::CurveRegistry;
use crate::panel::{self, Control, PanelLayout};
use crate::scene::{
    BaseScene, CAMERA_GROUP, DrawGroup, ParametricCurves, SceneBuilder, SceneContext, SceneDiff,
};
use crate::settings::{self, DefaultTree, ResolvedSettings, Settings};
use crate::state::{self, Redraw, SettingsUpdate, UpdateError};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("instellingen konden niet geserialiseerd worden: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Animatiestatus van één curve, voor de timer van de host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationState {
    pub curve: String,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOutcome {
    pub redraw: Redraw,
    pub diff: SceneDiff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationState>,
    /// Nieuwe `t`-slider wanneer het parameterbereik van een curve verandert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<Control>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    pub tick: Tick,
    pub diff: SceneDiff,
}

#[derive(Debug)]
pub struct Demo {
    settings: Settings,
    defaults: DefaultTree,
    curves: CurveRegistry,
    animator: Animator,
    scene: ParametricCurves,
    drawn: IndexMap<String, DrawGroup>,
}

impl Demo {
    /// Bouwt een demo uit (gedeeltelijke) gebruikersinstellingen.
    #[must_use]
    pub fn new(user: &JsonValue) -> Self {
        Self::from_resolved(settings::resolve(user))
    }

    #[must_use]
    pub fn from_json(source: &str) -> Self {
        Self::from_resolved(settings::resolve_str(source))
    }

    /// Bouwt een demo uit een gedeeld token. Een onbruikbaar token levert de
    /// standaarddemo op.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::new(&codec::decode_or_default(token))
    }

    /// Leest het `settings`-token uit een query-string, of gebruikt de standaardwaarden.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        match codec::settings_param(query) {
            Some(token) => Self::from_token(&token),
            None => Self::new(&JsonValue::Object(Map::new())),
        }
    }

    fn from_resolved(resolved: ResolvedSettings) -> Self {
        let ResolvedSettings { settings, defaults } = resolved;
        let curves = CurveRegistry::compile_all(&settings);

        let mut animator = Animator::default();
        for curve in settings.functions.values() {
            animator.sync(curve);
        }

        log::debug!(
            "demo opgebouwd: {} curves, {} tekenbaar",
            settings.functions.len(),
            settings
                .functions
                .keys()
                .filter(|id| curves.is_drawable(id))
                .count()
        );

        Self {
            settings,
            defaults,
            curves,
            animator,
            scene: ParametricCurves::new(BaseScene),
            drawn: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn defaults(&self) -> &DefaultTree {
        &self.defaults
    }

    #[must_use]
    pub fn curves(&self) -> &CurveRegistry {
        &self.curves
    }

    fn context(&self) -> SceneContext<'_> {
        SceneContext::new(&self.settings, &self.curves)
    }

    /// De volledige scène, los van wat de host al getekend heeft.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawGroup> {
        self.scene.describe(&self.context())
    }

    #[must_use]
    pub fn panel(&self) -> PanelLayout {
        self.scene.panel(&self.context())
    }

    /// Verschil tussen de volledige scène en de tekening van de host. De
    /// eerste aanroep levert alles als `added`.
    pub fn render(&mut self) -> SceneDiff {
        let next = self.scene();
        self.sync_groups(&next, None)
    }

    /// Past een paneelwijziging toe, gegeven als pad en nieuwe waarde.
    pub fn update(&mut self, path: &str, value: &JsonValue) -> Result<UpdateOutcome, DemoError> {
        let update = SettingsUpdate::from_path(path, value)?;
        Ok(self.apply(update)?)
    }

    pub fn apply(&mut self, update: SettingsUpdate) -> Result<UpdateOutcome, UpdateError> {
        let bounds_changed = match &update {
            SettingsUpdate::ParameterMin { curve, .. }
            | SettingsUpdate::ParameterMax { curve, .. } => Some(curve.clone()),
            _ => None,
        };
        let redraw = state::apply(&mut self.settings, update)?;
        let mut animation = None;
        let slider = bounds_changed
            .and_then(|id| self.settings.curve(&id))
            .map(panel::parameter_slider);

        match &redraw {
            Redraw::Curve(id) => {
                if let Some(curve) = self.settings.curve(id) {
                    self.curves.recompile(curve);
                }
            }
            Redraw::Animation(id) => {
                if let Some(curve) = self.settings.curve(id) {
                    self.animator.sync(curve);
                }
                animation = Some(self.animation_state(id));
            }
            _ => {}
        }

        let diff = self.refresh(&redraw);
        Ok(UpdateOutcome {
            redraw,
            diff,
            animation,
            slider,
        })
    }

    /// Eén timerslag voor de animatie van een curve.
    pub fn tick(&mut self, curve_id: &str) -> Result<TickOutcome, UpdateError> {
        let curve = self
            .settings
            .curve_mut(curve_id)
            .ok_or_else(|| UpdateError::UnknownCurve(curve_id.to_owned()))?;

        let tick = self.animator.tick(curve);
        let diff = match tick {
            Tick::Advanced { .. } => self.refresh(&Redraw::CurveParameter(curve_id.to_owned())),
            Tick::Stopped => SceneDiff::default(),
        };
        Ok(TickOutcome { tick, diff })
    }

    #[must_use]
    pub fn animation_state(&self, curve_id: &str) -> AnimationState {
        let handle = self.animator.handle(curve_id);
        AnimationState {
            curve: curve_id.to_owned(),
            running: handle.is_some(),
            interval_ms: handle.map(|handle| handle.interval_ms),
        }
    }

    /// Alle lopende animaties, in de volgorde van de curves.
    #[must_use]
    pub fn animations(&self) -> Vec<AnimationState> {
        self.settings
            .functions
            .keys()
            .filter(|id| self.animator.is_running(id))
            .map(|id| self.animation_state(id))
            .collect()
    }

    /// Start of stopt de animatie van iedere tekenbare curve (spatiebalk).
    pub fn toggle_all_animations(&mut self) -> Vec<AnimationState> {
        let curves = &self.curves;
        let toggled = state::toggle_all_animations(&mut self.settings, |id| curves.is_drawable(id));

        for id in &toggled {
            if let Some(curve) = self.settings.curve(id) {
                self.animator.sync(curve);
            }
        }
        toggled.iter().map(|id| self.animation_state(id)).collect()
    }

    /// Token van de huidige configuratie. `camera` is de positie die de
    /// renderer rapporteert; hij wordt op honderdsten afgerond en bewaard.
    pub fn share_token(&mut self, camera: Option<[f64; 3]>) -> Result<String, DemoError> {
        self.store_camera(camera)?;
        Ok(codec::encode(&self.settings, &self.defaults)?)
    }

    pub fn share_url(&mut self, href: &str, camera: Option<[f64; 3]>) -> Result<String, DemoError> {
        let token = self.share_token(camera)?;
        Ok(codec::share_url(href, &token))
    }

    /// Zoals [`Demo::share_url`], maar met de vergelijkingen van alle curves verborgen.
    pub fn share_url_hidden(
        &mut self,
        href: &str,
        camera: Option<[f64; 3]>,
    ) -> Result<String, DemoError> {
        self.store_camera(camera)?;

        let mut hidden = self.settings.clone();
        for curve in hidden.functions.values_mut() {
            curve.display_equation = false;
        }
        let token = codec::encode(&hidden, &self.defaults)?;
        Ok(codec::share_url(href, &token))
    }

    pub fn settings_json(&self) -> Result<String, DemoError> {
        Ok(serde_json::to_string_pretty(&self.settings)?)
    }

    /// Bewaart de camerapositie in rendererruimte. Zonder rapport van de
    /// renderer wordt een positie in gebruikersruimte eerst omgezet.
    fn store_camera(&mut self, camera: Option<[f64; 3]>) -> Result<(), UpdateError> {
        let position = match camera {
            Some(position) => position,
            None if self.settings.from_url => return Ok(()),
            None => self.context().swizzle.swizzle_array(&self.settings.camera.position),
        };
        state::apply(
            &mut self.settings,
            SettingsUpdate::CameraPosition(position.map(round_hundredths)),
        )?;
        Ok(())
    }

    fn refresh(&mut self, redraw: &Redraw) -> SceneDiff {
        let (next, scope) = {
            let context = self.context();
            match redraw {
                Redraw::Scene => (self.scene.describe(&context), None),
                Redraw::Camera => (
                    vec![self.scene.base().camera(&context)],
                    Some(vec![CAMERA_GROUP.to_owned()]),
                ),
                Redraw::Curve(id) => (
                    self.scene.curve_groups(&context, id),
                    Some(vec![
                        ParametricCurves::curve_group_id(id),
                        ParametricCurves::marker_group_id(id),
                    ]),
                ),
                Redraw::CurveParameter(id) => (
                    self.scene.marker_group(&context, id).into_iter().collect(),
                    Some(vec![ParametricCurves::marker_group_id(id)]),
                ),
                Redraw::Animation(_) | Redraw::Panel => {
                    return SceneDiff::default();
                }
            }
        };
        self.sync_groups(&next, scope.as_deref())
    }

    fn sync_groups(&mut self, next: &[DrawGroup], scope: Option<&[String]>) -> SceneDiff {
        let diff = SceneDiff::between(&self.drawn, next, scope);
        diff.apply_to(&mut self.drawn);
        diff
    }
}

/// Zoals `Math.round`: halven naar boven.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_render_adds_everything_then_nothing() {
        let mut demo = Demo::new(&json!({}));
        let diff = demo.render();
        assert_eq!(diff.added.len(), demo.scene().len());
        assert!(diff.updated.is_empty());
        assert!(demo.render().is_empty());
    }

    #[test]
    fn parameter_update_only_touches_marker() {
        let mut demo = Demo::new(&json!({}));
        demo.render();

        let outcome = demo.update("functions.a.t", &json!(1.0)).expect("update");
        assert_eq!(outcome.redraw, Redraw::CurveParameter("a".to_owned()));
        let ids: Vec<&str> = outcome.diff.updated.iter().map(|group| group.id.as_str()).collect();
        assert_eq!(ids, ["marker-a"]);
        assert!(outcome.diff.added.is_empty());
    }

    #[test]
    fn emptied_expression_removes_curve_groups() {
        let mut demo = Demo::new(&json!({}));
        demo.render();

        let outcome = demo.update("functions.a.y", &json!("")).expect("update");
        assert_eq!(outcome.diff.removed, ["curve-a", "marker-a"]);
        assert!(!demo.curves().is_drawable("a"));

        let outcome = demo.update("functions.a.y", &json!("sin(t)")).expect("update");
        assert_eq!(outcome.diff.added.len(), 2);
    }

    #[test]
    fn new_expression_adds_curve() {
        let mut demo = Demo::new(&json!({}));
        demo.render();

        demo.update("functions.b.x", &json!("t")).expect("update");
        demo.update("functions.b.y", &json!("t^2")).expect("update");
        let outcome = demo.update("functions.b.z", &json!("0")).expect("update");
        let ids: Vec<&str> = outcome.diff.added.iter().map(|group| group.id.as_str()).collect();
        assert_eq!(ids, ["curve-b", "marker-b"]);
    }

    #[test]
    fn parameter_bounds_update_rebuilds_slider() {
        let mut demo = Demo::new(&json!({}));
        demo.render();

        let outcome = demo.update("functions.a.tMin", &json!(2)).expect("update");
        match outcome.slider {
            Some(Control::Slider {
                path,
                value,
                min,
                max,
                ..
            }) => {
                assert_eq!(path, "functions.a.t");
                assert_eq!((min, max), (2.0, 6.28));
                assert_eq!(value, 2.0);
            }
            other => panic!("verwacht Slider, kreeg {other:?}"),
        }

        let outcome = demo.update("functions.a.t", &json!(3.0)).expect("update");
        assert_eq!(outcome.slider, None);
    }

    #[test]
    fn range_update_redraws_view_only() {
        let mut demo = Demo::new(&json!({}));
        demo.render();

        let outcome = demo.update("range.xMax", &json!(9)).expect("update");
        let ids: Vec<&str> = outcome.diff.updated.iter().map(|group| group.id.as_str()).collect();
        assert_eq!(ids, ["view", "axis-labels"]);
    }

    #[test]
    fn animation_ticks_and_stops() {
        let mut demo = Demo::new(&json!({}));
        demo.render();
        assert_eq!(demo.animations().len(), 1);

        let outcome = demo.tick("a").expect("tick");
        assert!(matches!(outcome.tick, Tick::Advanced { wrapped: false, .. }));
        assert_eq!(outcome.diff.updated.len(), 1);

        let outcome = demo.update("functions.a.animate", &json!(false)).expect("update");
        assert_eq!(
            outcome.animation,
            Some(AnimationState {
                curve: "a".to_owned(),
                running: false,
                interval_ms: None
            })
        );
        assert_eq!(demo.tick("a").expect("tick").tick, Tick::Stopped);
    }

    #[test]
    fn spacebar_toggles_drawable_curves() {
        let mut demo = Demo::new(&json!({}));
        let toggled = demo.toggle_all_animations();
        assert_eq!(toggled.len(), 1);
        assert!(!toggled[0].running);
        assert!(!demo.settings().functions["a"].animate);

        let toggled = demo.toggle_all_animations();
        assert!(toggled[0].running);
        assert_eq!(toggled[0].interval_ms, Some(10.0));
    }

    #[test]
    fn share_url_round_trips_through_query() {
        let mut demo = Demo::new(&json!({ "twoDimensional": true }));
        demo.update("range.yMax", &json!(7)).expect("update");

        let url = demo
            .share_url("https://demo.example/curves.html?old=1", Some([0.123, 0.456, 1.5]))
            .expect("url");
        let (_, query) = url.split_once('?').expect("query");

        let restored = Demo::from_query(query);
        let settings = restored.settings();
        assert!(settings.two_dimensional);
        assert!(settings.from_url);
        assert_eq!(settings.range.y_max, 7.0);
        assert_eq!(settings.camera.position, [0.12, 0.46, 1.5]);
    }

    #[test]
    fn hidden_share_url_hides_every_equation() {
        let mut demo = Demo::new(&json!({}));
        let url = demo.share_url_hidden("https://demo.example/", None).expect("url");
        let (_, query) = url.split_once('?').expect("query");

        let restored = Demo::from_query(query);
        assert!(restored.settings().functions.values().all(|curve| !curve.display_equation));
        assert!(demo.settings().functions.values().all(|curve| curve.display_equation));
    }

    #[test]
    fn malformed_query_falls_back_to_defaults() {
        let demo = Demo::from_query("?settings=%%%not-base64");
        assert!(!demo.settings().from_url);
        assert_eq!(demo.settings().range.x_min, -5.0);
    }
}
