use curve_engine::codec::{self, FROM_LINK_KEY};
use curve_engine::color::lighten_color;
use curve_engine::curve::CompiledCurve;
use curve_engine::scene::{DrawCommand, SceneDiff};
use curve_engine::settings::{self, defaults};
use curve_engine::state::{Redraw, UpdateError};
use curve_engine::swizzle::SwizzleOrder;
use curve_engine::{Demo, DemoError, Engine};
use serde_json::json;

#[test]
fn engine_initializes_with_default_helix() {
    let engine = Engine::new(None);
    let demo = engine.demo();
    assert!(demo.curves().is_drawable("a"));
    assert_eq!(demo.settings().functions.len(), 3);
}

#[test]
fn empty_two_dimensional_settings_resolve_to_wide_window() {
    let resolved = settings::resolve(&json!({ "twoDimensional": true }));
    let range = resolved.settings.range;
    assert_eq!((range.x_min, range.x_max), (-10.0, 10.0));
    assert_eq!((range.y_min, range.y_max), (-5.0, 5.0));
    assert_eq!(resolved.settings.scale, defaults::TWO_DIMENSIONAL_SCALE);
    assert!(resolved.settings.frozen);
    assert!(!resolved.settings.zoom_enabled);
}

#[test]
fn token_round_trip_restores_only_changed_fields() {
    let mut demo = Demo::new(&json!({}));
    demo.update("functions.b.x", &json!("cos(t)")).expect("x");
    demo.update("functions.b.y", &json!("sin(t)")).expect("y");
    demo.update("functions.b.z", &json!("t")).expect("z");
    demo.update("range.zMax", &json!(12)).expect("range");

    let token = demo.share_token(Some([1.234, -0.5, 2.0])).expect("token");
    let mut decoded = codec::decode(&token).expect("decode");
    let object = decoded.as_object_mut().expect("object");
    assert_eq!(object.remove(FROM_LINK_KEY), Some(json!(true)));

    let expected = codec::settings_diff(demo.settings(), demo.defaults()).expect("diff");
    assert_eq!(*object, expected);
    assert_eq!(object["functions"], json!({ "b": { "x": "cos(t)", "y": "sin(t)", "z": "t" } }));
    assert_eq!(object["range"], json!({ "zMax": 12.0 }));
    assert_eq!(object["camera"], json!({ "position": [1.23, -0.5, 2.0] }));

    let restored = Demo::from_token(&token);
    assert!(restored.curves().is_drawable("b"));
    assert_eq!(restored.settings().range.z_max, 12.0);
}

#[test]
fn double_swizzle_maps_renderer_space_back() {
    let user = [1.0, 2.0, 3.0];
    for order in [SwizzleOrder::IDENTITY, SwizzleOrder::CYCLIC] {
        let renderer = order.swizzle_array(&user);
        let back = order.swizzle_array(&order.swizzle_array(&renderer));
        assert_eq!(back, user);
        assert_eq!(order.unswizzle_array(&renderer), user);
    }

    let identity = SwizzleOrder::IDENTITY;
    assert_eq!(identity.swizzle_array(&identity.swizzle_array(&user)), user);
    assert_eq!(SwizzleOrder::CYCLIC.swizzle_array(&user), [2.0, 3.0, 1.0]);
}

#[test]
fn any_empty_component_makes_curve_undrawable() {
    let mut curve = defaults::default_curves(false)["a"].clone();
    assert!(CompiledCurve::compile(&curve).is_ok());

    curve.z = "  ".to_owned();
    assert!(CompiledCurve::compile(&curve).is_err());
}

#[test]
fn lighten_color_scales_named_colors() {
    assert_eq!(lighten_color("orange", 0.0).as_deref(), Some("#ffa500"));
    assert_eq!(lighten_color("Orange", -1.0).as_deref(), Some("#000000"));
    assert_eq!(lighten_color("RebeccaPurple", 0.0).as_deref(), Some("#663399"));
    assert_eq!(lighten_color("notacolor", 0.5), None);
}

#[test]
fn inverted_parameter_range_is_rejected_through_panel_path() {
    let mut demo = Demo::new(&json!({}));
    let error = demo.update("functions.a.tMax", &json!(-2)).unwrap_err();
    assert!(matches!(
        error,
        DemoError::Update(UpdateError::InvertedParameterRange { .. })
    ));
    assert_eq!(demo.settings().functions["a"].t_max, 6.28);
}

#[test]
fn parameter_range_change_rebuilds_curve() {
    let mut demo = Demo::new(&json!({}));
    demo.render();

    let outcome = demo.update("functions.a.tMax", &json!(3.14)).expect("update");
    assert_eq!(outcome.redraw, Redraw::Curve("a".to_owned()));

    let curve = outcome
        .diff
        .updated
        .iter()
        .find(|group| group.id == "curve-a")
        .expect("curve group updated");
    match &curve.commands[0] {
        DrawCommand::Curve { range, .. } => assert_eq!(*range, [0.0, 3.14]),
        other => panic!("verwacht Curve, kreeg {other:?}"),
    }
}

#[test]
fn animation_wraps_around_parameter_range() {
    let mut demo = Demo::new(&json!({ "functions": { "a": { "t": 6.265 } } }));
    demo.render();

    let first = demo.tick("a").expect("tick");
    let second = demo.tick("a").expect("tick");
    assert!(matches!(
        first.tick,
        curve_engine::animation::Tick::Advanced { wrapped: false, .. }
    ));
    assert_eq!(
        second.tick,
        curve_engine::animation::Tick::Advanced {
            t: 0.0,
            wrapped: true
        }
    );
    assert_ne!(second.diff, SceneDiff::default());
}

#[test]
fn malformed_token_falls_back_to_defaults() {
    let demo = Demo::from_token("not a token");
    assert!(!demo.settings().from_url);
    assert_eq!(demo.settings().range, defaults::default_range(false));
}

#[test]
fn panel_exposes_bindings_that_update_accepts() {
    let mut demo = Demo::new(&json!({ "twoDimensional": true }));
    let panel = demo.panel();
    assert!(panel.find("range.zMin").is_none());
    assert!(panel.find("functions.a.z").is_none());

    for (path, value) in [
        ("range.xMin", json!(-4)),
        ("zoomEnabled", json!(true)),
        ("frozen", json!(false)),
        ("functions.c.tMax", json!(2)),
    ] {
        assert!(panel.find(path).is_some(), "geen binding voor {path}");
        demo.update(path, &value).expect(path);
    }

    demo.update("functions.c.color", &json!("teal")).expect("color");
    demo.update("functions.c.displayEquation", &json!(false)).expect("display");

    assert_eq!(demo.settings().functions["c"].color, "teal");
    assert!(!demo.settings().functions["c"].display_equation);
}
