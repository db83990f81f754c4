//! Standaardwaarden die afhangen van de dimensionaliteit.

use indexmap::IndexMap;

use super::types::{
    AxisLine, AxisScale, AxisSettings, AxisTicks, Camera, CurveSettings, Grids, Range, Settings,
    TicksFormat, TicksLabel,
};
use crate::swizzle::{Axis, PerAxis, SwizzleOrder};

pub const TWO_DIMENSIONAL_SCALE: [f64; 3] = [1.0, 0.5, 0.5];
pub const THREE_DIMENSIONAL_SCALE: [f64; 3] = [1.0, 1.0, 0.5];
pub const TWO_DIMENSIONAL_CAMERA: [f64; 3] = [0.0, 0.0, 1.5];
pub const THREE_DIMENSIONAL_CAMERA: [f64; 3] = [-0.75, -1.5, 0.25];

const TICK_LABEL_OFFSET: [f64; 3] = [20.0, 0.0, 0.0];
const AXIS_LABEL_OFFSET: [f64; 3] = [0.0, 25.0, 0.0];

/// Kleur van curves die de gebruiker zelf toevoegt.
pub const NEW_CURVE_COLOR: &str = "#000000";

/// De volledige standaardconfiguratie. `focus` blijft leeg.
#[must_use]
pub fn default_settings(two_dimensional: bool) -> Settings {
    Settings {
        container_id: None,
        frozen: two_dimensional,
        zoom_enabled: !two_dimensional,
        two_dimensional,
        range: default_range(two_dimensional),
        scale: if two_dimensional {
            TWO_DIMENSIONAL_SCALE
        } else {
            THREE_DIMENSIONAL_SCALE
        },
        camera: Camera {
            position: if two_dimensional {
                TWO_DIMENSIONAL_CAMERA
            } else {
                THREE_DIMENSIONAL_CAMERA
            },
        },
        grids: Grids {
            xy: true,
            xz: false,
            yz: false,
        },
        axes: default_axes(two_dimensional),
        functions: default_curves(two_dimensional),
        focus: None,
        from_url: false,
    }
}

#[must_use]
pub fn default_range(two_dimensional: bool) -> Range {
    let x_extent = if two_dimensional { 10.0 } else { 5.0 };
    Range {
        x_min: -x_extent,
        x_max: x_extent,
        y_min: -5.0,
        y_max: 5.0,
        z_min: -5.0,
        z_max: 5.0,
    }
}

/// Asinstellingen per gebruikersas. De renderer-as wordt gevonden door de
/// swizzle twee keer toe te passen op de asnamen.
#[must_use]
pub fn default_axes(two_dimensional: bool) -> PerAxis<AxisSettings> {
    let order = SwizzleOrder::for_dimensionality(two_dimensional);
    let renderer_axes = order.unswizzle_axes(&PerAxis::from_fn(|axis| axis));

    PerAxis::from_fn(|axis| {
        let tick_label_offset = match axis {
            Axis::Y if two_dimensional => Some(TICK_LABEL_OFFSET),
            Axis::Z => Some(TICK_LABEL_OFFSET),
            _ => None,
        };
        let renderer_axis = *renderer_axes.get(axis);

        AxisSettings {
            axis_label: axis.name().to_owned(),
            label_offset: AXIS_LABEL_OFFSET,
            axis: AxisLine {
                width: 2.0,
                axis: renderer_axis,
            },
            scale: AxisScale {
                divide: 10,
                nice: true,
                zero: false,
                axis: renderer_axis,
            },
            ticks: AxisTicks { width: 2.0 },
            ticks_format: TicksFormat { digits: 2 },
            ticks_label: TicksLabel {
                offset: tick_label_offset,
            },
        }
    })
}

/// Curves `a`, `b` en `c`; alleen `a` heeft standaard expressies.
#[must_use]
pub fn default_curves(two_dimensional: bool) -> IndexMap<String, CurveSettings> {
    let mut curves = IndexMap::new();
    curves.insert(
        "a".to_owned(),
        CurveSettings {
            id: "a".to_owned(),
            x: "3*cos(t)".to_owned(),
            y: "3*sin(t)".to_owned(),
            z: if two_dimensional { "0" } else { "t/3.14" }.to_owned(),
            animate: true,
            display_equation: true,
            t: 0.1,
            t_min: 0.0,
            t_max: 6.28,
            color: "#3090FF".to_owned(),
        },
    );

    for (id, color) in [("b", "orange"), ("c", "#2db92d")] {
        let mut curve = blank_curve(id, two_dimensional);
        curve.color = color.to_owned();
        curves.insert(id.to_owned(), curve);
    }

    curves
}

/// Sjabloon voor een curve zonder expressies.
#[must_use]
pub fn blank_curve(id: &str, two_dimensional: bool) -> CurveSettings {
    CurveSettings {
        id: id.to_owned(),
        x: String::new(),
        y: String::new(),
        z: if two_dimensional { "0" } else { "" }.to_owned(),
        animate: false,
        display_equation: true,
        t: 0.1,
        t_min: -1.0,
        t_max: 3.0,
        color: NEW_CURVE_COLOR.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_dimensional_defaults() {
        let settings = default_settings(true);
        assert_eq!(settings.range.x_min, -10.0);
        assert_eq!(settings.range.x_max, 10.0);
        assert_eq!(settings.scale, TWO_DIMENSIONAL_SCALE);
        assert!(settings.frozen);
        assert!(!settings.zoom_enabled);
        assert_eq!(settings.functions["a"].z, "0");
        assert_eq!(settings.functions["b"].z, "0");
    }

    #[test]
    fn three_dimensional_defaults() {
        let settings = default_settings(false);
        assert_eq!(settings.range.x_min, -5.0);
        assert_eq!(settings.camera.position, THREE_DIMENSIONAL_CAMERA);
        assert!(!settings.frozen);
        assert!(settings.zoom_enabled);
        assert_eq!(settings.functions["a"].z, "t/3.14");
        assert_eq!(settings.functions["c"].z, "");
    }

    #[test]
    fn curve_order_is_stable() {
        let curves = default_curves(false);
        let ids: Vec<&String> = curves.keys().collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn axes_point_at_renderer_axes() {
        let axes = default_axes(false);
        assert_eq!(axes.x.axis.axis, Axis::Z);
        assert_eq!(axes.y.axis.axis, Axis::X);
        assert_eq!(axes.z.scale.axis, Axis::Y);
        assert_eq!(axes.x.ticks_label.offset, None);
        assert_eq!(axes.z.ticks_label.offset, Some(TICK_LABEL_OFFSET));

        let flat = default_axes(true);
        assert_eq!(flat.x.axis.axis, Axis::X);
        assert_eq!(flat.y.ticks_label.offset, Some(TICK_LABEL_OFFSET));
    }
}
