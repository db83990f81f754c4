//! Scèneopbouw: vertaalt instellingen naar tekenopdrachten en paneelbeschrijving.
//!
//! [`SceneBuilder`] is de gedeelde interface. [`BaseScene`] tekent camera,
//! assen, raster en aslabels; varianten zoals [`ParametricCurves`] bevatten een
//! `BaseScene` en roepen die expliciet aan voordat ze hun eigen groepen toevoegen.

pub mod draw;
mod parametric;

use crate::curve::CurveRegistry;
use crate::panel::{self, PanelLayout};
use crate::settings::Settings;
use crate::swizzle::SwizzleOrder;

pub use draw::{DrawCommand, DrawGroup, SceneDiff};
pub use parametric::ParametricCurves;

pub const CAMERA_GROUP: &str = "camera";
pub const AXES_GROUP: &str = "axes";
pub const GRID_GROUP: &str = "grid";
pub const VIEW_GROUP: &str = "view";
pub const AXIS_LABELS_GROUP: &str = "axis-labels";

const GRID_DIVISIONS: f64 = 10.0;

/// Alles wat een scène nodig heeft om zichzelf te beschrijven.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub settings: &'a Settings,
    pub curves: &'a CurveRegistry,
    pub swizzle: SwizzleOrder,
}

impl<'a> SceneContext<'a> {
    #[must_use]
    pub fn new(settings: &'a Settings, curves: &'a CurveRegistry) -> Self {
        Self {
            settings,
            curves,
            swizzle: SwizzleOrder::for_dimensionality(settings.two_dimensional),
        }
    }
}

pub trait SceneBuilder {
    /// Voegt variant-specifieke mappen toe tussen "Save Graph" en "Window & Camera".
    fn customize_panel(&self, context: &SceneContext<'_>, panel: &mut PanelLayout);

    /// Groepen die bij de opbouw één keer getekend worden.
    fn build_visualization(&self, context: &SceneContext<'_>) -> Vec<DrawGroup>;

    /// Groepen die bij "Redraw Display" of een vensterwijziging vervangen worden.
    fn redraw(&self, context: &SceneContext<'_>) -> Vec<DrawGroup>;

    /// De volledige scène.
    fn describe(&self, context: &SceneContext<'_>) -> Vec<DrawGroup> {
        let mut groups = self.build_visualization(context);
        groups.extend(self.redraw(context));
        groups
    }

    fn panel(&self, context: &SceneContext<'_>) -> PanelLayout {
        let mut layout = PanelLayout::default();
        layout.push_control(panel::save_graph_button());
        self.customize_panel(context, &mut layout);
        layout.push_folder(panel::window_folder(context.settings));
        layout.push_control(panel::redraw_button());
        layout
    }
}

/// De gemeenschappelijke basis: camera, assen, raster, venster en aslabels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseScene;

impl BaseScene {
    /// Een verse configuratie bewaart de camera in gebruikersruimte; een
    /// gedeelde link levert hem al in rendererruimte aan.
    #[must_use]
    pub fn camera(&self, context: &SceneContext<'_>) -> DrawGroup {
        let settings = context.settings;
        let position = if settings.from_url {
            settings.camera.position
        } else {
            context.swizzle.swizzle_array(&settings.camera.position)
        };

        DrawGroup::new(
            CAMERA_GROUP,
            vec![DrawCommand::Camera {
                position,
                proxy: true,
                zoom_enabled: settings.zoom_enabled,
                frozen: settings.frozen,
            }],
        )
    }

    /// Eén as per zichtbare rendereras; de instellingen komen van de
    /// gebruikersas die daarop geprojecteerd wordt.
    #[must_use]
    pub fn axes(&self, context: &SceneContext<'_>) -> DrawGroup {
        let axes = context.swizzle.swizzle_axes(&context.settings.axes);
        let commands = context
            .settings
            .visible_axes()
            .iter()
            .map(|renderer_axis| {
                let axis = axes.get(*renderer_axis);
                DrawCommand::Axis {
                    id: format!("axis-{renderer_axis}"),
                    axis: axis.axis.axis,
                    width: axis.axis.width,
                    divide: axis.scale.divide,
                    nice: axis.scale.nice,
                    zero: axis.scale.zero,
                    ticks_width: axis.ticks.width,
                    digits: axis.ticks_format.digits,
                    label_offset: axis.ticks_label.offset,
                }
            })
            .collect();

        DrawGroup::new(AXES_GROUP, commands)
    }

    #[must_use]
    pub fn grid(&self, context: &SceneContext<'_>) -> DrawGroup {
        let settings = context.settings;
        let axes = if settings.two_dimensional { [1, 2] } else { [1, 3] };
        let divide_x = GRID_DIVISIONS * settings.scale[0] / settings.scale[1];

        DrawGroup::new(
            GRID_GROUP,
            vec![DrawCommand::Grid {
                id: "xy-grid".to_owned(),
                axes,
                divide_x,
                divide_y: GRID_DIVISIONS,
                width: 1.0,
                opacity: 0.5,
            }],
        )
    }

    /// Het cartesische venster in rendererruimte.
    #[must_use]
    pub fn view(&self, context: &SceneContext<'_>) -> DrawGroup {
        let settings = context.settings;
        DrawGroup::new(
            VIEW_GROUP,
            vec![DrawCommand::Cartesian {
                range: context.swizzle.swizzle_array(&settings.range.bounds()),
                scale: context.swizzle.swizzle_array(&settings.scale),
                focus: settings.focus(),
            }],
        )
    }

    /// Labels aan het positieve uiteinde van iedere zichtbare rendereras.
    #[must_use]
    pub fn axis_labels(&self, context: &SceneContext<'_>) -> DrawGroup {
        let axes = context.swizzle.swizzle_axes(&context.settings.axes);
        let range = context.swizzle.swizzle_array(&context.settings.range.bounds());

        let commands = context
            .settings
            .visible_axes()
            .iter()
            .map(|renderer_axis| {
                let index = renderer_axis.index();
                let mut position = [0.0; 3];
                position[index] = range[index][1];

                let axis = axes.get(*renderer_axis);
                DrawCommand::AxisLabel {
                    axis: *renderer_axis,
                    position,
                    text: axis.axis_label.clone(),
                    offset: axis.label_offset,
                }
            })
            .collect();

        DrawGroup::new(AXIS_LABELS_GROUP, commands)
    }
}

impl SceneBuilder for BaseScene {
    fn customize_panel(&self, _context: &SceneContext<'_>, _panel: &mut PanelLayout) {}

    fn build_visualization(&self, context: &SceneContext<'_>) -> Vec<DrawGroup> {
        vec![self.camera(context), self.axes(context), self.grid(context)]
    }

    fn redraw(&self, context: &SceneContext<'_>) -> Vec<DrawGroup> {
        vec![self.view(context), self.axis_labels(context)]
    }
}
