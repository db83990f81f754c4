use super::{BaseScene, DrawCommand, DrawGroup, SceneBuilder, SceneContext};
use crate::color;
use crate::curve::CURVE_SAMPLES;
use crate::panel::{self, PanelFolder, PanelLayout};

/// Hoeveel donkerder het punt op de curve is dan de curve zelf.
const POINT_SHADE: f64 = -0.33;
const VECTOR_COLOR: &str = "black";

/// De demo met parametrische curves: per tekenbare curve een lijn, plus een punt
/// en positievector op de huidige waarde van `t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParametricCurves {
    base: BaseScene,
}

impl ParametricCurves {
    #[must_use]
    pub fn new(base: BaseScene) -> Self {
        Self { base }
    }

    #[must_use]
    pub fn base(&self) -> &BaseScene {
        &self.base
    }

    #[must_use]
    pub fn curve_group_id(curve_id: &str) -> String {
        format!("curve-{curve_id}")
    }

    #[must_use]
    pub fn marker_group_id(curve_id: &str) -> String {
        format!("marker-{curve_id}")
    }

    /// Lijn en markering van één curve; leeg als de curve niet tekenbaar is.
    #[must_use]
    pub fn curve_groups(&self, context: &SceneContext<'_>, curve_id: &str) -> Vec<DrawGroup> {
        self.curve_group(context, curve_id)
            .into_iter()
            .chain(self.marker_group(context, curve_id))
            .collect()
    }

    #[must_use]
    pub fn curve_group(&self, context: &SceneContext<'_>, curve_id: &str) -> Option<DrawGroup> {
        let settings = context.settings.curve(curve_id)?;
        let compiled = context.curves.get(curve_id)?;

        Some(DrawGroup::new(
            Self::curve_group_id(curve_id),
            vec![DrawCommand::Curve {
                id: format!("data-parametric-curve-{curve_id}"),
                range: [settings.t_min, settings.t_max],
                samples: CURVE_SAMPLES,
                points: compiled.sample(settings.t_min, settings.t_max, CURVE_SAMPLES),
                color: settings.color.clone(),
                width: 6.0,
                swizzle: context.swizzle,
            }],
        ))
    }

    /// Het punt en de positievector op de huidige `t`.
    #[must_use]
    pub fn marker_group(&self, context: &SceneContext<'_>, curve_id: &str) -> Option<DrawGroup> {
        let settings = context.settings.curve(curve_id)?;
        let compiled = context.curves.get(curve_id)?;
        let position = compiled.eval(settings.t);

        let point_color = color::lighten_color(&settings.color, POINT_SHADE)
            .unwrap_or_else(|| settings.color.clone());

        Some(DrawGroup::new(
            Self::marker_group_id(curve_id),
            vec![
                DrawCommand::Point {
                    id: format!("data-point-{curve_id}"),
                    position,
                    color: point_color,
                    size: 12.0,
                    swizzle: context.swizzle,
                },
                DrawCommand::Vector {
                    id: format!("data-vector-position-{curve_id}"),
                    tail: [0.0; 3],
                    tip: position,
                    color: VECTOR_COLOR.to_owned(),
                    width: 3.0,
                    size: 3.0,
                    swizzle: context.swizzle,
                },
            ],
        ))
    }
}

impl SceneBuilder for ParametricCurves {
    fn customize_panel(&self, context: &SceneContext<'_>, layout: &mut PanelLayout) {
        let settings = context.settings;
        let mut functions = PanelFolder::new("Functions").opened();
        functions.class_name = Some("functions-folder".to_owned());

        for (index, (id, curve)) in settings.functions.iter().enumerate() {
            let mut folder =
                panel::curve_folder(curve, &panel::curve_title(id), settings.two_dimensional);
            folder.open = index == 0;
            functions.push_folder(folder);
        }

        layout.push_folder(functions);
    }

    fn build_visualization(&self, context: &SceneContext<'_>) -> Vec<DrawGroup> {
        self.base.build_visualization(context)
    }

    fn redraw(&self, context: &SceneContext<'_>) -> Vec<DrawGroup> {
        let mut groups = self.base.redraw(context);
        for id in context.settings.functions.keys() {
            groups.extend(self.curve_groups(context, id));
        }
        groups
    }
}
