//! Declaratieve tekenopdrachten voor de render-bibliotheek.

use indexmap::IndexMap;
use serde::Serialize;

use crate::swizzle::{Axis, SwizzleOrder};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DrawCommand {
    Camera {
        position: [f64; 3],
        proxy: bool,
        zoom_enabled: bool,
        frozen: bool,
    },
    Cartesian {
        range: [[f64; 2]; 3],
        scale: [f64; 3],
        focus: f64,
    },
    Axis {
        id: String,
        axis: Axis,
        width: f64,
        divide: u32,
        nice: bool,
        zero: bool,
        ticks_width: f64,
        digits: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        label_offset: Option<[f64; 3]>,
    },
    Grid {
        id: String,
        axes: [u8; 2],
        divide_x: f64,
        divide_y: f64,
        width: f64,
        opacity: f64,
    },
    AxisLabel {
        axis: Axis,
        position: [f64; 3],
        text: String,
        offset: [f64; 3],
    },
    /// Gesamplede curve in gebruikersruimte; `None` is een onderbreking.
    Curve {
        id: String,
        range: [f64; 2],
        samples: usize,
        points: Vec<Option<[f64; 3]>>,
        color: String,
        width: f64,
        swizzle: SwizzleOrder,
    },
    Point {
        id: String,
        position: [f64; 3],
        color: String,
        size: f64,
        swizzle: SwizzleOrder,
    },
    Vector {
        id: String,
        tail: [f64; 3],
        tip: [f64; 3],
        color: String,
        width: f64,
        size: f64,
        swizzle: SwizzleOrder,
    },
}

/// Een benoemde groep opdrachten; de eenheid waarin de scène bijgewerkt wordt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawGroup {
    pub id: String,
    pub commands: Vec<DrawCommand>,
}

impl DrawGroup {
    #[must_use]
    pub fn new(id: impl Into<String>, commands: Vec<DrawCommand>) -> Self {
        Self {
            id: id.into(),
            commands,
        }
    }
}

/// Verschil tussen twee tekeningen, per groep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneDiff {
    pub added: Vec<DrawGroup>,
    pub updated: Vec<DrawGroup>,
    pub removed: Vec<String>,
}

impl SceneDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Vergelijkt de groepen in `next` met wat er al getekend is. Alleen de
    /// groepen in `scope` worden als verwijderd gemeld wanneer ze ontbreken;
    /// `None` betekent de hele tekening.
    pub fn between(
        drawn: &IndexMap<String, DrawGroup>,
        next: &[DrawGroup],
        scope: Option<&[String]>,
    ) -> Self {
        let mut diff = SceneDiff::default();

        for group in next {
            match drawn.get(&group.id) {
                Some(existing) if existing == group => {}
                Some(_) => diff.updated.push(group.clone()),
                None => diff.added.push(group.clone()),
            }
        }

        for id in drawn.keys() {
            let in_scope = scope.is_none_or(|scope| scope.contains(id));
            if in_scope && !next.iter().any(|group| &group.id == id) {
                diff.removed.push(id.clone());
            }
        }

        diff
    }

    /// Past het verschil toe op de bijgehouden tekening.
    pub fn apply_to(&self, drawn: &mut IndexMap<String, DrawGroup>) {
        for id in &self.removed {
            drawn.shift_remove(id);
        }
        for group in self.added.iter().chain(&self.updated) {
            drawn.insert(group.id.clone(), group.clone());
        }
    }
}
