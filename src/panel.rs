//! Beschrijving van het bedieningspaneel dat de host opbouwt.
//!
//! Ieder bedieningselement draagt het instellingenpad waaraan het gebonden is,
//! zodat de host wijzigingen terug kan melden als `{ path, value }`.

use serde::Serialize;

use crate::animation::SLIDER_STEP;
use crate::settings::{CurveSettings, RangeBound, Settings};
use crate::swizzle::Axis;

/// Acties die een knop in het paneel aan de host vraagt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelAction {
    SaveGraph,
    RedrawDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Control {
    Button {
        label: String,
        action: PanelAction,
    },
    Text {
        label: String,
        path: String,
        value: String,
        hidden: bool,
    },
    Number {
        label: String,
        path: String,
        value: f64,
    },
    Slider {
        label: String,
        path: String,
        value: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Toggle {
        label: String,
        path: String,
        value: bool,
        /// De host moet de waarde volgen; ze verandert ook buiten het paneel.
        listen: bool,
    },
}

/// Een element van het paneel of van een map, in weergavevolgorde.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelItem {
    Control(Control),
    Folder(PanelFolder),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelFolder {
    pub title: String,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub items: Vec<PanelItem>,
}

impl PanelFolder {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            open: false,
            class_name: None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn opened(mut self) -> Self {
        self.open = true;
        self
    }

    pub fn push_control(&mut self, control: Control) {
        self.items.push(PanelItem::Control(control));
    }

    pub fn push_folder(&mut self, folder: PanelFolder) {
        self.items.push(PanelItem::Folder(folder));
    }

    /// De bedieningselementen direct in deze map.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        direct_controls(&self.items)
    }
}

/// Het volledige paneel, van boven naar beneden.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelLayout {
    pub items: Vec<PanelItem>,
}

impl PanelLayout {
    pub fn push_control(&mut self, control: Control) {
        self.items.push(PanelItem::Control(control));
    }

    pub fn push_folder(&mut self, folder: PanelFolder) {
        self.items.push(PanelItem::Folder(folder));
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        direct_controls(&self.items)
    }

    /// Zoekt een map op titel, in alle niveaus.
    #[must_use]
    pub fn folder(&self, title: &str) -> Option<&PanelFolder> {
        fn search<'a>(items: &'a [PanelItem], title: &str) -> Option<&'a PanelFolder> {
            items.iter().find_map(|item| match item {
                PanelItem::Folder(folder) if folder.title == title => Some(folder),
                PanelItem::Folder(folder) => search(&folder.items, title),
                PanelItem::Control(_) => None,
            })
        }
        search(&self.items, title)
    }

    /// Zoekt een bedieningselement op zijn pad, in alle mappen.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Control> {
        fn search<'a>(items: &'a [PanelItem], path: &str) -> Option<&'a Control> {
            items.iter().find_map(|item| match item {
                PanelItem::Control(control) => (control.path() == Some(path)).then_some(control),
                PanelItem::Folder(folder) => search(&folder.items, path),
            })
        }
        search(&self.items, path)
    }
}

fn direct_controls(items: &[PanelItem]) -> impl Iterator<Item = &Control> {
    items.iter().filter_map(|item| match item {
        PanelItem::Control(control) => Some(control),
        PanelItem::Folder(_) => None,
    })
}

impl Control {
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Control::Button { .. } => None,
            Control::Text { path, .. }
            | Control::Number { path, .. }
            | Control::Slider { path, .. }
            | Control::Toggle { path, .. } => Some(path),
        }
    }

    fn button(label: &str, action: PanelAction) -> Self {
        Control::Button {
            label: label.to_owned(),
            action,
        }
    }
}

/// Knop bovenaan het paneel.
#[must_use]
pub fn save_graph_button() -> Control {
    Control::button("Save Graph", PanelAction::SaveGraph)
}

/// Knop onderaan het paneel.
#[must_use]
pub fn redraw_button() -> Control {
    Control::button("Redraw Display", PanelAction::RedrawDisplay)
}

/// "Window & Camera": vensterbereik (z alleen in 3D), zoom en bevriezen.
#[must_use]
pub fn window_folder(settings: &Settings) -> PanelFolder {
    let mut folder = PanelFolder::new("Window & Camera");

    for bound in RangeBound::ALL {
        if settings.two_dimensional && bound.axis() == Axis::Z {
            continue;
        }
        folder.push_control(Control::Number {
            label: bound.key().to_owned(),
            path: format!("range.{}", bound.key()),
            value: settings.range.bound(bound),
        });
    }

    folder.push_control(Control::Toggle {
        label: "Zoom Enabled".to_owned(),
        path: "zoomEnabled".to_owned(),
        value: settings.zoom_enabled,
        listen: false,
    });
    folder.push_control(Control::Toggle {
        label: "Frozen".to_owned(),
        path: "frozen".to_owned(),
        value: settings.frozen,
        listen: false,
    });

    folder
}

/// Map met de bediening van één curve.
#[must_use]
pub fn curve_folder(curve: &CurveSettings, title: &str, two_dimensional: bool) -> PanelFolder {
    let mut folder = PanelFolder::new(title);
    let path = |field: &str| format!("functions.{}.{field}", curve.id);

    for axis in Axis::SPATIAL {
        if two_dimensional && axis == Axis::Z {
            continue;
        }
        folder.push_control(Control::Text {
            label: format!("{}(t) = ", axis.name().to_uppercase()),
            path: path(axis.name()),
            value: curve.expression(axis).to_owned(),
            hidden: !curve.display_equation,
        });
    }

    folder.push_control(parameter_slider(curve));
    folder.push_control(Control::Toggle {
        label: "animate".to_owned(),
        path: path("animate"),
        value: curve.animate,
        listen: true,
    });
    folder.push_control(Control::Number {
        label: "tMin".to_owned(),
        path: path("tMin"),
        value: curve.t_min,
    });
    folder.push_control(Control::Number {
        label: "tMax".to_owned(),
        path: path("tMax"),
        value: curve.t_max,
    });

    folder
}

/// De `t`-slider van een curve. Zijn grenzen volgen `tMin` en `tMax`, dus de
/// host bouwt hem opnieuw op wanneer een van beide verandert.
#[must_use]
pub fn parameter_slider(curve: &CurveSettings) -> Control {
    Control::Slider {
        label: "t".to_owned(),
        path: format!("functions.{}.t", curve.id),
        value: curve.t,
        min: curve.t_min,
        max: curve.t_max,
        step: SLIDER_STEP,
    }
}

/// Titel van de map van een curve: "Function A" voor id `a`.
#[must_use]
pub fn curve_title(id: &str) -> String {
    format!("Function {}", id.to_uppercase())
}
