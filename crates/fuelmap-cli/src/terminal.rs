//! Text-mode map and panels for the command line.
//!
//! Both collaborators keep only what is currently drawn; `render` prints
//! the final picture once the session settles.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use fuelmap_core::Coordinate;

use crate::presentation::text::format_km;
use crate::presentation::{CoverageCircle, LayerId, MapSurface, Marker, MarkerIcon, Panel, UiText};

#[derive(Debug, Clone)]
enum Layer {
    Marker(Marker),
    Circle(CoverageCircle),
}

#[derive(Debug, Default)]
pub struct TerminalMap {
    next_id: u64,
    view: Option<(Coordinate, u8)>,
    layers: BTreeMap<LayerId, Layer>,
}

impl TerminalMap {
    /// Draw instructions for the current view, one per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some((center, zoom)) = self.view {
            let _ = writeln!(out, "view {center} @ zoom {zoom}");
        }

        for layer in self.layers.values() {
            match layer {
                Layer::Circle(circle) => {
                    let _ = writeln!(
                        out,
                        "circle {} radius {} km",
                        circle.center,
                        format_km(circle.radius_m / 1000.0)
                    );
                }
                Layer::Marker(marker) => {
                    let kind = match marker.icon {
                        MarkerIcon::User => "you",
                        MarkerIcon::Station => "station",
                    };
                    let popup = marker.popup.replace('\n', " / ");
                    let _ = writeln!(out, "{kind} {} | {popup}", marker.position);
                }
            }
        }
        out
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, layer);
        id
    }
}

impl MapSurface for TerminalMap {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_marker(&mut self, marker: &Marker) -> LayerId {
        self.insert(Layer::Marker(marker.clone()))
    }

    fn add_circle(&mut self, circle: &CoverageCircle) -> LayerId {
        self.insert(Layer::Circle(*circle))
    }

    fn remove_layer(&mut self, id: LayerId) {
        if self.layers.remove(&id).is_none() {
            tracing::debug!(layer = id.0, "remove_layer on unknown layer");
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalUi {
    panels: BTreeMap<Panel, String>,
}

impl TerminalUi {
    /// Non-empty panels as `[panel] text` blocks.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (panel, text) in &self.panels {
            let _ = writeln!(out, "[{panel}] {text}");
        }
        out
    }
}

impl UiText for TerminalUi {
    fn set_text(&mut self, panel: Panel, text: &str) {
        self.panels.insert(panel, text.to_string());
    }

    fn clear(&mut self, panel: Panel) {
        self.panels.remove(&panel);
    }
}
