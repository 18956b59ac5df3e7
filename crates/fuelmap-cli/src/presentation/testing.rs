//! Recording surfaces for presentation and session tests.

use std::collections::BTreeMap;

use fuelmap_core::Coordinate;

use super::map::{CoverageCircle, LayerId, MapSurface, Marker};
use super::text::{Panel, UiText};

#[derive(Debug, Clone)]
pub enum Layer {
    Marker(Marker),
    Circle(CoverageCircle),
}

/// Keeps every live layer so tests can inspect what is on the map.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: u64,
    pub layers: BTreeMap<LayerId, Layer>,
    pub view: Option<(Coordinate, u8)>,
    pub removals: usize,
}

impl RecordingMap {
    pub fn live_markers(&self) -> Vec<&Marker> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::Marker(marker) => Some(marker),
                Layer::Circle(_) => None,
            })
            .collect()
    }

    pub fn live_circles(&self) -> Vec<&CoverageCircle> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::Circle(circle) => Some(circle),
                Layer::Marker(_) => None,
            })
            .collect()
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, layer);
        id
    }
}

impl MapSurface for RecordingMap {
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
        assert!(
            self.layers.remove(&id).is_some(),
            "removed unknown layer {id:?}"
        );
        self.removals += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingUi {
    pub panels: BTreeMap<Panel, String>,
}

impl RecordingUi {
    pub fn text(&self, panel: Panel) -> Option<&str> {
        self.panels.get(&panel).map(String::as_str)
    }
}

impl UiText for RecordingUi {
    fn set_text(&mut self, panel: Panel, text: &str) {
        self.panels.insert(panel, text.to_string());
    }

    fn clear(&mut self, panel: Panel) {
        self.panels.remove(&panel);
    }
}
