//! Map drawing: the surface trait and the session that owns what is drawn.

use fuelmap_core::Coordinate;

/// Handle to something drawn on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    User,
    Station,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub popup: String,
    /// Open the popup as soon as the marker is drawn.
    pub open_popup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageCircle {
    pub center: Coordinate,
    pub radius_m: f64,
}

/// A map that can draw markers and circles and move its viewport.
pub trait MapSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn add_marker(&mut self, marker: &Marker) -> LayerId;
    fn add_circle(&mut self, circle: &CoverageCircle) -> LayerId;
    fn remove_layer(&mut self, id: LayerId);
}

/// Tracks every layer this application put on a surface.
///
/// Station markers, the user marker and the coverage circle are each
/// replaced as a unit, so repeated queries never leave stale layers
/// behind.
#[derive(Debug)]
pub struct MapSession<M> {
    surface: M,
    station_markers: Vec<LayerId>,
    user_marker: Option<LayerId>,
    coverage: Option<LayerId>,
}

impl<M: MapSurface> MapSession<M> {
    #[must_use]
    pub fn new(surface: M) -> Self {
        Self {
            surface,
            station_markers: Vec::new(),
            user_marker: None,
            coverage: None,
        }
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.surface.set_view(center, zoom);
    }

    /// Remove all station markers drawn so far, then draw `markers`.
    pub fn replace_markers(&mut self, markers: &[Marker]) {
        self.clear_markers();
        self.station_markers = markers
            .iter()
            .map(|marker| self.surface.add_marker(marker))
            .collect();
    }

    pub fn clear_markers(&mut self) {
        for id in std::mem::take(&mut self.station_markers) {
            self.surface.remove_layer(id);
        }
    }

    /// Draw the user marker, replacing any previous one.
    pub fn place_user(&mut self, marker: &Marker) {
        self.clear_user();
        self.user_marker = Some(self.surface.add_marker(marker));
    }

    pub fn clear_user(&mut self) {
        if let Some(id) = self.user_marker.take() {
            self.surface.remove_layer(id);
        }
    }

    /// Draw the search radius around `center`, replacing any previous
    /// circle. The surface receives the radius in meters.
    pub fn draw_coverage(&mut self, center: Coordinate, radius_km: f64) {
        self.clear_coverage();
        let circle = CoverageCircle {
            center,
            radius_m: radius_km * 1000.0,
        };
        self.coverage = Some(self.surface.add_circle(&circle));
    }

    pub fn clear_coverage(&mut self) {
        if let Some(id) = self.coverage.take() {
            self.surface.remove_layer(id);
        }
    }

    #[must_use]
    pub fn station_marker_count(&self) -> usize {
        self.station_markers.len()
    }

    #[must_use]
    pub fn has_user_marker(&self) -> bool {
        self.user_marker.is_some()
    }

    #[must_use]
    pub fn has_coverage(&self) -> bool {
        self.coverage.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> &M {
        &self.surface
    }
}
