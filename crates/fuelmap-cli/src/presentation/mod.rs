//! Turns ranking results into map layers and panel text.

pub mod map;
pub mod prices;
pub mod text;

#[cfg(test)]
pub(crate) mod testing;

use fuelmap_core::{nearest, Coordinate, RankedStation, Station, DEFAULT_MAP_CENTER};

pub use map::{CoverageCircle, LayerId, MapSession, MapSurface, Marker, MarkerIcon};
pub use prices::{format_prices, parse_prices, PriceTextError};
pub use text::{Panel, UiText};

/// Zoom used for the country-wide view.
pub const DEFAULT_ZOOM: u8 = 5;

/// Owns the map session and the text panels for one session.
#[derive(Debug)]
pub struct Presenter<M, U> {
    map: MapSession<M>,
    ui: U,
    zoom: u8,
}

impl<M: MapSurface, U: UiText> Presenter<M, U> {
    /// `zoom` is used whenever the view is centered on the user.
    #[must_use]
    pub fn new(surface: M, ui: U, zoom: u8) -> Self {
        Self {
            map: MapSession::new(surface),
            ui,
            zoom,
        }
    }

    pub fn render_loading(&mut self) {
        self.ui.set_text(Panel::Notice, text::LOADING_NOTICE);
    }

    /// Show stations ranked around `reference` with the search radius drawn.
    pub fn render_ranked(&mut self, ranked: &[RankedStation], reference: Coordinate, radius_km: f64) {
        self.map.set_view(reference, self.zoom);
        self.map.place_user(&user_marker(reference));
        self.map.draw_coverage(reference, radius_km);

        let markers: Vec<Marker> = ranked
            .iter()
            .map(|r| station_marker(r.station.coordinate, text::ranked_popup(r)))
            .collect();
        self.map.replace_markers(&markers);

        self.ui
            .set_text(Panel::UserLocation, &text::location_text(reference));
        self.ui.clear(Panel::Notice);

        if let Some(closest) = nearest(ranked) {
            self.ui.set_text(
                Panel::StationCount,
                &text::count_text(ranked.len(), radius_km),
            );
            self.ui
                .set_text(Panel::ClosestStation, &text::nearest_text(closest));
        } else {
            self.ui
                .set_text(Panel::StationCount, &text::empty_text(radius_km));
            self.ui.clear(Panel::ClosestStation);
        }
    }

    /// Show every station without distances, centered on the country.
    pub fn render_unranked(&mut self, stations: &[Station]) {
        self.map.set_view(DEFAULT_MAP_CENTER, DEFAULT_ZOOM);
        self.map.clear_coverage();
        self.map.clear_user();

        let markers: Vec<Marker> = stations
            .iter()
            .map(|s| station_marker(s.coordinate, text::unranked_popup(s)))
            .collect();
        self.map.replace_markers(&markers);

        self.ui.clear(Panel::UserLocation);
        self.ui.clear(Panel::StationCount);
        self.ui.clear(Panel::ClosestStation);
        self.ui
            .set_text(Panel::Notice, &text::unranked_text(stations.len()));
    }

    /// Show a load failure, keeping the user marker when a position is known.
    pub fn render_failure(&mut self, reference: Option<Coordinate>, reason: &str) {
        self.map.clear_markers();
        self.map.clear_coverage();

        match reference {
            Some(position) => {
                self.map.set_view(position, self.zoom);
                self.map.place_user(&user_marker(position));
                self.ui
                    .set_text(Panel::UserLocation, &text::location_text(position));
            }
            None => {
                self.map.set_view(DEFAULT_MAP_CENTER, DEFAULT_ZOOM);
                self.map.clear_user();
                self.ui.clear(Panel::UserLocation);
            }
        }

        self.ui.clear(Panel::StationCount);
        self.ui.clear(Panel::ClosestStation);
        self.ui.set_text(Panel::Notice, &text::failure_text(reason));
    }

    #[must_use]
    pub fn map(&self) -> &MapSession<M> {
        &self.map
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }
}

fn user_marker(position: Coordinate) -> Marker {
    Marker {
        position,
        icon: MarkerIcon::User,
        popup: text::USER_POPUP.to_string(),
        open_popup: true,
    }
}

fn station_marker(position: Coordinate, popup: String) -> Marker {
    Marker {
        position,
        icon: MarkerIcon::Station,
        popup,
        open_popup: false,
    }
}

#[cfg(test)]
#[path = "presenter_test.rs"]
mod tests;
