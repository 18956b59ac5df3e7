//! Status panels and the strings shown in them.

use fuelmap_core::{Coordinate, RankedStation, Station};

use super::prices::format_prices;

/// Text areas next to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    UserLocation,
    StationCount,
    ClosestStation,
    Notice,
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Panel::UserLocation => write!(f, "location"),
            Panel::StationCount => write!(f, "stations"),
            Panel::ClosestStation => write!(f, "closest"),
            Panel::Notice => write!(f, "notice"),
        }
    }
}

pub trait UiText {
    fn set_text(&mut self, panel: Panel, text: &str);
    fn clear(&mut self, panel: Panel);
}

pub const USER_POPUP: &str = "Your current location";
pub const LOADING_NOTICE: &str = "Loading stations...";

/// `50` for whole kilometers, `12.5` otherwise.
pub(crate) fn format_km(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{km:.0}")
    } else {
        format!("{km}")
    }
}

#[must_use]
pub fn location_text(position: Coordinate) -> String {
    format!(
        "Lat: {:.5}, Lon: {:.5}",
        position.latitude(),
        position.longitude()
    )
}

#[must_use]
pub fn count_text(count: usize, radius_km: f64) -> String {
    format!("Nearby stations ({} km): {count}", format_km(radius_km))
}

#[must_use]
pub fn empty_text(radius_km: f64) -> String {
    format!("No stations within {} km", format_km(radius_km))
}

#[must_use]
pub fn nearest_text(nearest: &RankedStation) -> String {
    format!(
        "Nearest: {} ({:.2} km)\n{}",
        nearest.station.name,
        nearest.distance_km,
        format_prices(&nearest.station.prices)
    )
}

#[must_use]
pub fn unranked_text(count: usize) -> String {
    format!("Location unavailable \u{2014} showing all {count} stations (unranked)")
}

#[must_use]
pub fn failure_text(reason: &str) -> String {
    format!("Could not load stations: {reason}")
}

#[must_use]
pub fn ranked_popup(ranked: &RankedStation) -> String {
    format!(
        "{}\n{:.2} km\n{}",
        ranked.station.name,
        ranked.distance_km,
        format_prices(&ranked.station.prices)
    )
}

#[must_use]
pub fn unranked_popup(station: &Station) -> String {
    format!("{}\n{}", station.name, format_prices(&station.prices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelmap_core::{FuelType, PriceMap};

    fn station(prices: PriceMap) -> Station {
        Station {
            id: "1".into(),
            name: "GASOLINERA CENTRO".into(),
            regulatory_id: "PL/1/EXP/ES/2015".into(),
            coordinate: Coordinate::new(19.4326, -99.1332).unwrap(),
            prices,
        }
    }

    #[test]
    fn location_uses_five_decimals() {
        let here = Coordinate::new(19.432_608, -99.133_209).unwrap();
        assert_eq!(location_text(here), "Lat: 19.43261, Lon: -99.13321");
    }

    #[test]
    fn count_and_empty_state_name_the_radius() {
        assert_eq!(count_text(3, 50.0), "Nearby stations (50 km): 3");
        assert_eq!(empty_text(50.0), "No stations within 50 km");
        assert_eq!(empty_text(12.5), "No stations within 12.5 km");
    }

    #[test]
    fn unranked_notice_mentions_fallback() {
        assert_eq!(
            unranked_text(12),
            "Location unavailable \u{2014} showing all 12 stations (unranked)"
        );
    }

    #[test]
    fn ranked_popup_lists_distance_and_prices() {
        let mut prices = PriceMap::new();
        prices.insert(FuelType::Regular, 22.5);
        let ranked = RankedStation {
            station: station(prices),
            distance_km: 4.999,
        };
        assert_eq!(
            ranked_popup(&ranked),
            "GASOLINERA CENTRO\n5.00 km\nRegular: $22.50"
        );
        assert_eq!(
            nearest_text(&ranked),
            "Nearest: GASOLINERA CENTRO (5.00 km)\nRegular: $22.50"
        );
    }

    #[test]
    fn unranked_popup_has_no_distance() {
        assert_eq!(
            unranked_popup(&station(PriceMap::new())),
            "GASOLINERA CENTRO\nPrices unavailable"
        );
    }
}
