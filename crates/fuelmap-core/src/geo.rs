//! Coordinates and great-circle distance.

use std::fmt::Display;

use serde::Serialize;

use crate::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic center of Mexico, used when there is no user position.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    latitude: 23.6345,
    longitude: -102.5528,
};

/// A WGS84 position in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], which rejects non-finite
/// and out-of-range components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either component is not
    /// finite, latitude is outside `[-90, 90]`, or longitude is outside
    /// `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Haversine distance between `a` and `b` on a sphere of [`EARTH_RADIUS_KM`].
///
/// Symmetric in its arguments and zero for identical points. The haversine
/// term is clamped to `[0, 1]` so rounding near antipodal points cannot
/// produce `NaN`.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
