pub mod app_config;
pub mod config;
pub mod geo;
pub mod join;
pub mod rank;
pub mod stations;

pub use app_config::{AppConfig, Environment, SourceConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, Coordinate, DEFAULT_MAP_CENTER, EARTH_RADIUS_KM};
pub use join::{join, Catalog, PriceIndex};
pub use rank::{nearest, rank};
pub use stations::{FuelType, PriceEntry, PriceMap, RankedStation, Station, StationLocation};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("duplicate station id \"{id}\" in location dataset")]
    DuplicateStation { id: String },

    #[error("invalid coordinate (lat {latitude}, lon {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("search radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
