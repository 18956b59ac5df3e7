//! Station records at each stage of the pipeline.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::geo::Coordinate;

/// Fuel grade, normalized at ingestion.
///
/// Variant order drives the order prices are listed in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuelType {
    Regular,
    Premium,
    Diesel,
    /// Any other label, stored trimmed and lowercased.
    Other(String),
}

impl FuelType {
    /// Normalize a raw fuel label: trims whitespace and folds ASCII case.
    #[must_use]
    pub fn from_label(raw: &str) -> Self {
        let folded = raw.trim().to_ascii_lowercase();
        match folded.as_str() {
            "regular" => FuelType::Regular,
            "premium" => FuelType::Premium,
            "diesel" => FuelType::Diesel,
            _ => FuelType::Other(folded),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Regular => "regular",
            FuelType::Premium => "premium",
            FuelType::Diesel => "diesel",
            FuelType::Other(label) => label,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FuelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One `(fuel type, price)` pair from the price dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub fuel_type: FuelType,
    /// Non-negative, finite; currency implied by the source.
    pub amount: f64,
}

/// Prices for a single station, one amount per fuel type.
pub type PriceMap = BTreeMap<FuelType, f64>;

/// A station as listed in the location dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLocation {
    /// Source-assigned identifier, trimmed, never empty.
    pub id: String,
    pub name: String,
    /// Permit number issued by the energy regulator; empty when absent.
    pub regulatory_id: String,
    pub coordinate: Coordinate,
}

/// A station after its location has been joined with its prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub regulatory_id: String,
    pub coordinate: Coordinate,
    pub prices: PriceMap,
}

impl Station {
    /// Build a station from its location and a price list.
    ///
    /// When a fuel type repeats, the last entry wins.
    #[must_use]
    pub fn from_parts(location: StationLocation, entries: &[PriceEntry]) -> Self {
        let mut prices = PriceMap::new();
        for entry in entries {
            if let Some(previous) = prices.insert(entry.fuel_type.clone(), entry.amount) {
                tracing::debug!(
                    station_id = %location.id,
                    fuel_type = %entry.fuel_type,
                    previous,
                    amount = entry.amount,
                    "duplicate fuel type for station; keeping last value"
                );
            }
        }

        Self {
            id: location.id,
            name: location.name,
            regulatory_id: location.regulatory_id,
            coordinate: location.coordinate,
            prices,
        }
    }
}

/// A station annotated with its distance from a reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    #[serde(flatten)]
    pub station: Station,
    pub distance_km: f64,
}
