//! Merging the location dataset with the price dataset.

use std::collections::{HashMap, HashSet};

use crate::stations::{PriceEntry, Station, StationLocation};
use crate::CoreError;

/// Price entries keyed by station id, in document order per station.
pub type PriceIndex = HashMap<String, Vec<PriceEntry>>;

/// Join station locations with their prices.
///
/// Output order matches `locations`. A location with no price entry gets an
/// empty price map. Price ids that match no location are logged and ignored.
///
/// # Errors
///
/// Returns [`CoreError::DuplicateStation`] if two locations share an id.
pub fn join(
    locations: Vec<StationLocation>,
    prices_by_id: &PriceIndex,
) -> Result<Vec<Station>, CoreError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(locations.len());
    for location in &locations {
        if !seen.insert(location.id.clone()) {
            return Err(CoreError::DuplicateStation {
                id: location.id.clone(),
            });
        }
    }

    let unmatched = prices_by_id
        .keys()
        .filter(|id| !seen.contains(id.as_str()))
        .count();
    if unmatched > 0 {
        tracing::debug!(unmatched, "price entries without a matching station location");
    }

    let stations: Vec<Station> = locations
        .into_iter()
        .map(|location| {
            let entries = prices_by_id
                .get(&location.id)
                .map_or(&[][..], Vec::as_slice);
            Station::from_parts(location, entries)
        })
        .collect();

    let priced = stations.iter().filter(|s| !s.prices.is_empty()).count();
    tracing::debug!(stations = stations.len(), priced, "joined station datasets");

    Ok(stations)
}

/// The joined station set for one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Join `locations` with `prices_by_id` into a catalog.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::DuplicateStation`] from [`join`].
    pub fn from_parts(
        locations: Vec<StationLocation>,
        prices_by_id: &PriceIndex,
    ) -> Result<Self, CoreError> {
        let stations = join(locations, prices_by_id)?;
        let by_id = stations
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id.clone(), idx))
            .collect();
        Ok(Self { stations, by_id })
    }

    /// Stations in location-dataset order.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Station with the given (trimmed) id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.by_id.get(id).map(|&idx| &self.stations[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn into_stations(self) -> Vec<Station> {
        self.stations
    }
}

#[cfg(test)]
#[path = "join_test.rs"]
mod tests;
