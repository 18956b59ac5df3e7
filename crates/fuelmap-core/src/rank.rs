//! Radius filter and distance ranking.

use crate::geo::{distance_km, Coordinate};
use crate::stations::{RankedStation, Station};
use crate::CoreError;

/// Rank `stations` by distance from `reference`, keeping those within
/// `radius_km`.
///
/// The result is sorted ascending by distance; equal distances keep their
/// input order. An empty result means nothing is in range.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRadius`] unless `radius_km` is finite and
/// strictly positive.
pub fn rank(
    stations: &[Station],
    reference: Coordinate,
    radius_km: f64,
) -> Result<Vec<RankedStation>, CoreError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(CoreError::InvalidRadius(radius_km));
    }

    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .filter_map(|station| {
            let distance = distance_km(reference, station.coordinate);
            (distance <= radius_km).then(|| RankedStation {
                station: station.clone(),
                distance_km: distance,
            })
        })
        .collect();

    // `sort_by` is stable, which keeps dataset order on exact ties.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        candidates = stations.len(),
        in_range = ranked.len(),
        radius_km,
        "ranked stations"
    );

    Ok(ranked)
}

/// The closest station of a ranked result, if any.
#[must_use]
pub fn nearest(ranked: &[RankedStation]) -> Option<&RankedStation> {
    ranked.first()
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
