use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use fuelmap_core::{nearest, rank, Coordinate, RankedStation, Station};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct UnrankedListing<'a> {
    pub ranked: bool,
    pub count: usize,
    pub stations: &'a [Station],
}

#[derive(Debug, Serialize)]
pub(super) struct RankedListing {
    pub ranked: bool,
    pub reference: Coordinate,
    pub radius_km: f64,
    pub count: usize,
    pub nearest: Option<RankedStation>,
    pub stations: Vec<RankedStation>,
}

pub(super) async fn list_stations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    unranked(&state, req_id)
}

pub(super) async fn nearby_stations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::validation(req_id.0.clone(), e.body_text()))?;

    let radius_km = resolve_radius(query.radius_km, state.max_radius_km)
        .map_err(|msg| ApiError::validation(req_id.0.clone(), msg))?;

    let reference = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?,
        (None, None) => {
            tracing::debug!("nearby request without coordinates; returning unranked listing");
            return Ok(unranked(&state, req_id));
        }
        _ => {
            return Err(ApiError::validation(
                req_id.0,
                "lat and lon must be provided together",
            ))
        }
    };

    let stations = rank(state.catalog.stations(), reference, radius_km)
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;
    let closest = nearest(&stations).cloned();

    Ok(Json(ApiResponse {
        data: RankedListing {
            ranked: true,
            reference,
            radius_km,
            count: stations.len(),
            nearest: closest,
            stations,
        },
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response())
}

fn unranked(state: &AppState, req_id: RequestId) -> Response {
    let stations = state.catalog.stations();
    Json(ApiResponse {
        data: UnrankedListing {
            ranked: false,
            count: stations.len(),
            stations,
        },
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}

/// Requested radius capped at `max_km`, or `max_km` when absent.
pub(super) fn resolve_radius(requested: Option<f64>, max_km: f64) -> Result<f64, String> {
    match requested {
        None => Ok(max_km),
        Some(km) if km.is_finite() && km > 0.0 => Ok(km.min(max_km)),
        Some(km) => Err(format!(
            "radius_km must be a positive number of kilometers, got {km}"
        )),
    }
}
