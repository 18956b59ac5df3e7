use super::stations::resolve_radius;
use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use fuelmap_core::{Coordinate, FuelType, PriceEntry, PriceIndex, StationLocation};
use tower::ServiceExt;

const KM_PER_DEGREE: f64 = 111.195;

fn location(id: &str, north_km: f64) -> StationLocation {
    StationLocation {
        id: id.to_string(),
        name: format!("Station {id}"),
        regulatory_id: format!("PL/{id}"),
        coordinate: Coordinate::new(19.4326 + north_km / KM_PER_DEGREE, -99.1332)
            .expect("valid coordinate"),
    }
}

/// Three stations due north of the Zócalo at about 49, 5 and 51 km.
fn test_state() -> AppState {
    let locations = vec![location("49", 49.0), location("5", 5.0), location("51", 51.0)];
    let mut prices = PriceIndex::new();
    prices.insert(
        "5".to_string(),
        vec![PriceEntry {
            fuel_type: FuelType::Regular,
            amount: 22.5,
        }],
    );
    let catalog = Catalog::from_parts(locations, &prices).expect("catalog");
    AppState {
        catalog: Arc::new(catalog),
        max_radius_km: 50.0,
    }
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = build_app(test_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["data"]["stations"]
        .as_array()
        .expect("stations array")
        .iter()
        .map(|s| s["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_station_count_and_request_id() {
    let response = build_app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let header_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .expect("ascii")
        .to_string();

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["stations"], 3);
    assert_eq!(json["meta"]["request_id"], header_id.as_str());
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let response = build_app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"abc-123"[..])
    );
}

#[tokio::test]
async fn list_is_unranked_in_dataset_order() {
    let (status, json) = get_json("/api/v1/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ranked"], false);
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(ids(&json), vec!["49", "5", "51"]);
    assert!(json["data"]["stations"][0].get("distance_km").is_none());
}

#[tokio::test]
async fn nearby_ranks_within_radius() {
    let (status, json) = get_json("/api/v1/stations/nearby?lat=19.4326&lon=-99.1332").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ranked"], true);
    assert_eq!(json["data"]["radius_km"], 50.0);
    assert_eq!(ids(&json), vec!["5", "49"]);
    assert_eq!(json["data"]["nearest"]["id"], "5");
    assert_eq!(json["data"]["nearest"]["prices"]["regular"], 22.5);

    let first = json["data"]["stations"][0]["distance_km"]
        .as_f64()
        .expect("distance");
    assert!((first - 5.0).abs() < 0.01);
}

#[tokio::test]
async fn nearby_caps_radius_at_maximum() {
    let (status, json) =
        get_json("/api/v1/stations/nearby?lat=19.4326&lon=-99.1332&radius_km=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["radius_km"], 50.0);
    assert_eq!(json["data"]["count"], 2);
}

#[tokio::test]
async fn nearby_with_small_radius_can_be_empty() {
    let (status, json) =
        get_json("/api/v1/stations/nearby?lat=19.4326&lon=-99.1332&radius_km=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 0);
    assert!(json["data"]["nearest"].is_null());
}

#[tokio::test]
async fn nearby_without_coordinates_falls_back_to_unranked() {
    let (status, json) = get_json("/api/v1/stations/nearby").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ranked"], false);
    assert_eq!(json["data"]["count"], 3);
}

#[tokio::test]
async fn nearby_rejects_bad_input() {
    for uri in [
        "/api/v1/stations/nearby?lat=91&lon=0",
        "/api/v1/stations/nearby?lat=abc&lon=0",
        "/api/v1/stations/nearby?lat=19.4",
        "/api/v1/stations/nearby?lat=19.4&lon=-99.1&radius_km=-5",
        "/api/v1/stations/nearby?lat=19.4&lon=-99.1&radius_km=0",
    ] {
        let (status, json) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"]["code"], "validation_error", "{uri}");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, json) = get_json("/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::validation("req-1", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn resolve_radius_defaults_caps_and_rejects() {
    assert_eq!(resolve_radius(None, 50.0), Ok(50.0));
    assert_eq!(resolve_radius(Some(12.5), 50.0), Ok(12.5));
    assert_eq!(resolve_radius(Some(80.0), 50.0), Ok(50.0));
    assert!(resolve_radius(Some(f64::NAN), 50.0).is_err());
    assert!(resolve_radius(Some(0.0), 50.0).is_err());
}
