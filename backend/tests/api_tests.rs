//! HTTP API integration tests
//!
//! Drives the full router with in-memory upstreams:
//! - single and batched buoy endpoints, including degraded bodies
//! - hourly and text forecast endpoints
//! - leg listing, fleet risk and leg detail
//! - stateless classification

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{hour, observation, InMemoryForecasts, InMemoryObservations};
use sail_risk_backend::error::UpstreamError;
use sail_risk_backend::{create_app, AppState, Config};
use shared::models::default_legs;

fn app_with(observations: InMemoryObservations, forecasts: InMemoryForecasts) -> Router {
    let state = AppState::with_sources(
        Config::default(),
        Arc::new(observations),
        Arc::new(forecasts),
    );
    create_app(state)
}

fn default_app() -> Router {
    let legs = default_legs();
    let observations = InMemoryObservations::default()
        .with_station("46232", observation(8.0, 10.0, 3.0, 270.0))
        .with_station("46086", observation(10.0, 12.0, 4.0, 90.0))
        .with_failure("46999", UpstreamError::Status(404));
    let forecasts = InMemoryForecasts::default()
        .with_hourly(
            legs[0].midpoint.point(),
            vec![hour(10.0, 12.0, "Sunny"), hour(12.0, 14.0, "Sunny")],
        )
        .with_hourly(legs[1].midpoint.point(), vec![hour(20.0, 40.0, "Breezy")])
        .with_hourly_failure(
            shared::types::GeoPoint::new(10.0, 10.0),
            UpstreamError::Transport("timed out".to_string()),
        )
        .with_summary("Sunny, with a high near 72. West wind 5 to 10 mph.");
    app_with(observations, forecasts)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cache_control, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

// ============================================================================
// Service Endpoints
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get(default_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_ping() {
    let (status, _, body) = get(default_app(), "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["now"].as_i64().unwrap() > 0);
}

// ============================================================================
// Buoy Endpoints
// ============================================================================

#[tokio::test]
async fn test_single_buoy() {
    let (status, cache, body) = get(default_app(), "/api/buoy/46232").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache.as_deref(),
        Some("s-maxage=300, stale-while-revalidate=900")
    );
    assert_eq!(body["id"], "46232");
    assert_eq!(body["obs"]["sustainedWindKnots"], 8.0);
    assert_eq!(body["obs"]["airTempF"], Value::Null);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_single_buoy_upstream_failure_is_degraded_body() {
    let (status, _, body) = get(default_app(), "/api/buoy/46999").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["id"], "46999");
    assert_eq!(body["obs"], Value::Null);
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_single_buoy_rejects_bad_id() {
    let (status, _, body) = get(default_app(), "/api/buoy/46232abcdefgh").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "id");
}

#[tokio::test]
async fn test_buoy_batch_mixed_results() {
    let (status, cache, body) = get(default_app(), "/api/buoys?ids=46232,,46999").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cache.is_some());
    assert_eq!(body["ok"], true);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "46232");
    assert_eq!(results[0]["ok"], true);
    assert!(results[0].get("status").is_none());
    assert_eq!(results[1]["id"], "46999");
    assert_eq!(results[1]["ok"], false);
    assert_eq!(results[1]["status"], 404);
    assert_eq!(results[1]["obs"], Value::Null);
}

#[tokio::test]
async fn test_buoy_batch_requires_ids() {
    let (status, _, body) = get(default_app(), "/api/buoys?ids=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "ids");

    let (status, _, _) = get(default_app(), "/api/buoys").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Forecast Endpoints
// ============================================================================

#[tokio::test]
async fn test_hourly_forecast() {
    let point = default_legs()[0].midpoint.point();
    let uri = format!(
        "/api/forecast-hourly?lat={}&lon={}&hours=1",
        point.lat, point.lon
    );
    let (status, cache, body) = get(default_app(), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache.as_deref(),
        Some("s-maxage=900, stale-while-revalidate=1800")
    );
    let hours = body["hours"].as_array().unwrap();
    assert_eq!(hours.len(), 1);
    assert_eq!(hours[0]["windKnots"], 10.0);
    assert_eq!(hours[0]["directionText"], "W");
}

#[tokio::test]
async fn test_hourly_forecast_zero_hours_returns_one() {
    let point = default_legs()[0].midpoint.point();
    let uri = format!(
        "/api/forecast-hourly?lat={}&lon={}&hours=0",
        point.lat, point.lon
    );
    let (_, _, body) = get(default_app(), &uri).await;
    assert_eq!(body["hours"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hourly_forecast_rejects_bad_coordinates() {
    let (status, _, body) = get(default_app(), "/api/forecast-hourly?lat=95&lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_query_is_json_validation_error() {
    for uri in [
        "/api/forecast-hourly?lat=north&lon=-117.4",
        "/api/forecast-hourly?lon=-117.4",
        "/api/forecast-hourly?lat=33.2&lon=-117.4&hours=many",
        "/api/forecast?lat=33.2",
    ] {
        let (status, _, body) = get(default_app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{}", uri);
        assert_eq!(body["error"]["field"], "query", "{}", uri);
        assert!(body["error"]["message"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_hourly_forecast_upstream_failure() {
    let (status, _, body) = get(default_app(), "/api/forecast-hourly?lat=10&lon=10").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_forecast_summary() {
    let (status, _, body) = get(default_app(), "/api/forecast?lat=33.5&lon=-118.0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].as_str().unwrap().starts_with("Sunny"));
}

// ============================================================================
// Leg Endpoints
// ============================================================================

#[tokio::test]
async fn test_list_legs() {
    let (status, _, body) = get(default_app(), "/api/legs").await;
    assert_eq!(status, StatusCode::OK);
    let legs = body.as_array().unwrap();
    assert_eq!(legs.len(), 3);
    assert_eq!(legs[0]["title"], "Leg 1: San Diego → Oceanside");
    assert_eq!(legs[0]["comfortCopy"], "up to 22 kt / 6 ft");
}

#[tokio::test]
async fn test_legs_risk() {
    let (status, _, body) = get(default_app(), "/api/legs/risk").await;
    assert_eq!(status, StatusCode::OK);
    let legs = body.as_array().unwrap();
    assert_eq!(legs.len(), 3);

    assert_eq!(legs[0]["legId"], "1");
    assert_eq!(legs[0]["status"], "green");
    assert_eq!(legs[0]["risk"], "LOW");
    // Leg 2's 40 kt forecast gust breaches its 32 kt comfort gust
    assert_eq!(legs[1]["status"], "red");
    assert_eq!(legs[1]["risk"], "HIGH");
    assert_eq!(legs[1]["signals"]["gusty"], true);
    assert!(legs[1]["rationale"]
        .as_str()
        .unwrap()
        .contains("gusts ~40kt"));
}

#[tokio::test]
async fn test_leg_detail() {
    let (status, _, body) = get(default_app(), "/api/legs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["legId"], "1");
    assert_eq!(body["comfortCopy"], "up to 22 kt / 6 ft");

    let stations = body["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0]["id"], "46232");
    assert_eq!(stations[0]["windDirectionText"], "W");
    assert_eq!(stations[1]["windDirectionText"], "E");
    assert_eq!(body["hourly"].as_array().unwrap().len(), 2);
    assert!(body["forecastSummary"].as_str().is_some());

    let advisories = body["advisories"].as_array().unwrap();
    assert_eq!(advisories.last().unwrap()["title"], "Sunny");
    assert_eq!(advisories.last().unwrap()["kind"], "info");
}

#[tokio::test]
async fn test_unknown_leg_is_not_found() {
    let (status, _, body) = get(default_app(), "/api/legs/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ============================================================================
// Classification Endpoint
// ============================================================================

#[tokio::test]
async fn test_classify_gust_breach() {
    let body = json!({
        "comfort": { "windKnots": 15, "gustKnots": 22, "waveFeet": 4 },
        "observations": [],
        "hourly": [{
            "time": null, "windKnots": 12, "gustKnots": 30,
            "directionDeg": null, "shortForecastText": "Sunny"
        }]
    });
    let (status, body) = post_json(default_app(), "/api/risk/classify", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "red");
    assert_eq!(body["risk"], "HIGH");
    assert!(body["rationale"]
        .as_str()
        .unwrap()
        .starts_with("Plan exceeds comfort limits."));
}

#[tokio::test]
async fn test_classify_defaults_to_green_without_data() {
    let body = json!({ "comfort": { "windKnots": 15, "gustKnots": 22, "waveFeet": 4 } });
    let (status, body) = post_json(default_app(), "/api/risk/classify", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "green");
    assert_eq!(body["advisories"], json!([]));
}

#[tokio::test]
async fn test_classify_rejects_non_positive_comfort() {
    let body = json!({ "comfort": { "windKnots": 0, "gustKnots": 22, "waveFeet": 4 } });
    let (status, body) = post_json(default_app(), "/api/risk/classify", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "comfort");
}
