//! Integration tests for the HTTP backend client
//!
//! Each test starts an in-process axum stub that mimics the hazard backend.

use axum::{
    extract::Query,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use firewatch_client::{ClientError, HttpHazardApi};
use firewatch_domain::traits::HazardApi;
use firewatch_domain::{classify, ObservedAt, RadiusKm, SeverityTier, UserLocation};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Serve `app` on an ephemeral loopback port and return its base URL
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn fires() -> Json<Value> {
    Json(json!([
        {"id": "evt_1", "source": "eonet", "title": "A", "lat": 10, "lon": 20,
         "datetime": "2024-01-01T00:00:00Z", "confidence": 85},
        {"id": "firms_0", "source": "firms", "title": "FIRMS fire", "lat": -12.5, "lon": 131.25,
         "datetime": "2024-01-02", "confidence": 30}
    ]))
}

/// Echoes the query back through the title so the test can inspect it
async fn nearby(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let num = |key: &str| -> f64 {
        params
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(f64::NAN)
    };
    let echo = format!("{}|{}|{}", num("lat"), num("lon"), num("radius_km"));
    Json(json!([
        {"title": "far", "lat": 0, "lon": 0, "confidence": 70, "distance_km": 41.0},
        {"title": echo, "lat": 0, "lon": 0, "confidence": 90, "distance_km": 3.2}
    ]))
}

#[tokio::test]
async fn test_fetch_points_parses_backend_payload() {
    let base = spawn_stub(Router::new().route("/api/fires", get(fires))).await;
    let api = HttpHazardApi::new(&base).unwrap();

    let points = api.fetch_points().await.unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].title, "A");
    assert_eq!((points[0].latitude, points[0].longitude), (10.0, 20.0));
    assert_eq!(classify(points[0].confidence), SeverityTier::High);
    assert_eq!(classify(points[1].confidence), SeverityTier::Low);
    assert!(matches!(points[1].observed_at, ObservedAt::Timestamp(_)));
}

#[tokio::test]
async fn test_fetch_nearby_sends_query_and_sorts() {
    let base = spawn_stub(Router::new().route("/api/nearby", get(nearby))).await;
    let api = HttpHazardApi::new(&base).unwrap();

    let location = UserLocation::new(45.5, -122.25).unwrap();
    let radius = RadiusKm::new(100.0).unwrap();
    let results = api.fetch_nearby(location, radius).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].distance_km, 3.2);
    assert_eq!(results[0].point.title, "45.5|-122.25|100");
    assert_eq!(results[1].point.title, "far");
}

#[tokio::test]
async fn test_http_error_status() {
    let app = Router::new().route(
        "/api/fires",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let base = spawn_stub(app).await;
    let api = HttpHazardApi::new(&base).unwrap();

    match api.fetch_points().await {
        Err(ClientError::Http { status, message }) => {
            assert_eq!(status, 502);
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let app = Router::new().route("/api/fires", get(|| async { "<html>not json</html>" }));
    let base = spawn_stub(app).await;
    let api = HttpHazardApi::new(&base).unwrap();

    let result = api.fetch_points().await;
    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_empty_nearby() {
    let app = Router::new().route("/api/nearby", get(|| async { Json(json!([])) }));
    let base = spawn_stub(app).await;
    let api = HttpHazardApi::new(&base).unwrap();

    let location = UserLocation::new(0.0, 0.0).unwrap();
    let results = api
        .fetch_nearby(location, RadiusKm::new(50.0).unwrap())
        .await
        .unwrap();
    assert!(results.is_empty());
}
