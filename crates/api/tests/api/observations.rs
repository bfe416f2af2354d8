use crate::helpers::{mock_stations, reading, spawn_app, storage_down, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::Observation;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn home_lists_available_routes() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Available Routes:<br/>"));
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start_date",
        "/api/v1.0/start_date/end_date",
    ] {
        assert!(body.contains(&format!("{}<br/>", route)), "missing {}", route);
    }
}

#[tokio::test]
async fn precipitation_queries_fixed_window_and_nests_by_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_readings_between()
        .withf(|observation, start, end| {
            *observation == Observation::Precipitation
                && start == "2016-08-23"
                && end == "2017-08-23"
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(vec![
                reading("2017-01-01", "USC1", Some(0.1)),
                reading("2017-01-01", "USC2", Some(0.0)),
                reading("2017-01-02", "USC1", None),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"2017-01-01":{"USC1":0.1,"USC2":0.0},"2017-01-02":{"USC1":null}}"#
    );
}

#[tokio::test]
async fn stations_are_singleton_objects_in_query_order() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Ok(mock_stations()));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"USC1":"Station A"},{"USC2":"Station B"}]"#);
}

#[tokio::test]
async fn tobs_window_spans_365_days_before_latest_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_latest_date()
        .times(1)
        .returning(|| Ok(Some("2017-08-23".to_string())));
    climate_data
        .expect_readings_between()
        .withf(|observation, start, end| {
            *observation == Observation::Temperature
                && start == "2016-08-23"
                && end == "2017-08-23"
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(vec![
                reading("2016-08-23", "USC1", Some(81.0)),
                reading("2017-08-23", "USC1", Some(79.0)),
                reading("2017-08-23", "USC2", Some(82.0)),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!({
            "2016-08-23": {"USC1": 81.0},
            "2017-08-23": {"USC1": 79.0, "USC2": 82.0}
        })
    );
}

#[tokio::test]
async fn tobs_window_counts_leap_day() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_latest_date()
        .returning(|| Ok(Some("2016-12-31".to_string())));
    climate_data
        .expect_readings_between()
        .withf(|_, start, end| start == "2016-01-01" && end == "2016-12-31")
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, _) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn tobs_without_measurements_is_empty_object() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_latest_date()
        .times(1)
        .returning(|| Ok(None));
    climate_data.expect_readings_between().times(0);

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn storage_failure_is_server_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_readings_between()
        .returning(|_, _, _| Err(storage_down()));
    climate_data
        .expect_stations()
        .returning(|| Err(storage_down()));
    climate_data
        .expect_latest_date()
        .returning(|| Err(storage_down()));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-01-01",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert!(body.starts_with("Failed to query observations"), "{}", uri);
    }
}

#[tokio::test]
async fn repeated_requests_return_identical_bytes() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_readings_between()
        .times(2)
        .returning(|_, _, _| {
            Ok(vec![
                reading("2017-01-02", "USC2", Some(0.3)),
                reading("2017-01-01", "USC1", Some(0.1)),
                reading("2017-01-02", "USC1", Some(0.2)),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let first = test_app.get("/api/v1.0/precipitation").await;
    let second = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(first, second);
    assert_eq!(
        first.1,
        r#"{"2017-01-01":{"USC1":0.1},"2017-01-02":{"USC1":0.2,"USC2":0.3}}"#
    );
}
