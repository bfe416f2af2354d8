use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_api::{
    app, db::Error, AppState, ClimateData, ClimateService, DateRange, Observation, Reading,
    Station, TemperatureStats,
};
use hyper::{header, Method};
use mockall::mock;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn readings_between(
            &self,
            observation: Observation,
            start: &str,
            end: &str,
        ) -> Result<Vec<Reading>, Error>;
        async fn latest_date(&self) -> Result<Option<String>, Error>;
        async fn stations(&self) -> Result<Vec<Station>, Error>;
        async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(climate_data: Arc<dyn ClimateData>) -> TestApp {
    spawn_app_with_policy(climate_data, false).await
}

pub async fn spawn_app_with_policy(
    climate_data: Arc<dyn ClimateData>,
    strict_dates: bool,
) -> TestApp {
    let app_state = AppState {
        climate: ClimateService::new(climate_data, strict_dates),
    };
    TestApp {
        app: app(app_state),
    }
}

impl TestApp {
    /// Issues a GET and returns the status with the body as text
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

pub fn reading(date: &str, station: &str, value: Option<f64>) -> Reading {
    Reading {
        date: date.to_string(),
        station: station.to_string(),
        value,
    }
}

pub fn mock_stations() -> Vec<Station> {
    vec![
        Station {
            station: "USC1".to_string(),
            name: "Station A".to_string(),
        },
        Station {
            station: "USC2".to_string(),
            name: "Station B".to_string(),
        },
    ]
}

pub fn storage_down() -> Error {
    Error::Query(sqlx::Error::PoolTimedOut)
}
