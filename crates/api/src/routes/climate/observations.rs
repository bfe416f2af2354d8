use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::error_response;
use crate::{
    db::{DailyReadings, StationListing},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation by date then station, 2016-08-23 through 2017-08-23", content_type = "application/json", body = std::collections::BTreeMap<String, std::collections::BTreeMap<String, Option<f64>>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query precipitation")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyReadings>, (StatusCode, String)> {
    state
        .climate
        .precipitation()
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "One `{station_id: name}` object per station", content_type = "application/json", body = Vec<std::collections::BTreeMap<String, String>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query stations")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationListing>, (StatusCode, String)> {
    state
        .climate
        .stations()
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations by date then station for the 365 days ending at the newest measurement", content_type = "application/json", body = std::collections::BTreeMap<String, std::collections::BTreeMap<String, Option<f64>>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature observations")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyReadings>, (StatusCode, String)> {
    state
        .climate
        .tobs()
        .await
        .map(Json)
        .map_err(error_response)
}
