use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::error_response;
use crate::{
    db::{RangeSummary, TemperatureStats},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start_date}",
    params(
        ("start_date" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "TMIN/TAVG/TMAX from start_date through the newest measurement, keyed by \"<start_date> to <last_date>\"", content_type = "application/json", body = std::collections::BTreeMap<String, TemperatureStats>),
        (status = BAD_REQUEST, description = "Malformed date (only when strict date checking is enabled)"),
        (status = NOT_FOUND, description = "No measurements are stored"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature aggregates")
    ))]
pub async fn start_date(
    State(state): State<Arc<AppState>>,
    Path(start_date): Path<String>,
) -> Result<Json<RangeSummary>, (StatusCode, String)> {
    state
        .climate
        .start_date(&start_date)
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start_date}/{end_date}",
    params(
        ("start_date" = String, Path, description = "First date to include, YYYY-MM-DD"),
        ("end_date" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "TMIN/TAVG/TMAX over the inclusive range, keyed by \"<start_date> to <end_date>\"", content_type = "application/json", body = std::collections::BTreeMap<String, TemperatureStats>),
        (status = BAD_REQUEST, description = "Malformed date (only when strict date checking is enabled)"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature aggregates")
    ))]
pub async fn startend_date(
    State(state): State<Arc<AppState>>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<RangeSummary>, (StatusCode, String)> {
    state
        .climate
        .startend_date(&start_date, &end_date)
        .await
        .map(Json)
        .map_err(error_response)
}
