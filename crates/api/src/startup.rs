use crate::{
    db::{ClimateAccess, ClimateData, Database, TemperatureStats},
    index_handler, precipitation, routes, start_date, startend_date, stations, tobs,
    ClimateService,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate: ClimateService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::home::index::index_handler,
        routes::climate::observations::precipitation,
        routes::climate::observations::stations,
        routes::climate::observations::tobs,
        routes::climate::temperature::start_date,
        routes::climate::temperature::startend_date,
    ),
    components(schemas(TemperatureStats)),
    tags(
        (name = "climate api", description = "a read-only RESTful api over station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    database_path: String,
    max_connections: u32,
    strict_dates: bool,
) -> Result<AppState, anyhow::Error> {
    let db = Database::new(&database_path, max_connections)
        .await
        .map_err(|e| anyhow!("error setting up observation database: {}", e))?;
    let climate_db: Arc<dyn ClimateData> = Arc::new(ClimateAccess::new(db));

    Ok(AppState {
        climate: ClimateService::new(climate_db, strict_dates),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start_date}", get(start_date))
        .route("/api/v1.0/{start_date}/{end_date}", get(startend_date))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_string();
    let method = request.method().clone();
    info!(target: "http_request", "new request, {} {}", method.as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(
        target: "http_response",
        "response, {} {}, code: {}, time: {}",
        method.as_str(),
        path,
        response.status().as_str(),
        response_time
    );

    response
}
