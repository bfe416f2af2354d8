pub mod observations;
pub mod temperature;

pub use observations::*;
pub use temperature::*;

use axum::http::StatusCode;
use log::{error, warn};

use crate::service;

pub(crate) fn error_response(err: service::Error) -> (StatusCode, String) {
    match err {
        service::Error::InvalidDate(_) => {
            warn!("rejected request: {}", err);
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        service::Error::NoMeasurements => {
            warn!("nothing to summarize: {}", err);
            (StatusCode::NOT_FOUND, err.to_string())
        }
        service::Error::Data(_)
        | service::Error::StoredDate { .. }
        | service::Error::DateFormat(_) => {
            error!("error querying observations: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to query observations: {}", err),
            )
        }
    }
}
