use axum::response::Html;

use crate::service::route_listing;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "Listing of the available API routes", content_type = "text/html", body = String)
    ))]
pub async fn index_handler() -> Html<String> {
    Html(route_listing())
}
