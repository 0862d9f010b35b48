use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();

    // Snapshot-wide views plus the raw upstream pass-through
    let points_router = Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/activity", get(handlers::get_activity_series))
        .route("/points_allocation", get(handlers::get_points_allocation));

    // Per-address analytics
    let users_router = Router::new().route("/{address}/stats", get(handlers::get_user_stats));

    Router::new()
        .route("/health", get(health))
        .nest("/v1", points_router)
        .nest("/v1/users", users_router)
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
