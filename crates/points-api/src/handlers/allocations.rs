use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};

use crate::{AppState, errors::ApiError};

/// Pass-through of the upstream allocation log. The body is forwarded
/// verbatim; shared caches may serve it for up to an hour.
#[utoipa::path(
    get,
    path = "/points_allocation",
    tag = "Points",
    responses(
        (status = 200, description = "Raw upstream allocation log, verbatim"),
        (status = 503, description = "Upstream points feed unavailable")
    )
)]
pub async fn get_points_allocation(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.source.fetch_raw_body().await.map_err(|err| {
        tracing::error!("Failed to fetch upstream allocations: {err}");
        ApiError::from(err)
    })?;

    Ok((
        [
            (CACHE_CONTROL, "public, s-maxage=3600"),
            (CONTENT_TYPE, "application/json"),
        ],
        body,
    ))
}
