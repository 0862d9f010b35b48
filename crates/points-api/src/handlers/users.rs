use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use points_engine::user_stats;

use crate::{
    AppState,
    dto::{ApiResponse, UserStatsDto},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/users/{address}/stats",
    tag = "User",
    params(
        ("address" = String, Path, description = "Holder wallet address (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Lifetime stats for the holder", body = UserStatsDto),
        (status = 404, description = "No allocations recorded for this address"),
        (status = 503, description = "Points data unavailable")
    )
)]
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .store
        .current()
        .await
        .ok_or_else(ApiError::data_unavailable)?;

    // Lifetime stats read the full snapshot; the exclusion toggles do not
    // apply here.
    let stats = user_stats(&snapshot.events, &address, &state.seasons)
        .ok_or_else(|| ApiError::NotFound(format!("No points found for address {address}")))?;

    Ok(Json(ApiResponse::ok(UserStatsDto::from_stats(
        address.to_lowercase(),
        stats,
    ))))
}
