use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use points_engine::leaderboard_view;

use crate::{
    AppState,
    dto::{ApiResponse, LeaderboardQuery, LeaderboardRowDto},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Points",
    params(
        ("vault" = Option<String>, Query, description = "Vault token address, or `all`"),
        ("timeframe" = Option<String>, Query, description = "`all`, `7d` or `30d`, anchored at the latest allocation"),
        ("exclude_team" = Option<bool>, Query, description = "Drop team wallets"),
        ("exclude_contracts" = Option<bool>, Query, description = "Drop protocol contract addresses")
    ),
    responses(
        (status = 200, description = "Ranked holders with per-vault breakdowns", body = [LeaderboardRowDto]),
        (status = 503, description = "Points data unavailable")
    )
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .store
        .current()
        .await
        .ok_or_else(ApiError::data_unavailable)?;

    // Time windows stay anchored at the full snapshot's latest timestamp even
    // when exclusions drop the event that set it.
    let rows = leaderboard_view(&snapshot.events, &state.exclusions, &query.into(), Utc::now());

    let rows: Vec<LeaderboardRowDto> = rows.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(rows)))
}
