use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use points_engine::summary_view;

use crate::{
    AppState,
    dto::{ApiResponse, SummaryDto, SummaryQuery},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/summary",
    tag = "Points",
    params(
        ("exclude_team" = Option<bool>, Query, description = "Drop team wallets from the totals"),
        ("exclude_contracts" = Option<bool>, Query, description = "Drop protocol contract addresses from the totals")
    ),
    responses(
        (status = 200, description = "Global points summary", body = SummaryDto),
        (status = 503, description = "Points data unavailable")
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .store
        .current()
        .await
        .ok_or_else(ApiError::data_unavailable)?;

    let summary = summary_view(
        &snapshot.events,
        &state.exclusions,
        &query.into(),
        &state.seasons,
        Utc::now(),
    );

    Ok(Json(ApiResponse::ok(SummaryDto::from(summary))))
}
