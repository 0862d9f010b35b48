use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use points_engine::activity_series;

use crate::{
    AppState,
    dto::{ActivityPointDto, ActivityQuery, ApiResponse},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/activity",
    tag = "Points",
    params(
        ("from" = Option<String>, Query, description = "First day to include (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Last day to include (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Daily totals and distinct active addresses, ascending by date", body = [ActivityPointDto]),
        (status = 503, description = "Points data unavailable")
    )
)]
pub async fn get_activity_series(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .store
        .current()
        .await
        .ok_or_else(ApiError::data_unavailable)?;

    let series: Vec<ActivityPointDto> = activity_series(&snapshot.events, query.from, query.to)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::ok(series)))
}
