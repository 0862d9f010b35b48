use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use points_engine::SeasonSummary;

/// Global totals over the exclusion-filtered snapshot. Point amounts are
/// decimal strings for precision.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryDto {
    pub total_points: Decimal,
    pub latest_day_points: Decimal,
    pub season_one_points: Decimal,
    pub season_two_points: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_event_at: Option<DateTime<Utc>>,
}

impl From<SeasonSummary> for SummaryDto {
    fn from(summary: SeasonSummary) -> Self {
        Self {
            total_points: summary.total_points,
            latest_day_points: summary.latest_day_points,
            season_one_points: summary.season_one_points,
            season_two_points: summary.season_two_points,
            latest_event_at: summary.latest_event_at,
        }
    }
}
