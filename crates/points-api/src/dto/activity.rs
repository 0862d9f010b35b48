use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use points_engine::ActivityPoint;

/// One day of snapshot-wide activity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityPointDto {
    pub date: NaiveDate,
    pub total_points: Decimal,
    pub active_addresses: usize,
}

impl From<ActivityPoint> for ActivityPointDto {
    fn from(point: ActivityPoint) -> Self {
        Self {
            date: point.date,
            total_points: point.total_points,
            active_addresses: point.active_addresses,
        }
    }
}
