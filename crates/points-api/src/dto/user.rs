use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use points_engine::UserLifetimeStats;

/// Lifetime analytics for one holder address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStatsDto {
    pub address: String,
    pub total_points: Decimal,
    pub season_one_points: Decimal,
    pub season_two_points: Decimal,
    pub longest_streak_days: u32,
    pub unique_vault_count: usize,
    pub top_vault: String,
    pub latest_day_points: Decimal,
    pub rank: usize,
    pub projected_next_rank: usize,
}

impl UserStatsDto {
    pub fn from_stats(address: String, stats: UserLifetimeStats) -> Self {
        Self {
            address,
            total_points: stats.total_points,
            season_one_points: stats.season_one_points,
            season_two_points: stats.season_two_points,
            longest_streak_days: stats.longest_streak_days,
            unique_vault_count: stats.unique_vault_count,
            top_vault: stats.top_vault,
            latest_day_points: stats.latest_day_points,
            rank: stats.rank,
            projected_next_rank: stats.projected_next_rank,
        }
    }
}
