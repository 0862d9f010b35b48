use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use points_engine::{LeaderboardRow, VaultSubtotal};

/// One vault's contribution to a holder's total
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VaultSubtotalDto {
    pub vault: String,
    pub points: Decimal,
    pub last_update: DateTime<Utc>,
    pub active_on_latest_day: bool,
}

/// One ranked leaderboard entry with its per-vault breakdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardRowDto {
    pub rank: usize,
    pub address: String,
    pub total_points: Decimal,
    pub vault_count: usize,
    pub active_on_latest_day: bool,
    pub vaults: Vec<VaultSubtotalDto>,
}

impl From<VaultSubtotal> for VaultSubtotalDto {
    fn from(subtotal: VaultSubtotal) -> Self {
        Self {
            vault: subtotal.vault,
            points: subtotal.points,
            last_update: subtotal.last_update,
            active_on_latest_day: subtotal.active_on_latest_day,
        }
    }
}

impl From<LeaderboardRow> for LeaderboardRowDto {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            rank: row.rank,
            address: row.address,
            total_points: row.total_points,
            vault_count: row.vault_count,
            active_on_latest_day: row.active_on_latest_day,
            vaults: row.vaults.into_iter().map(Into::into).collect(),
        }
    }
}
