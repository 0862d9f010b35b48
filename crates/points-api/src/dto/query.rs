use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use points_engine::FilterParams;
use points_types::{Timeframe, VaultFilter};

/// Query parameters for the global summary endpoint
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SummaryQuery {
    #[serde(default)]
    pub exclude_team: bool,
    #[serde(default)]
    pub exclude_contracts: bool,
}

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LeaderboardQuery {
    #[serde(default)]
    #[schema(value_type = String)]
    pub vault: VaultFilter,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub exclude_team: bool,
    #[serde(default)]
    pub exclude_contracts: bool,
}

impl From<SummaryQuery> for FilterParams {
    fn from(query: SummaryQuery) -> Self {
        Self {
            exclude_team: query.exclude_team,
            exclude_contracts: query.exclude_contracts,
            ..Default::default()
        }
    }
}

impl From<LeaderboardQuery> for FilterParams {
    fn from(query: LeaderboardQuery) -> Self {
        Self {
            vault: query.vault,
            timeframe: query.timeframe,
            exclude_team: query.exclude_team,
            exclude_contracts: query.exclude_contracts,
        }
    }
}

/// Query parameters for the daily activity series endpoint
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ActivityQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}
