use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use points_types::{Timeframe, VaultFilter};

use crate::event::AllocationEvent;
use crate::exclusions::ExclusionSet;

/// The full set of view parameters a consumer can vary. Derived views are
/// pure functions of (snapshot, params); a changed params value is a new
/// value, never a mutation of shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub vault: VaultFilter,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub exclude_team: bool,
    #[serde(default)]
    pub exclude_contracts: bool,
}

/// First filter stage: drop events from excluded holders. Order-preserving,
/// no deduplication; an empty input yields an empty output.
pub fn apply_exclusions(
    events: &[AllocationEvent],
    exclusions: &ExclusionSet,
    exclude_team: bool,
    exclude_contracts: bool,
) -> Vec<AllocationEvent> {
    if !exclude_team && !exclude_contracts {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|event| {
            if exclude_team && exclusions.is_team(&event.holder_address) {
                return false;
            }
            if exclude_contracts && exclusions.is_contract(&event.holder_address) {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// Second filter stage: restrict to one vault and/or a trailing time window.
///
/// The window is anchored at `anchor`, the max timestamp of the *unfiltered*
/// full snapshot: `7d` keeps `anchor - 7 days <= ts < now`, likewise `30d`.
/// Anchoring at the data rather than at the clock keeps the views coherent
/// when the upstream feed lags.
pub fn select_by_vault_and_time(
    events: &[AllocationEvent],
    vault: &VaultFilter,
    timeframe: Timeframe,
    anchor: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<AllocationEvent> {
    let window_start = match (timeframe.to_days(), anchor) {
        (Some(days), Some(anchor)) => Some(anchor - Duration::days(days)),
        (Some(_), None) => None, // no data, nothing can fall inside a window
        (None, _) => None,
    };

    events
        .iter()
        .filter(|event| vault.matches(&event.token_address))
        .filter(|event| match (timeframe.to_days(), window_start) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(start)) => event.timestamp >= start && event.timestamp < now,
        })
        .cloned()
        .collect()
}
