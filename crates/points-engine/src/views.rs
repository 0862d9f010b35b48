use chrono::{DateTime, Utc};

use crate::event::{AllocationEvent, latest_timestamp};
use crate::exclusions::ExclusionSet;
use crate::filter::{FilterParams, apply_exclusions};
use crate::leaderboard::{LeaderboardRow, build_leaderboard};
use crate::seasons::SeasonConfig;
use crate::summary::{SeasonSummary, summarize};

/// Global summary over the exclusion-filtered snapshot. The vault and
/// timeframe selectors do not apply here; the summary is always computed over
/// the otherwise-unrestricted set.
pub fn summary_view(
    events: &[AllocationEvent],
    exclusions: &ExclusionSet,
    params: &FilterParams,
    seasons: &SeasonConfig,
    now: DateTime<Utc>,
) -> SeasonSummary {
    let filtered = apply_exclusions(
        events,
        exclusions,
        params.exclude_team,
        params.exclude_contracts,
    );
    summarize(&filtered, seasons, now)
}

/// Ranked leaderboard for the given parameters. Time windows anchor at the
/// raw snapshot's latest timestamp, taken before any filtering.
pub fn leaderboard_view(
    events: &[AllocationEvent],
    exclusions: &ExclusionSet,
    params: &FilterParams,
    now: DateTime<Utc>,
) -> Vec<LeaderboardRow> {
    let anchor = latest_timestamp(events);
    let filtered = apply_exclusions(
        events,
        exclusions,
        params.exclude_team,
        params.exclude_contracts,
    );
    build_leaderboard(&filtered, &params.vault, params.timeframe, anchor, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ev, ts};
    use rust_decimal::{Decimal, dec};

    fn sample() -> Vec<AllocationEvent> {
        vec![
            ev("0xTeam", "0xv1", "P-6", dec!(50), ts(2024, 6, 10, 8)),
            ev("0xaaa", "0xv1", "P-1", dec!(10), ts(2024, 6, 9, 8)),
            ev("0xaaa", "0xv2", "P-6", dec!(5), ts(2024, 6, 10, 7)),
            ev("0xbbb", "0xv1", "P-6", dec!(8), ts(2024, 6, 8, 8)),
        ]
    }

    #[test]
    fn test_excluded_addresses_never_reach_the_leaderboard() {
        let exclusions = ExclusionSet::new(["0xteam"], Vec::<&str>::new());
        let params = FilterParams {
            exclude_team: true,
            ..Default::default()
        };

        let rows = leaderboard_view(&sample(), &exclusions, &params, ts(2024, 6, 11, 0));
        assert!(rows.iter().all(|row| !row.address.eq_ignore_ascii_case("0xteam")));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_exclusions_shrink_the_summary() {
        let exclusions = ExclusionSet::new(["0xteam"], Vec::<&str>::new());
        let now = ts(2024, 6, 11, 0);

        let all = summary_view(
            &sample(),
            &exclusions,
            &FilterParams::default(),
            &SeasonConfig::default(),
            now,
        );
        assert_eq!(all.total_points, dec!(73));

        let without_team = summary_view(
            &sample(),
            &exclusions,
            &FilterParams {
                exclude_team: true,
                ..Default::default()
            },
            &SeasonConfig::default(),
            now,
        );
        assert_eq!(without_team.total_points, dec!(23));
        // the latest-day anchor follows the filtered set's own max timestamp
        assert_eq!(without_team.latest_event_at, Some(ts(2024, 6, 10, 7)));
        assert_eq!(without_team.latest_day_points, dec!(5));
    }

    #[test]
    fn test_partition_holds_under_exclusions() {
        let exclusions = ExclusionSet::new(["0xteam"], Vec::<&str>::new());
        let params = FilterParams {
            exclude_team: true,
            ..Default::default()
        };
        let events = sample();

        let rows = leaderboard_view(&events, &exclusions, &params, ts(2024, 6, 11, 0));
        let row_sum: Decimal = rows.iter().map(|r| r.total_points).sum();
        let filtered_sum: Decimal = events
            .iter()
            .filter(|e| !e.holder_address.eq_ignore_ascii_case("0xteam"))
            .map(|e| e.allocation)
            .sum();
        assert_eq!(row_sum, filtered_sum);
    }
}
