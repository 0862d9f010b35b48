use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::event::{AllocationEvent, latest_timestamp};
use crate::seasons::SeasonConfig;

/// Global scalar totals over the exclusion-filtered (otherwise unrestricted)
/// event set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonSummary {
    /// Sum of the two season buckets. Allocations tagged outside the season
    /// configuration are counted in neither bucket nor here.
    pub total_points: Decimal,
    pub latest_day_points: Decimal,
    pub season_one_points: Decimal,
    pub season_two_points: Decimal,
    pub latest_event_at: Option<DateTime<Utc>>,
}

/// Reduce an event set to its season totals and latest-day activity.
///
/// `latest_day_points` covers the calendar day (UTC) of the set's own max
/// timestamp, excluding anything at or past `now`. An empty set yields the
/// all-zero summary.
pub fn summarize(
    events: &[AllocationEvent],
    seasons: &SeasonConfig,
    now: DateTime<Utc>,
) -> SeasonSummary {
    let latest_event_at = latest_timestamp(events);

    let latest_day_points = latest_event_at.map_or(Decimal::ZERO, |latest| {
        let latest_day = latest.date_naive();
        events
            .iter()
            .filter(|event| {
                event.timestamp.date_naive() == latest_day && event.timestamp < now
            })
            .map(|event| event.allocation)
            .sum()
    });

    let season_one_points: Decimal = events
        .iter()
        .filter(|event| seasons.is_season_one(&event.points_id))
        .map(|event| event.allocation)
        .sum();
    let season_two_points: Decimal = events
        .iter()
        .filter(|event| seasons.is_season_two(&event.points_id))
        .map(|event| event.allocation)
        .sum();

    SeasonSummary {
        total_points: season_one_points + season_two_points,
        latest_day_points,
        season_one_points,
        season_two_points,
        latest_event_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ev, ts};
    use rust_decimal::dec;

    fn seasons() -> SeasonConfig {
        SeasonConfig {
            season_one_tags: vec!["P-5".to_string()],
            season_two_tag: "P-6".to_string(),
        }
    }

    #[test]
    fn test_season_split_excludes_unconfigured_tags() {
        let t0 = ts(2024, 6, 10, 8);
        let events = vec![
            ev("0xa", "0xv1", "P-5", dec!(10), t0),
            ev("0xa", "0xv1", "P-6", dec!(5), t0),
            ev("0xb", "0xv1", "P-1", dec!(3), t0),
        ];

        let summary = summarize(&events, &seasons(), ts(2024, 6, 11, 0));
        assert_eq!(summary.season_one_points, dec!(10));
        assert_eq!(summary.season_two_points, dec!(5));
        // the P-1 event contributes to neither bucket nor the total
        assert_eq!(summary.total_points, dec!(15));
    }

    #[test]
    fn test_latest_day_is_the_calendar_day_of_the_max_timestamp() {
        let events = vec![
            ev("0xa", "0xv1", "P-6", dec!(4), ts(2024, 6, 10, 8)),
            ev("0xb", "0xv1", "P-6", dec!(2), ts(2024, 6, 10, 23)),
            ev("0xc", "0xv1", "P-6", dec!(9), ts(2024, 6, 9, 23)),
        ];

        let summary = summarize(&events, &SeasonConfig::default(), ts(2024, 6, 12, 0));
        assert_eq!(summary.latest_event_at, Some(ts(2024, 6, 10, 23)));
        assert_eq!(summary.latest_day_points, dec!(6));
    }

    #[test]
    fn test_latest_day_excludes_events_at_or_past_now() {
        let now = ts(2024, 6, 10, 12);
        let events = vec![
            ev("0xa", "0xv1", "P-6", dec!(4), ts(2024, 6, 10, 8)),
            // same calendar day but not yet "now"
            ev("0xb", "0xv1", "P-6", dec!(2), ts(2024, 6, 10, 23)),
        ];

        let summary = summarize(&events, &SeasonConfig::default(), now);
        assert_eq!(summary.latest_day_points, dec!(4));
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = summarize(&[], &SeasonConfig::default(), ts(2024, 6, 10, 0));
        assert_eq!(summary, SeasonSummary::default());
        assert!(summary.latest_event_at.is_none());
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let events = vec![
            ev("0xa", "0xv1", "P-1", dec!(1), ts(2024, 6, 10, 8)),
            ev("0xb", "0xv2", "P-6", dec!(2), ts(2024, 6, 9, 8)),
        ];
        let now = ts(2024, 6, 11, 0);
        let first = summarize(&events, &SeasonConfig::default(), now);
        let second = summarize(&events, &SeasonConfig::default(), now);
        assert_eq!(first, second);
    }
}
