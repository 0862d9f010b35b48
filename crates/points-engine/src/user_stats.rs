use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::event::{AllocationEvent, latest_timestamp};
use crate::seasons::SeasonConfig;

/// Lifetime analytics for a single holder, computed over the full,
/// exclusion-unfiltered snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLifetimeStats {
    /// Sum of the two season buckets, as in the global summary.
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

/// Compute lifetime stats for `address` (matched case-insensitively), or
/// `None` when the snapshot holds no events for it.
pub fn user_stats(
    events: &[AllocationEvent],
    address: &str,
    seasons: &SeasonConfig,
) -> Option<UserLifetimeStats> {
    let needle = address.to_lowercase();
    let user_events: Vec<&AllocationEvent> = events
        .iter()
        .filter(|event| event.holder_address.to_lowercase() == needle)
        .collect();
    if user_events.is_empty() {
        return None;
    }

    let season_one_points: Decimal = user_events
        .iter()
        .filter(|event| seasons.is_season_one(&event.points_id))
        .map(|event| event.allocation)
        .sum();
    let season_two_points: Decimal = user_events
        .iter()
        .filter(|event| seasons.is_season_two(&event.points_id))
        .map(|event| event.allocation)
        .sum();

    let mut vault_points: BTreeMap<&str, Decimal> = BTreeMap::new();
    for event in &user_events {
        *vault_points
            .entry(event.token_address.as_str())
            .or_default() += event.allocation;
    }
    // Ties resolve to the lexically smallest vault: the map iterates in
    // ascending key order and only a strictly larger sum displaces the pick.
    let mut top_vault = "";
    let mut top_points = Decimal::MIN;
    for (vault, points) in &vault_points {
        if *points > top_points {
            top_vault = vault;
            top_points = *points;
        }
    }

    // Anchored at the full snapshot's max timestamp, not this user's.
    let latest_day = latest_timestamp(events)?.date_naive();
    let latest_day_points: Decimal = user_events
        .iter()
        .filter(|event| event.timestamp.date_naive() == latest_day)
        .map(|event| event.allocation)
        .sum();

    let activity_days: BTreeSet<NaiveDate> = user_events
        .iter()
        .map(|event| event.timestamp.date_naive())
        .collect();

    let (lifetime_totals, latest_day_totals) = holder_totals(events, latest_day);
    let rank = rank_of(
        lifetime_totals
            .iter()
            .map(|(address, total)| (address.as_str(), *total)),
        &needle,
    );
    // Project the latest-day allocation landing a second time for everybody;
    // holders without latest-day activity project unchanged.
    let projected_next_rank = rank_of(
        lifetime_totals.iter().map(|(address, total)| {
            let repeat = latest_day_totals
                .get(address)
                .copied()
                .unwrap_or(Decimal::ZERO);
            (address.as_str(), *total + repeat)
        }),
        &needle,
    );

    Some(UserLifetimeStats {
        total_points: season_one_points + season_two_points,
        season_one_points,
        season_two_points,
        longest_streak_days: longest_streak(&activity_days),
        unique_vault_count: vault_points.len(),
        top_vault: top_vault.to_string(),
        latest_day_points,
        rank,
        projected_next_rank,
    })
}

/// Lifetime and latest-day allocation totals per holder, keyed by lower-cased
/// address.
fn holder_totals(
    events: &[AllocationEvent],
    latest_day: NaiveDate,
) -> (BTreeMap<String, Decimal>, BTreeMap<String, Decimal>) {
    let mut lifetime: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut latest: BTreeMap<String, Decimal> = BTreeMap::new();

    for event in events {
        let key = event.holder_address.to_lowercase();
        *lifetime.entry(key.clone()).or_default() += event.allocation;
        if event.timestamp.date_naive() == latest_day {
            *latest.entry(key).or_default() += event.allocation;
        }
    }

    (lifetime, latest)
}

/// 1-based position of `needle` when standings are sorted descending by
/// total, ties in ascending address order.
fn rank_of<'a>(standings: impl Iterator<Item = (&'a str, Decimal)>, needle: &str) -> usize {
    let mut standings: Vec<(&str, Decimal)> = standings.collect();
    standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    standings
        .iter()
        .position(|(address, _)| *address == needle)
        .map_or(0, |idx| idx + 1)
}

/// Longest run of consecutive activity days: the number of one-day gaps in
/// the longest run, plus one. A single activity day therefore reports 1.
fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest_transitions = 0u32;
    let mut current_transitions = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        if let Some(prev) = previous {
            if (*day - prev).num_days() == 1 {
                current_transitions += 1;
                longest_transitions = longest_transitions.max(current_transitions);
            } else {
                current_transitions = 0;
            }
        }
        previous = Some(*day);
    }

    longest_transitions + 1
}
