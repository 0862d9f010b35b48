use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use points_types::{Timeframe, VaultFilter};

use crate::event::AllocationEvent;
use crate::filter::select_by_vault_and_time;

/// One vault's contribution to a holder's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultSubtotal {
    pub vault: String,
    pub points: Decimal,
    pub last_update: DateTime<Utc>,
    pub active_on_latest_day: bool,
}

/// One ranked holder. Rebuilt from scratch on every call; never cached across
/// parameter changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub address: String,
    pub total_points: Decimal,
    pub vaults: Vec<VaultSubtotal>,
    pub vault_count: usize,
    pub active_on_latest_day: bool,
    pub rank: usize,
}

#[derive(Default)]
struct HolderAccumulator {
    display_address: String,
    total_points: Decimal,
    vaults: BTreeMap<String, (Decimal, DateTime<Utc>)>,
}

/// Group the (vault/time filtered) events by holder and vault, rank holders by
/// total points.
///
/// `anchor` must be the max timestamp of the unfiltered full snapshot: it both
/// anchors the trailing time windows and defines the "latest day" activity
/// flags. Holders are keyed by lower-cased address and displayed with the
/// first spelling encountered; ties in total points rank in ascending address
/// order.
pub fn build_leaderboard(
    events: &[AllocationEvent],
    vault: &VaultFilter,
    timeframe: Timeframe,
    anchor: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<LeaderboardRow> {
    let filtered = select_by_vault_and_time(events, vault, timeframe, anchor, now);
    let latest_day = anchor.map(|a| a.date_naive());

    let mut holders: BTreeMap<String, HolderAccumulator> = BTreeMap::new();
    for event in &filtered {
        let key = event.holder_address.to_lowercase();
        let holder = holders.entry(key).or_default();
        if holder.display_address.is_empty() {
            holder.display_address = event.holder_address.clone();
        }
        holder.total_points += event.allocation;

        let (points, last_update) = holder
            .vaults
            .entry(event.token_address.clone())
            .or_insert((Decimal::ZERO, event.timestamp));
        *points += event.allocation;
        if event.timestamp > *last_update {
            *last_update = event.timestamp;
        }
    }

    let mut rows: Vec<LeaderboardRow> = holders
        .into_values()
        .map(|holder| {
            let vaults: Vec<VaultSubtotal> = holder
                .vaults
                .into_iter()
                .map(|(vault, (points, last_update))| VaultSubtotal {
                    vault,
                    points,
                    last_update,
                    active_on_latest_day: latest_day == Some(last_update.date_naive()),
                })
                .collect();

            LeaderboardRow {
                address: holder.display_address,
                total_points: holder.total_points,
                vault_count: vaults.len(),
                active_on_latest_day: vaults.iter().any(|v| v.active_on_latest_day),
                vaults,
                rank: 0,
            }
        })
        .collect();

    // Descending by total; the BTreeMap already yields ascending addresses,
    // which the stable sort preserves for ties.
    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::latest_timestamp;
    use crate::testutil::{ev, ts};
    use rust_decimal::dec;

    fn sample() -> Vec<AllocationEvent> {
        vec![
            ev("0xAaa", "0xv1", "P-6", dec!(5), ts(2024, 6, 9, 10)),
            ev("0xaaa", "0xv1", "P-6", dec!(7), ts(2024, 6, 10, 8)),
            ev("0xAAA", "0xv2", "P-1", dec!(3), ts(2024, 6, 8, 9)),
            ev("0xbbb", "0xv2", "P-6", dec!(4), ts(2024, 6, 9, 12)),
        ]
    }

    #[test]
    fn test_vault_grouping_and_subtotals() {
        let events = sample();
        let anchor = latest_timestamp(&events);
        let rows = build_leaderboard(
            &events,
            &VaultFilter::All,
            Timeframe::All,
            anchor,
            ts(2024, 6, 11, 0),
        );

        assert_eq!(rows.len(), 2);
        let top = &rows[0];
        assert_eq!(top.address, "0xAaa");
        assert_eq!(top.total_points, dec!(15));
        assert_eq!(top.vault_count, 2);
        assert_eq!(top.rank, 1);
        assert!(top.active_on_latest_day);

        let v1 = top.vaults.iter().find(|v| v.vault == "0xv1").unwrap();
        assert_eq!(v1.points, dec!(12));
        assert_eq!(v1.last_update, ts(2024, 6, 10, 8));
        assert!(v1.active_on_latest_day);

        let v2 = top.vaults.iter().find(|v| v.vault == "0xv2").unwrap();
        assert_eq!(v2.points, dec!(3));
        assert!(!v2.active_on_latest_day);

        assert_eq!(rows[1].address, "0xbbb");
        assert_eq!(rows[1].rank, 2);
        assert!(!rows[1].active_on_latest_day);
    }

    #[test]
    fn test_partition_row_totals_cover_the_filtered_sum() {
        let events = sample();
        let anchor = latest_timestamp(&events);
        let rows = build_leaderboard(
            &events,
            &VaultFilter::All,
            Timeframe::All,
            anchor,
            ts(2024, 6, 11, 0),
        );

        let row_sum: Decimal = rows.iter().map(|r| r.total_points).sum();
        let event_sum: Decimal = events.iter().map(|e| e.allocation).sum();
        assert_eq!(row_sum, event_sum);
    }

    #[test]
    fn test_rank_is_monotonic() {
        let events = sample();
        let anchor = latest_timestamp(&events);
        let rows = build_leaderboard(
            &events,
            &VaultFilter::All,
            Timeframe::All,
            anchor,
            ts(2024, 6, 11, 0),
        );

        for pair in rows.windows(2) {
            assert!(pair[0].total_points >= pair[1].total_points);
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }

    #[test]
    fn test_ties_rank_in_ascending_address_order() {
        let t0 = ts(2024, 6, 10, 8);
        let events = vec![
            ev("0xccc", "0xv1", "P-6", dec!(5), t0),
            ev("0xaaa", "0xv1", "P-6", dec!(5), t0),
            ev("0xbbb", "0xv1", "P-6", dec!(5), t0),
        ];
        let rows = build_leaderboard(
            &events,
            &VaultFilter::All,
            Timeframe::All,
            latest_timestamp(&events),
            ts(2024, 6, 11, 0),
        );
        let order: Vec<&str> = rows.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(order, ["0xaaa", "0xbbb", "0xccc"]);
    }

    #[test]
    fn test_vault_filter_restricts_rows() {
        let events = sample();
        let anchor = latest_timestamp(&events);
        let rows = build_leaderboard(
            &events,
            &VaultFilter::Vault("0xv2".to_string()),
            Timeframe::All,
            anchor,
            ts(2024, 6, 11, 0),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, "0xbbb");
        assert_eq!(rows[0].total_points, dec!(4));
        assert_eq!(rows[1].total_points, dec!(3));
        assert!(rows.iter().all(|r| r.vault_count == 1));
    }

    #[test]
    fn test_build_is_idempotent_and_leaves_input_untouched() {
        let events = sample();
        let before = events.clone();
        let anchor = latest_timestamp(&events);
        let now = ts(2024, 6, 11, 0);

        let first = build_leaderboard(&events, &VaultFilter::All, Timeframe::Last7, anchor, now);
        let second = build_leaderboard(&events, &VaultFilter::All, Timeframe::Last7, anchor, now);
        assert_eq!(first, second);
        assert_eq!(events, before);
    }
}
