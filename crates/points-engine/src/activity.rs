use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::event::AllocationEvent;

/// One day of snapshot-wide activity: total points granted and how many
/// distinct addresses received any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub total_points: Decimal,
    pub active_addresses: usize,
}

/// Bucket events into UTC calendar days, ascending, optionally clipped to the
/// inclusive `[from, to]` range.
pub fn activity_series(
    events: &[AllocationEvent],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<ActivityPoint> {
    let mut days: BTreeMap<NaiveDate, (Decimal, HashSet<String>)> = BTreeMap::new();

    for event in events {
        let date = event.timestamp.date_naive();
        if from.is_some_and(|from| date < from) || to.is_some_and(|to| date > to) {
            continue;
        }
        let (total, holders) = days.entry(date).or_default();
        *total += event.allocation;
        holders.insert(event.holder_address.to_lowercase());
    }

    days.into_iter()
        .map(|(date, (total_points, holders))| ActivityPoint {
            date,
            total_points,
            active_addresses: holders.len(),
        })
        .collect()
}
