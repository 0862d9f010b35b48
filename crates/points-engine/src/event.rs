use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point grant: a holder received `allocation` points from one vault at
/// one instant, tagged with the season period that granted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEvent {
    pub holder_address: String,
    pub token_address: String,
    pub points_id: String,
    pub allocation: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of validating a raw upstream snapshot.
#[derive(Debug, Clone, Default)]
pub struct ParsedSnapshot {
    pub events: Vec<AllocationEvent>,
    /// Rows dropped at the boundary: missing fields, unparseable values, or a
    /// negative allocation. Counted so the gap is visible, never aggregated.
    pub quarantined_rows: usize,
}

/// Validate a raw upstream array row by row. Malformed rows are quarantined
/// with a warning instead of failing the whole snapshot; an empty array is a
/// valid (empty) snapshot.
pub fn parse_snapshot_rows(rows: Vec<serde_json::Value>) -> ParsedSnapshot {
    let mut parsed = ParsedSnapshot {
        events: Vec::with_capacity(rows.len()),
        quarantined_rows: 0,
    };

    for (idx, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<AllocationEvent>(row) {
            Ok(event) if event.allocation >= Decimal::ZERO => parsed.events.push(event),
            Ok(event) => {
                tracing::warn!(
                    row = idx,
                    holder = %event.holder_address,
                    allocation = %event.allocation,
                    "Quarantined allocation row with negative allocation",
                );
                parsed.quarantined_rows += 1;
            }
            Err(err) => {
                tracing::warn!(row = idx, error = %err, "Quarantined malformed allocation row");
                parsed.quarantined_rows += 1;
            }
        }
    }

    parsed
}

/// Max timestamp over a set of events. The full-set maximum anchors all
/// "latest day" semantics to the data itself rather than to wall-clock time.
pub fn latest_timestamp(events: &[AllocationEvent]) -> Option<DateTime<Utc>> {
    events.iter().map(|event| event.timestamp).max()
}
