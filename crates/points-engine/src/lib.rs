//! In-memory aggregation engine for vault point allocations.
//!
//! Every function here is a pure, synchronous transformation of an event
//! snapshot plus the current filter parameters. Nothing is cached between
//! calls; derived views are rebuilt in full each time the snapshot or the
//! parameters change.

pub mod activity;
pub mod error;
pub mod event;
pub mod exclusions;
pub mod filter;
pub mod leaderboard;
pub mod seasons;
pub mod summary;
pub mod user_stats;
pub mod views;

pub use activity::{ActivityPoint, activity_series};
pub use error::EngineError;
pub use event::{AllocationEvent, ParsedSnapshot, latest_timestamp, parse_snapshot_rows};
pub use exclusions::ExclusionSet;
pub use filter::{FilterParams, apply_exclusions, select_by_vault_and_time};
pub use leaderboard::{LeaderboardRow, VaultSubtotal, build_leaderboard};
pub use seasons::SeasonConfig;
pub use summary::{SeasonSummary, summarize};
pub use user_stats::{UserLifetimeStats, user_stats};
pub use views::{leaderboard_view, summary_view};
