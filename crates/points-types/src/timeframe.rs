use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Time window selector for leaderboard queries. Windows are anchored at the
/// latest observed allocation timestamp, not at wall-clock time.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Timeframe {
    #[serde(rename = "7d")]
    #[strum(serialize = "7d")]
    Last7,
    #[serde(rename = "30d")]
    #[strum(serialize = "30d")]
    Last30,
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
}

impl Timeframe {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Last7 => "7d",
            Self::Last30 => "30d",
            Self::All => "all",
        }
    }

    pub const fn to_days(&self) -> Option<i64> {
        match self {
            Self::Last7 => Some(7),
            Self::Last30 => Some(30),
            Self::All => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_and_days() {
        assert_eq!(Timeframe::from_str("7d").unwrap(), Timeframe::Last7);
        assert_eq!(Timeframe::from_str("ALL").unwrap(), Timeframe::All);
        assert_eq!(Timeframe::Last30.to_days(), Some(30));
        assert_eq!(Timeframe::All.to_days(), None);
    }
}
