use serde::{Deserialize, Serialize};

/// Which `points_id` tags roll up into each season.
///
/// The summary's total is deliberately the sum of the two season buckets, so
/// tags outside this configuration contribute to neither season nor total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonConfig {
    pub season_one_tags: Vec<String>,
    pub season_two_tag: String,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            season_one_tags: vec!["P-1".to_string(), "P-2".to_string()],
            season_two_tag: "P-6".to_string(),
        }
    }
}

impl SeasonConfig {
    pub fn is_season_one(&self, points_id: &str) -> bool {
        self.season_one_tags.iter().any(|tag| tag == points_id)
    }

    pub fn is_season_two(&self, points_id: &str) -> bool {
        self.season_two_tag == points_id
    }
}
