use std::path::PathBuf;

use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "Leaderboard & analytics API for Origami vault points")]
pub struct PointsCli {
    /// Upstream endpoint serving the full allocation log
    #[arg(long, env = "UPSTREAM_URL", default_value = points_snapshot::DEFAULT_UPSTREAM_URL)]
    pub upstream_url: Url,

    /// Port the API listens on
    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    pub api_port: u16,

    /// Seconds between snapshot refreshes
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value_t = 3600)]
    pub refresh_interval_secs: u64,

    /// Request timeout for the upstream fetch, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Optional JSON file with `team` / `contracts` exclusion address lists
    #[arg(long, env = "EXCLUSIONS_FILE")]
    pub exclusions_file: Option<PathBuf>,
}
