mod cli;

use std::{fs, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use points_api::{ApiService, AppState};
use points_engine::{ExclusionSet, SeasonConfig};
use points_snapshot::{AllocationsClient, RefreshTask, SnapshotStore};

use crate::cli::PointsCli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let PointsCli {
        upstream_url,
        api_port,
        refresh_interval_secs,
        upstream_timeout_secs,
        exclusions_file,
    } = PointsCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let exclusions = match &exclusions_file {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let set = ExclusionSet::from_json_str(&raw)?;
            tracing::info!(
                file = %path.display(),
                entries = set.len(),
                "Loaded exclusion lists"
            );
            set
        }
        None => ExclusionSet::default(),
    };

    let source = Arc::new(AllocationsClient::new(
        upstream_url.as_str(),
        Duration::from_secs(upstream_timeout_secs),
    )?);
    let store = SnapshotStore::new();

    let state = AppState {
        store: store.clone(),
        source: source.clone(),
        exclusions: Arc::new(exclusions),
        seasons: Arc::new(SeasonConfig::default()),
    };

    let token = CancellationToken::new();

    let refresh_handle = RefreshTask::new(
        store,
        source,
        Duration::from_secs(refresh_interval_secs),
    )
    .spawn(token.clone());

    let api = ApiService::new(state, "0.0.0.0", api_port);
    let api_token = token.clone();
    let api_handle = tokio::spawn(async move { api.run(api_token).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping services...");
    token.cancel();

    refresh_handle.await?;
    api_handle.await??;

    Ok(())
}
