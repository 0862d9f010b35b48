use std::time::Duration;

use crate::error::SnapshotError;

/// The PostgREST endpoint serving the full allocation log.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://origami.automation-templedao.link/points_allocation?holder_address=ilike.*";

/// Anything that can produce the raw allocation snapshot. The HTTP client is
/// the production implementation; tests substitute stubs.
#[async_trait::async_trait]
pub trait AllocationSource: Send + Sync {
    /// Fetch the full snapshot as raw JSON rows. Row-level validation happens
    /// downstream so one malformed row cannot sink the whole snapshot.
    async fn fetch_allocations(&self) -> Result<Vec<serde_json::Value>, SnapshotError>;

    /// Fetch the upstream body verbatim, for pass-through serving.
    async fn fetch_raw_body(&self) -> Result<String, SnapshotError>;
}

pub struct AllocationsClient {
    client: reqwest::Client,
    url: String,
}

impl AllocationsClient {
    /// The request timeout is defensive: a hung upstream must not wedge the
    /// refresh loop.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SnapshotError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn get(&self) -> Result<reqwest::Response, SnapshotError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl AllocationSource for AllocationsClient {
    async fn fetch_allocations(&self) -> Result<Vec<serde_json::Value>, SnapshotError> {
        let rows: Vec<serde_json::Value> = self.get().await?.json().await?;
        Ok(rows)
    }

    async fn fetch_raw_body(&self) -> Result<String, SnapshotError> {
        Ok(self.get().await?.text().await?)
    }
}
