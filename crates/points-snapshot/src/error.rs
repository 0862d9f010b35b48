use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("snapshot fetch superseded by a newer refresh")]
    Superseded,
}
