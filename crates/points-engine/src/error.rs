use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid exclusion list: {0}")]
    InvalidExclusionList(#[from] serde_json::Error),
}
