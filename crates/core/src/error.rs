use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowdocError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("method rules error: {0}")]
    Rules(#[from] flowdoc_plugin::RulesError),
    #[error("discovery error: {0}")]
    Discovery(#[from] flowdoc_plugin::DiscoveryError),
    #[error(
        "configuration error: discovery kept aborting after {attempts} attempts (last artifact: {artifact})"
    )]
    ScanRetriesExhausted { attempts: u32, artifact: String },
}

pub type Result<T> = std::result::Result<T, FlowdocError>;
