use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PitchError {
    #[error("invalid checkpoint '{0}': expected whole minutes remaining, e.g. 20")]
    InvalidCheckpoint(String),

    #[error("checkpoint {0:02}:00 is not configured for this session")]
    CheckpointNotConfigured(u32),

    #[error("invalid mode '{0}': expected 'manual' or 'automatic'")]
    InvalidMode(String),

    #[error("segment not found: {0}")]
    SegmentNotFound(String),

    #[error("duplicate segment name in catalog: {0}")]
    DuplicateSegment(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PitchError>;
