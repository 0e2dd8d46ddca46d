//! Error types
//!
//! Everything that can go wrong loading tuning, settings or high scores.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RhythmError {
    #[error("Hit zone bottom ({bottom}) must be below its top ({top})")]
    InvalidHitZone { bottom: f32, top: f32 },
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RhythmError>;
