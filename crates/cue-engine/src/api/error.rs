use thiserror::Error;

use crate::api::types::BallId;

/// Errors surfaced to the driver. Physics edge cases (coincident centers,
/// zero-speed shots) are handled in place and never show up here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),

    #[error("no ball with id {0} on the table")]
    UnknownBall(BallId),
}
