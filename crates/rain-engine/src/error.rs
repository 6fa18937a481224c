/// Errors surfaced by the packet rain core.
///
/// Flow-control outcomes (rate-limited grabs, spawns at capacity, frames with no hand)
/// are not errors and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum RainError {
    #[error("expected {expected} landmark floats (21 points x 3), got {len}")]
    InvalidLandmarks { len: usize, expected: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),
    #[error("config can only be replaced before the rain starts")]
    SessionActive,
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("tracking frame failed: {0}")]
    TrackingFrame(String),
}
