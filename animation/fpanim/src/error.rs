use std::io;
use std::time::Duration;
use thiserror::Error;

/// Error types for animation construction and document loading
#[derive(Error, Debug)]
pub enum AnimationError {
    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or mistyped JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An animation needs at least one player keyframe
    #[error("Animation requires at least 1 player keyframe")]
    NoPlayerKeyFrames,

    /// Easing function name not present in the registry
    #[error("Unknown easing function: '{0}'")]
    UnknownEasingFunction(String),

    /// Keyframe index out of range for the requested track
    #[error("Keyframe index {index} out of range ({len} keyframes)")]
    KeyFrameIndex { index: usize, len: usize },

    /// Inserted player keyframe would break time ordering
    #[error("Player keyframe at {time:?} is out of order at index {index}")]
    KeyFrameOrder { index: usize, time: Duration },
}

/// Result type using AnimationError
pub type Result<T> = std::result::Result<T, AnimationError>;
