//! Error types for cue playback

use thiserror::Error;

/// Playback errors
///
/// Only precondition and configuration problems surface here. Host-level
/// load failures are absorbed by the manager and never reach the caller.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// `play` was called with an empty source identifier
    #[error("Source identifier must not be empty")]
    EmptySourceId,

    /// The media host refused to construct or drive an element
    #[error("Media host error: {0}")]
    Host(String),

    /// Configuration or options could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
