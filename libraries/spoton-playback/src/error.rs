//! Playback error types

use thiserror::Error;

/// Result type alias using `PlaybackError`
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Errors from the playback layer
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is loaded for the requested operation
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The requested backend is not wired up
    #[error("Backend not available: {0}")]
    BackendUnavailable(&'static str),

    /// The backend rejected or failed a command
    #[error("Backend error: {0}")]
    Backend(String),

    /// Seek target or other parameter out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Autoplay resolution failed
    #[error("Autoplay failed: {0}")]
    Autoplay(#[from] spoton_discovery::DiscoveryError),
}
