/// Core error types for Spoton
use thiserror::Error;

/// Result type alias using `SpotonError`
pub type Result<T> = std::result::Result<T, SpotonError>;

/// Core error type for Spoton
#[derive(Error, Debug)]
pub enum SpotonError {
    /// Settings document errors (missing user, malformed document)
    #[error("Settings error: {0}")]
    Settings(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SpotonError {
    /// Create a settings error from any displayable value
    pub fn settings(msg: impl std::fmt::Display) -> Self {
        Self::Settings(msg.to_string())
    }

    /// Create a not-found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
