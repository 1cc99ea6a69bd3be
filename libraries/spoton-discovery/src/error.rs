//! Error types for discovery collaborators

use thiserror::Error;

/// Result type alias using `DiscoveryError`
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Discovery errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The recommendation collaborator returned nothing usable
    #[error("No recommendations available")]
    NoRecommendations,

    /// Search returned no results for the query
    #[error("No search results for query: {0}")]
    NoResults(String),

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Malformed response payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Collaborator-specific failure (model refusal, quota, etc.)
    #[error("Provider error: {0}")]
    Provider(String),
}
