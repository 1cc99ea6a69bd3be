//! Recommendation collaborator trait

use async_trait::async_trait;

use crate::error::Result;

/// Personalized recommendation provider
///
/// Takes the listener's recent history as "title - artist" strings and
/// returns suggestion strings in the same shape, best first. Backed by a
/// hosted generative model in production; mocked in tests.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Recommend tracks from a listening-history seed
    async fn recommend(&self, listening_history: &[String]) -> Result<Vec<String>>;
}

#[cfg(test)]
mockall::mock! {
    pub TestRecommender {}

    #[async_trait]
    impl Recommender for TestRecommender {
        async fn recommend(&self, listening_history: &[String]) -> Result<Vec<String>>;
    }
}
