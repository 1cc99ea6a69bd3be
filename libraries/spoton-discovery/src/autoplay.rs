//! Autoplay continuation
//!
//! When the queue runs dry and autoplay is enabled, the playback side asks
//! this resolver for one more track: recommend from the listening history,
//! search the catalog for the top suggestion, take the best match.

use std::sync::Arc;

use tracing::{debug, warn};

use spoton_core::{Track, TrackSource};

use crate::error::{DiscoveryError, Result};
use crate::recommend::Recommender;
use crate::search::{SearchResult, TrackSearch};

/// Resolves a listening-history seed into a playable track
pub struct AutoplayResolver {
    recommender: Arc<dyn Recommender>,
    search: Arc<dyn TrackSearch>,
}

impl AutoplayResolver {
    pub fn new(recommender: Arc<dyn Recommender>, search: Arc<dyn TrackSearch>) -> Self {
        Self {
            recommender,
            search,
        }
    }

    /// Resolve the next autoplay track from a history seed
    ///
    /// Fails if the recommender returns nothing or the top suggestion has no
    /// search results. Callers treat any error as "stop playback".
    pub async fn resolve(&self, listening_history: &[String]) -> Result<Track> {
        let suggestions = self.recommender.recommend(listening_history).await?;
        let Some(suggestion) = suggestions.into_iter().next() else {
            warn!("recommender returned no suggestions");
            return Err(DiscoveryError::NoRecommendations);
        };

        debug!(suggestion, "resolving autoplay suggestion");
        let results = self.search.search(&suggestion).await?;
        let Some(best) = results.into_iter().next() else {
            warn!(suggestion, "no catalog match for suggestion");
            return Err(DiscoveryError::NoResults(suggestion));
        };

        Ok(track_from_result(best))
    }
}

fn track_from_result(result: SearchResult) -> Track {
    Track {
        id: result.id.clone(),
        title: result.title,
        artist: result.artist,
        album: String::new(),
        album_id: String::new(),
        album_art: result.thumbnail,
        duration: result.duration,
        source: TrackSource::Remote {
            video_id: result.id,
        },
    }
}
