//! Spoton Discovery
//!
//! Recommendation and search collaborators for the playback stack:
//! - [`Recommender`]: personalized suggestions from a listening-history seed
//! - [`TrackSearch`]: free-text search against the remote catalog
//! - [`HttpTrackSearch`]: search client for the hosted video-platform API
//! - [`AutoplayResolver`]: recommendation → search → first playable track
//!
//! Both collaborator calls are fallible network operations; the playback
//! side treats every failure here as "no autoplay continuation" rather than
//! an error it surfaces.

#![forbid(unsafe_code)]

mod autoplay;
mod error;
mod recommend;
mod search;

pub use autoplay::AutoplayResolver;
pub use error::{DiscoveryError, Result};
pub use recommend::Recommender;
pub use search::{HttpTrackSearch, SearchResult, TrackSearch};
