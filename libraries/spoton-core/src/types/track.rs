//! Track metadata and playable source references

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix marking a transient object URL that must be released when superseded
const TRANSIENT_PREFIX: &str = "blob:";

/// A playable track
///
/// Immutable once constructed; owned by whichever queue currently
/// references it. Metadata is eagerly populated so playback never has to
/// go back to a library lookup mid-transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Album identifier (for navigation back to the album view)
    pub album_id: String,

    /// Cover-art reference (URL or asset path)
    pub album_art: String,

    /// Display duration, e.g. "3:45" ("0:00" when unknown)
    pub duration: String,

    /// Playable source reference and origin
    pub source: TrackSource,
}

impl Track {
    /// Parse the display duration into seconds
    ///
    /// Returns `None` for malformed or unknown ("0:00") durations so callers
    /// can fall back to the backend-reported duration.
    pub fn duration_secs(&self) -> Option<f64> {
        let mut parts = self.duration.split(':');
        let minutes: u64 = parts.next()?.trim().parse().ok()?;
        let seconds: u64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() || seconds >= 60 {
            return None;
        }
        let total = minutes * 60 + seconds;
        if total == 0 {
            None
        } else {
            Some(total as f64)
        }
    }

    /// Parsed duration as a [`Duration`], when available
    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration_secs().map(Duration::from_secs_f64)
    }

    /// Seed string for the recommendation collaborator
    pub fn seed_string(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }

    /// Whether this track plays through the remote embedded backend
    pub fn is_remote(&self) -> bool {
        matches!(self.source, TrackSource::Remote { .. })
    }
}

/// Playable source reference, tagged by origin
///
/// The orchestrator never branches on origin outside the backend adapter
/// boundary; everything else treats this as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "origin")]
pub enum TrackSource {
    /// Local media element source (file path, asset URL, or transient
    /// object URL)
    Local { url: String },

    /// Remote embedded-player track, addressed by its platform video id
    Remote { video_id: String },
}

impl TrackSource {
    /// True for transient local object URLs that must be revoked when the
    /// track is superseded or the player closes
    pub fn is_transient_local(&self) -> bool {
        matches!(self, TrackSource::Local { url } if url.starts_with(TRANSIENT_PREFIX))
    }
}
