//! Listening history
//!
//! Bounded, most-recent-first record of what the listener played. Feeds the
//! autoplay recommendation seed as "title - artist" strings.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spoton_core::Track;

/// Maximum retained history entries
const MAX_HISTORY: usize = 20;

/// One history record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub played_at: DateTime<Utc>,
}

/// Bounded listening history, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListeningHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ListeningHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a played track
    ///
    /// Tracks backed by transient local sources are skipped: their URLs die
    /// with the session, so they make useless recommendation seeds. A track
    /// already in the history moves to the front instead of duplicating.
    pub fn record(&mut self, track: &Track) {
        if track.source.is_transient_local() {
            return;
        }

        if let Some(pos) = self.entries.iter().position(|e| e.track_id == track.id) {
            self.entries.remove(pos);
        }

        self.entries.push_front(HistoryEntry {
            track_id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            played_at: Utc::now(),
        });

        self.entries.truncate(MAX_HISTORY);
    }

    /// Recommendation seed, most recent first
    pub fn recommendation_seed(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} - {}", e.title, e.artist))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
