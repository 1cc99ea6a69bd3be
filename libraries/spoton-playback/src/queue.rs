//! Play queue with index-based navigation
//!
//! The queue keeps tracks in their natural (playlist) order and plays them
//! through an order table of indices. Shuffle swaps the order table for a
//! permutation with the active track pinned first; turning shuffle off
//! restores natural order without losing the active track. Navigation is
//! index-based and non-destructive, so previous/next can walk freely.

use rand::Rng;

use spoton_core::Track;

use crate::shuffle::shuffled_order;

/// Queue of tracks with a play-order view over them
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    /// Tracks in natural order
    tracks: Vec<Track>,

    /// Play order, indices into `tracks`
    order: Vec<usize>,

    /// Current position in `order`
    position: usize,

    /// Whether the order table is a shuffled permutation
    shuffled: bool,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace queue contents with a playlist, activating `active_id`
    ///
    /// If the playlist has the same id sequence as the current queue this is
    /// a jump, not a replacement: order (including any shuffle) is kept and
    /// only the position moves. Returns `true` when the contents were
    /// replaced.
    pub fn set_tracks(&mut self, tracks: Vec<Track>, active_id: &str) -> bool {
        if self.same_id_sequence(&tracks) {
            self.jump_to(active_id);
            return false;
        }

        self.tracks = tracks;
        self.order = (0..self.tracks.len()).collect();
        self.shuffled = false;
        self.position = 0;
        self.jump_to(active_id);
        true
    }

    /// Replace queue contents with a single track
    pub fn set_single(&mut self, track: Track) {
        self.tracks = vec![track];
        self.order = vec![0];
        self.position = 0;
        self.shuffled = false;
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.order.clear();
        self.position = 0;
        self.shuffled = false;
    }

    /// Move the position to the track with `id`
    ///
    /// Returns `false` (leaving the position unchanged) when the id is not
    /// in the queue.
    pub fn jump_to(&mut self, id: &str) -> bool {
        match self.position_of(id) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }

    /// Play-order position of the track with `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|&i| self.tracks[i].id.as_str() == id)
    }

    /// Currently active track
    pub fn active(&self) -> Option<&Track> {
        self.order
            .get(self.position)
            .and_then(|&i| self.tracks.get(i))
    }

    /// Next track in play order, without moving
    ///
    /// `None` at the end of the queue.
    pub fn peek_next(&self) -> Option<&Track> {
        self.order
            .get(self.position + 1)
            .and_then(|&i| self.tracks.get(i))
    }

    /// First track in play order (wrap target for queue looping)
    pub fn peek_first(&self) -> Option<&Track> {
        self.order.first().and_then(|&i| self.tracks.get(i))
    }

    /// Advance to the next track, stopping at the end
    pub fn advance(&mut self) -> Option<&Track> {
        if self.position + 1 >= self.order.len() {
            return None;
        }
        self.position += 1;
        self.active()
    }

    /// Advance to the next track, wrapping to the start at the end
    pub fn advance_wrapping(&mut self) -> Option<&Track> {
        if self.order.is_empty() {
            return None;
        }
        self.position = (self.position + 1) % self.order.len();
        self.active()
    }

    /// Step back to the previous track, wrapping to the end at the start
    pub fn retreat_wrapping(&mut self) -> Option<&Track> {
        if self.order.is_empty() {
            return None;
        }
        self.position = (self.position + self.order.len() - 1) % self.order.len();
        self.active()
    }

    /// Whether the active track is the last in play order
    pub fn at_end(&self) -> bool {
        self.order.is_empty() || self.position + 1 >= self.order.len()
    }

    /// Enable or disable shuffle
    ///
    /// Enabling regenerates the order table as a permutation with the active
    /// track first. Disabling restores natural order, keeping the active
    /// track active.
    pub fn set_shuffle<R: Rng>(&mut self, enabled: bool, rng: &mut R) {
        if self.tracks.is_empty() {
            self.shuffled = enabled;
            return;
        }

        let current_natural = self.order.get(self.position).copied().unwrap_or(0);

        if enabled {
            self.order = shuffled_order(self.tracks.len(), current_natural, rng);
            self.position = 0;
        } else {
            self.order = (0..self.tracks.len()).collect();
            self.position = current_natural;
        }
        self.shuffled = enabled;
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in play order
    pub fn in_play_order(&self) -> Vec<&Track> {
        self.order.iter().filter_map(|&i| self.tracks.get(i)).collect()
    }

    /// Current position in play order
    pub fn position(&self) -> usize {
        self.position
    }

    fn same_id_sequence(&self, tracks: &[Track]) -> bool {
        self.tracks.len() == tracks.len()
            && self
                .tracks
                .iter()
                .zip(tracks)
                .all(|(a, b)| a.id == b.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spoton_core::TrackSource;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            album_id: "al1".to_string(),
            album_art: String::new(),
            duration: "3:00".to_string(),
            source: TrackSource::Local {
                url: format!("https://cdn/{id}.mp3"),
            },
        }
    }

    fn playlist(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    #[test]
    fn set_tracks_activates_requested_track() {
        let mut queue = PlayQueue::new();
        let replaced = queue.set_tracks(playlist(&["a", "b", "c"]), "b");
        assert!(replaced);
        assert_eq!(queue.active().unwrap().id, "b");
        assert_eq!(queue.position(), 1);
    }

    #[test]
    fn same_playlist_jumps_without_replacing() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b", "c"]), "a");

        let mut rng = StdRng::seed_from_u64(11);
        queue.set_shuffle(true, &mut rng);
        let shuffled_view: Vec<String> = queue
            .in_play_order()
            .iter()
            .map(|t| t.id.clone())
            .collect();

        let replaced = queue.set_tracks(playlist(&["a", "b", "c"]), "c");
        assert!(!replaced);
        assert_eq!(queue.active().unwrap().id, "c");
        assert!(queue.is_shuffled());

        let view_after: Vec<String> = queue
            .in_play_order()
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(shuffled_view, view_after);
    }

    #[test]
    fn advance_stops_at_end() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b"]), "a");

        assert_eq!(queue.advance().unwrap().id, "b");
        assert!(queue.at_end());
        assert!(queue.advance().is_none());
        assert_eq!(queue.active().unwrap().id, "b");
    }

    #[test]
    fn wrapping_navigation() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b", "c"]), "a");

        assert_eq!(queue.retreat_wrapping().unwrap().id, "c");
        assert_eq!(queue.advance_wrapping().unwrap().id, "a");
    }

    #[test]
    fn shuffle_keeps_active_track() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b", "c", "d", "e"]), "c");

        let mut rng = StdRng::seed_from_u64(99);
        queue.set_shuffle(true, &mut rng);
        assert_eq!(queue.active().unwrap().id, "c");
        assert_eq!(queue.position(), 0);

        queue.set_shuffle(false, &mut rng);
        assert_eq!(queue.active().unwrap().id, "c");
        assert_eq!(queue.position(), 2);
        assert!(!queue.is_shuffled());
    }

    #[test]
    fn shuffle_off_restores_natural_order() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b", "c", "d"]), "a");

        let mut rng = StdRng::seed_from_u64(5);
        queue.set_shuffle(true, &mut rng);
        queue.set_shuffle(false, &mut rng);

        let ids: Vec<&str> = queue
            .in_play_order()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn singleton_queue() {
        let mut queue = PlayQueue::new();
        queue.set_single(track("solo"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active().unwrap().id, "solo");
        assert!(queue.peek_next().is_none());
        assert!(queue.at_end());
    }

    #[test]
    fn peek_does_not_move() {
        let mut queue = PlayQueue::new();
        queue.set_tracks(playlist(&["a", "b"]), "a");
        assert_eq!(queue.peek_next().unwrap().id, "b");
        assert_eq!(queue.active().unwrap().id, "a");
    }
}
