//! UI-facing playback events
//!
//! The orchestrator accumulates events as side effects of operations; the
//! host drains them after each call (or each tick) and renders toasts,
//! now-playing state, and button glyphs from them.

use crate::types::{LoopMode, PlaybackState};

/// Event emitted by the orchestrator for the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Transport state changed (play/pause/idle)
    StateChanged(PlaybackState),

    /// A different track became active
    TrackChanged {
        id: String,
        title: String,
        artist: String,
    },

    /// Transient "now playing" toast; suppressed for autoplay-sourced
    /// tracks
    NowPlaying { title: String, artist: String },

    /// Shuffle was toggled
    ShuffleToggled(bool),

    /// Loop mode advanced through its cycle
    LoopChanged(LoopMode),

    /// Queue played to its end with no continuation
    QueueEnded,

    /// Autoplay picked a continuation track
    AutoplayStarted { title: String, artist: String },

    /// Autoplay could not produce a track; playback stopped
    AutoplayFailed,

    /// The player was closed and all media released
    PlayerClosed,
}
