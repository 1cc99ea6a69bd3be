//! Core playback types

use serde::{Deserialize, Serialize};

use spoton_core::{ConnectionType, UserSettings};

/// Loop mode, cycled by the loop button
///
/// Cycle order: `Off` → `Queue` → `Track` → `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// No looping; playback stops (or autoplays) at the end of the queue
    #[default]
    #[serde(rename = "none")]
    Off,

    /// Loop the whole queue
    #[serde(rename = "playlist")]
    Queue,

    /// Repeat the current track
    #[serde(rename = "song")]
    Track,
}

impl LoopMode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            LoopMode::Off => LoopMode::Queue,
            LoopMode::Queue => LoopMode::Track,
            LoopMode::Track => LoopMode::Off,
        }
    }
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No track loaded
    #[default]
    Idle,

    /// Track loaded, paused
    Paused,

    /// Track loaded, playing
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    pub fn has_track(self) -> bool {
        !matches!(self, PlaybackState::Idle)
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone, Default)]
pub struct PlayerConfig {
    /// User settings snapshot applied at startup
    pub settings: UserSettings,

    /// Network connection type, used for quality selection
    pub connection: ConnectionType,
}
