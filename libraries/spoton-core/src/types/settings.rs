//! Per-user settings document
//!
//! Mirrors the nested `settings.*` fields of the user document: equaliser
//! gains, listening controls, track transitions, and playback quality.
//! The playback core consumes this document; ownership stays with the
//! settings collaborator.

use serde::{Deserialize, Serialize};

use super::quality::{Quality, QualityByConnection};

/// Number of equaliser bands
pub const EQ_BANDS: usize = 10;

/// Per-user settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Ten-band equaliser gains in dB (-12..=12 per band)
    pub equaliser: [f32; EQ_BANDS],

    /// Listening controls section
    pub listening_controls: ListeningControls,

    /// Track transition section
    pub track_transitions: TrackTransitions,

    /// Playback quality by connection type
    pub playback_quality: PlaybackQualitySettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            equaliser: [0.0; EQ_BANDS],
            listening_controls: ListeningControls::default(),
            track_transitions: TrackTransitions::default(),
            playback_quality: PlaybackQualitySettings::default(),
        }
    }
}

/// Listening controls: autoplay, mono, equaliser toggle, normalization,
/// stereo balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListeningControls {
    /// Continue with recommended tracks when the queue runs out
    pub auto_play: bool,

    /// Downmix to mono
    pub mono_audio: bool,

    /// Equaliser stage connected
    pub equaliser_enabled: bool,

    /// Scale output to a normalized base volume
    pub volume_normalization: bool,

    /// Stereo balance, -1.0 (left) ..= 1.0 (right)
    pub balance: f32,
}

impl Default for ListeningControls {
    fn default() -> Self {
        Self {
            auto_play: true,
            mono_audio: false,
            equaliser_enabled: false,
            volume_normalization: true,
            balance: 0.0,
        }
    }
}

/// Track transition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackTransitions {
    /// Remove silence between consecutive tracks
    pub gapless_playback: bool,

    /// Blend the end of one track into the start of the next
    pub automix: bool,

    /// Crossfade duration in seconds (0 disables)
    pub crossfade: f32,
}

impl Default for TrackTransitions {
    fn default() -> Self {
        Self {
            gapless_playback: true,
            automix: false,
            crossfade: 0.0,
        }
    }
}

/// Playback quality, split by media kind and connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackQualitySettings {
    pub audio: QualityByConnection,
    pub video: QualityByConnection,
}

impl Default for PlaybackQualitySettings {
    fn default() -> Self {
        Self {
            audio: QualityByConnection {
                wifi: Quality::Automatic,
                cellular: Quality::Standard,
            },
            video: QualityByConnection {
                wifi: Quality::Standard,
                cellular: Quality::Standard,
            },
        }
    }
}
