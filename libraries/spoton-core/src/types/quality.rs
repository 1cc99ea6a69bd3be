//! Playback quality selection by connection type
//!
//! The remote embedded player exposes a small set of native quality levels;
//! the user-facing settings pick one per connection type, separately for
//! audio-only and video playback.

use serde::{Deserialize, Serialize};

/// Network connection type, as reported by the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Wifi,
    Cellular,
    #[default]
    Unknown,
}

/// User-facing playback quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    #[default]
    Automatic,
    Low,
    Standard,
    High,
    VeryHigh,
}

impl Quality {
    /// Map to the embedded player's native quality level
    pub fn embed_level(self) -> EmbedQuality {
        match self {
            Quality::VeryHigh => EmbedQuality::Highres,
            Quality::High => EmbedQuality::Hd1080,
            Quality::Standard => EmbedQuality::Hd720,
            Quality::Low => EmbedQuality::Large,
            Quality::Automatic => EmbedQuality::Default,
        }
    }
}

/// Native quality levels understood by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedQuality {
    Default,
    Large,
    Hd720,
    Hd1080,
    Highres,
}

impl EmbedQuality {
    /// Wire name expected by the embedded player's quality API
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedQuality::Default => "default",
            EmbedQuality::Large => "large",
            EmbedQuality::Hd720 => "hd720",
            EmbedQuality::Hd1080 => "hd1080",
            EmbedQuality::Highres => "highres",
        }
    }
}

/// Quality choice per connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityByConnection {
    pub wifi: Quality,
    pub cellular: Quality,
}

impl QualityByConnection {
    /// Select the quality for a connection
    ///
    /// Unknown connections use the cellular entry, erring on the side of
    /// lower bandwidth.
    pub fn for_connection(&self, connection: ConnectionType) -> Quality {
        match connection {
            ConnectionType::Wifi => self.wifi,
            ConnectionType::Cellular | ConnectionType::Unknown => self.cellular,
        }
    }
}
