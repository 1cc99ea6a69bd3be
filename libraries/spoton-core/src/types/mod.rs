//! Domain types shared across the Spoton crates

mod quality;
mod settings;
mod track;

pub use quality::{ConnectionType, EmbedQuality, Quality, QualityByConnection};
pub use settings::{ListeningControls, PlaybackQualitySettings, TrackTransitions, UserSettings};
pub use track::{Track, TrackSource};
