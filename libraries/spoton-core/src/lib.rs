//! Spoton Core
//!
//! Shared types, the per-user settings document, and error handling for the
//! Spoton playback stack.
//!
//! This crate defines:
//! - **Domain Types**: [`Track`], [`TrackSource`], playback quality mapping
//! - **Settings Document**: [`UserSettings`] with the nested sections the
//!   settings screen reads and writes
//! - **Collaborator Trait**: [`SettingsStore`] for per-user persistence
//! - **Error Handling**: unified [`SpotonError`] and [`Result`] types

#![forbid(unsafe_code)]

pub mod error;
pub mod settings;
pub mod types;

pub use error::{Result, SpotonError};
pub use settings::{MemorySettingsStore, SettingsStore};
pub use types::{
    ConnectionType, EmbedQuality, ListeningControls, PlaybackQualitySettings, Quality,
    QualityByConnection, Track, TrackSource, TrackTransitions, UserSettings,
};
