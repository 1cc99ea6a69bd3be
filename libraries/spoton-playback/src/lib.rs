//! Spoton Playback
//!
//! Playback orchestration for the Spoton client. The [`PlaybackOrchestrator`]
//! owns the queue, listening history, transport state, and the transition
//! engine, and drives one of two media backends (local audio, remote embed)
//! through the [`MediaBackend`] trait.
//!
//! The orchestrator is synchronous and tick-driven: the host calls
//! [`PlaybackOrchestrator::tick`] on its progress timer and drains UI events
//! with [`PlaybackOrchestrator::drain_events`]. Only the end-of-queue
//! autoplay path is async, because it reaches out to the discovery
//! collaborators.
//!
//! # Example
//!
//! ```no_run
//! use spoton_playback::{PlaybackOrchestrator, PlayerConfig};
//!
//! let mut player = PlaybackOrchestrator::new(PlayerConfig::default());
//! // host wires backends, then:
//! // player.play_song(track, Some(album_tracks), false);
//! ```

#![forbid(unsafe_code)]

mod backend;
mod error;
mod events;
mod history;
mod orchestrator;
mod pipeline;
mod queue;
mod shuffle;
mod transition;
mod types;
mod volume;

pub use backend::{BackendCommand, BackendKind, BackendRouter, MediaBackend};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::{HistoryEntry, ListeningHistory};
pub use orchestrator::PlaybackOrchestrator;
pub use pipeline::{AudioPipeline, Equalizer, EqualizerPreset, StereoStage, EQ_BAND_FREQUENCIES};
pub use queue::PlayQueue;
pub use transition::TransitionEngine;
pub use types::{LoopMode, PlaybackState, PlayerConfig};
pub use volume::Volume;
