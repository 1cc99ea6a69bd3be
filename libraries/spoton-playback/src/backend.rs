//! Media backend abstraction and routing
//!
//! Two backends exist: a local audio element for direct URLs and a remote
//! embedded player for catalog tracks. Exactly one is live at a time; the
//! [`BackendRouter`] dispatches on the track source and guarantees the
//! outgoing backend is silenced before the incoming one starts.
//!
//! The remote embed initializes asynchronously. Commands issued before the
//! host signals readiness are queued and replayed in order by
//! [`BackendRouter::notify_remote_ready`].

use tracing::{debug, warn};

use spoton_core::{EmbedQuality, TrackSource};

use crate::error::{PlaybackError, Result};

/// Which backend a track routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// HTML audio element playing a direct URL
    LocalAudio,

    /// Embedded remote player driven through its iframe API
    RemoteEmbed,
}

impl BackendKind {
    fn for_source(source: &TrackSource) -> Self {
        match source {
            TrackSource::Local { .. } => BackendKind::LocalAudio,
            TrackSource::Remote { .. } => BackendKind::RemoteEmbed,
        }
    }
}

/// A playable media surface
///
/// Implementations wrap the host's actual media element or embed handle.
/// `load` replaces any currently loaded source, releasing transient
/// resources the old source held.
pub trait MediaBackend {
    fn load(&mut self, source: &TrackSource) -> Result<()>;

    /// Release the loaded source and any transient resources behind it
    fn unload(&mut self);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Seek to an absolute position in seconds
    fn seek_to(&mut self, seconds: f64) -> Result<()>;

    /// Current position in seconds, `None` when nothing is loaded
    fn position(&self) -> Option<f64>;

    /// Track duration in seconds, `None` while still unknown
    fn duration(&self) -> Option<f64>;

    /// Output gain, 0.0-1.0
    fn set_volume(&mut self, gain: f32);

    /// Request a playback quality level; local audio ignores this
    fn set_quality(&mut self, _quality: EmbedQuality) {}
}

/// Command queued for the remote embed before it is ready
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Load(TrackSource),
    Play,
    Pause,
    SeekTo(f64),
    SetVolume(f32),
    SetQuality(EmbedQuality),
}

/// Routes transport commands to whichever backend owns the active track
pub struct BackendRouter {
    local: Option<Box<dyn MediaBackend>>,
    remote: Option<Box<dyn MediaBackend>>,
    live: Option<BackendKind>,

    /// Source currently loaded on the live backend
    live_source: Option<TrackSource>,

    remote_ready: bool,
    deferred: Vec<BackendCommand>,
}

impl BackendRouter {
    pub fn new() -> Self {
        Self {
            local: None,
            remote: None,
            live: None,
            live_source: None,
            remote_ready: false,
            deferred: Vec::new(),
        }
    }

    pub fn set_local(&mut self, backend: Box<dyn MediaBackend>) {
        self.local = Some(backend);
    }

    pub fn set_remote(&mut self, backend: Box<dyn MediaBackend>) {
        self.remote = Some(backend);
        self.remote_ready = false;
    }

    /// The backend currently holding the active track
    pub fn live_kind(&self) -> Option<BackendKind> {
        self.live
    }

    /// Load `source` on its backend, making that backend live
    ///
    /// When the source routes to a different backend than the current one,
    /// the outgoing backend is paused and unloaded first so the two never
    /// sound at once. Activating the source that is already loaded skips
    /// the load, keeping the backend's position and buffered media.
    pub fn activate(&mut self, source: &TrackSource) -> Result<()> {
        let target = BackendKind::for_source(source);

        if let Some(current) = self.live {
            if current != target {
                self.silence(current);
                self.live_source = None;
            }
        }

        // Switching away from the remote invalidates anything it had queued
        if target == BackendKind::LocalAudio {
            self.deferred.clear();
        }

        if self.live == Some(target) && self.live_source.as_ref() == Some(source) {
            return Ok(());
        }

        self.live = Some(target);
        self.live_source = Some(source.clone());
        debug!(?target, "activating backend");

        match target {
            BackendKind::LocalAudio => self.local_mut()?.load(source),
            BackendKind::RemoteEmbed => {
                if self.remote_ready {
                    self.remote_mut()?.load(source)
                } else {
                    self.deferred.push(BackendCommand::Load(source.clone()));
                    Ok(())
                }
            }
        }
    }

    pub fn play(&mut self) -> Result<()> {
        self.dispatch(BackendCommand::Play)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.dispatch(BackendCommand::Pause)
    }

    pub fn seek_to(&mut self, seconds: f64) -> Result<()> {
        self.dispatch(BackendCommand::SeekTo(seconds))
    }

    pub fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.dispatch(BackendCommand::SetVolume(gain))
    }

    /// Request a quality level on the remote embed
    ///
    /// No-op when the local backend is live; queued when the embed is not
    /// ready yet.
    pub fn set_quality(&mut self, quality: EmbedQuality) -> Result<()> {
        match self.live {
            Some(BackendKind::RemoteEmbed) => self.dispatch(BackendCommand::SetQuality(quality)),
            _ => Ok(()),
        }
    }

    /// Current position of the live backend
    pub fn position(&self) -> Option<f64> {
        self.live_backend().and_then(MediaBackend::position)
    }

    /// Duration of the live track, `None` while the backend has not
    /// reported one
    pub fn duration(&self) -> Option<f64> {
        self.live_backend().and_then(MediaBackend::duration)
    }

    /// The host's embed handle finished initializing; replay queued commands
    pub fn notify_remote_ready(&mut self) -> Result<()> {
        self.remote_ready = true;
        let queued = std::mem::take(&mut self.deferred);
        if !queued.is_empty() {
            debug!(count = queued.len(), "replaying deferred embed commands");
        }
        for command in queued {
            self.apply(BackendKind::RemoteEmbed, command)?;
        }
        Ok(())
    }

    /// Stop and unload both backends
    pub fn release_all(&mut self) {
        if let Some(kind) = self.live.take() {
            self.silence(kind);
        }
        self.live_source = None;
        self.deferred.clear();
        if let Some(local) = self.local.as_mut() {
            local.unload();
        }
        if let Some(remote) = self.remote.as_mut() {
            remote.unload();
        }
    }

    fn dispatch(&mut self, command: BackendCommand) -> Result<()> {
        let Some(kind) = self.live else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        if kind == BackendKind::RemoteEmbed && !self.remote_ready {
            self.deferred.push(command);
            return Ok(());
        }

        self.apply(kind, command)
    }

    fn apply(&mut self, kind: BackendKind, command: BackendCommand) -> Result<()> {
        let backend = match kind {
            BackendKind::LocalAudio => self.local_mut()?,
            BackendKind::RemoteEmbed => self.remote_mut()?,
        };

        match command {
            BackendCommand::Load(source) => backend.load(&source),
            BackendCommand::Play => backend.play(),
            BackendCommand::Pause => backend.pause(),
            BackendCommand::SeekTo(seconds) => backend.seek_to(seconds),
            BackendCommand::SetVolume(gain) => {
                backend.set_volume(gain);
                Ok(())
            }
            BackendCommand::SetQuality(quality) => {
                backend.set_quality(quality);
                Ok(())
            }
        }
    }

    fn silence(&mut self, kind: BackendKind) {
        let backend = match kind {
            BackendKind::LocalAudio => self.local.as_mut(),
            BackendKind::RemoteEmbed => self.remote.as_mut(),
        };
        if let Some(backend) = backend {
            if let Err(err) = backend.pause() {
                warn!(%err, ?kind, "failed to pause outgoing backend");
            }
            backend.unload();
        }
    }

    fn live_backend(&self) -> Option<&dyn MediaBackend> {
        match self.live? {
            BackendKind::LocalAudio => self.local.as_deref(),
            BackendKind::RemoteEmbed => self.remote.as_deref(),
        }
    }

    fn local_mut(&mut self) -> Result<&mut Box<dyn MediaBackend>> {
        self.local
            .as_mut()
            .ok_or(PlaybackError::BackendUnavailable("local audio"))
    }

    fn remote_mut(&mut self) -> Result<&mut Box<dyn MediaBackend>> {
        self.remote
            .as_mut()
            .ok_or(PlaybackError::BackendUnavailable("remote embed"))
    }
}

impl Default for BackendRouter {
    fn default() -> Self {
        Self::new()
    }
}
