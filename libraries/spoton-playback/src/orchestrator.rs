//! Playback orchestrator
//!
//! Single owner of playback state: the queue, listening history, transport
//! state, loop/shuffle modes, the backend router, the local audio pipeline,
//! and the transition engine. The host calls in for every user gesture,
//! reports progress through [`PlaybackOrchestrator::tick`], reports natural
//! track ends through [`PlaybackOrchestrator::on_track_end`], and drains
//! events after each call.

use rand::thread_rng;
use tracing::{debug, info, warn};

use spoton_core::{ConnectionType, EmbedQuality, Track, UserSettings};
use spoton_discovery::AutoplayResolver;

use crate::backend::{BackendKind, BackendRouter, MediaBackend};
use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::history::ListeningHistory;
use crate::pipeline::{AudioPipeline, EqualizerPreset};
use crate::queue::PlayQueue;
use crate::transition::TransitionEngine;
use crate::types::{LoopMode, PlaybackState, PlayerConfig};
use crate::volume::Volume;

/// Playback orchestration facade
pub struct PlaybackOrchestrator {
    settings: UserSettings,
    connection: ConnectionType,
    show_video: bool,

    queue: PlayQueue,
    history: ListeningHistory,
    router: BackendRouter,
    pipeline: AudioPipeline,
    transition: TransitionEngine,
    volume: Volume,

    state: PlaybackState,
    loop_mode: LoopMode,

    /// Current track was chosen by autoplay, not the listener
    autoplay_sourced: bool,

    autoplay: Option<AutoplayResolver>,

    pending: Vec<PlaybackEvent>,
}

impl PlaybackOrchestrator {
    pub fn new(config: PlayerConfig) -> Self {
        let pipeline = AudioPipeline::from_settings(&config.settings);
        let mut transition = TransitionEngine::new();
        transition.configure(&config.settings.track_transitions);
        let mut volume = Volume::default();
        volume.set_normalized(config.settings.listening_controls.volume_normalization);

        Self {
            settings: config.settings,
            connection: config.connection,
            show_video: false,
            queue: PlayQueue::new(),
            history: ListeningHistory::new(),
            router: BackendRouter::new(),
            pipeline,
            transition,
            volume,
            state: PlaybackState::Idle,
            loop_mode: LoopMode::Off,
            autoplay_sourced: false,
            autoplay: None,
            pending: Vec::new(),
        }
    }

    pub fn set_local_backend(&mut self, backend: Box<dyn MediaBackend>) {
        self.router.set_local(backend);
    }

    pub fn set_remote_backend(&mut self, backend: Box<dyn MediaBackend>) {
        self.router.set_remote(backend);
    }

    pub fn set_autoplay_resolver(&mut self, resolver: AutoplayResolver) {
        self.autoplay = Some(resolver);
    }

    /// The host's embed handle finished initializing
    pub fn notify_remote_ready(&mut self) -> Result<()> {
        self.router.notify_remote_ready()
    }

    /// Play a track, optionally in the context of a playlist
    ///
    /// With a playlist, the queue adopts it (unless it is already the same
    /// id sequence, in which case only the active position moves). Without
    /// one, the track plays as a queue of one. `autoplay_sourced` marks
    /// tracks picked by autoplay rather than the listener.
    pub fn play_song(
        &mut self,
        track: Track,
        playlist: Option<Vec<Track>>,
        autoplay_sourced: bool,
    ) -> Result<()> {
        let shuffle_on = self.queue.is_shuffled();
        match playlist {
            Some(tracks) => {
                let replaced = self.queue.set_tracks(tracks, &track.id);
                if self.queue.position_of(&track.id).is_none() {
                    // Track not in the playlist it was requested with
                    self.queue.set_single(track.clone());
                }
                if replaced && shuffle_on {
                    // Shuffle is a player-level mode; it survives queue swaps
                    self.queue.set_shuffle(true, &mut thread_rng());
                }
            }
            None => self.queue.set_single(track.clone()),
        }

        if autoplay_sourced {
            self.pending.push(PlaybackEvent::AutoplayStarted {
                title: track.title.clone(),
                artist: track.artist.clone(),
            });
        }

        self.start_track(track, autoplay_sourced)
    }

    /// Toggle between playing and paused; no-op when nothing is loaded
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Playing => {
                self.router.pause()?;
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused => {
                self.router.play()?;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
        }
    }

    /// Skip to the next track
    ///
    /// Replays the current track under `LoopMode::Track`, wraps under
    /// `LoopMode::Queue`, and at the end of the queue with looping off it
    /// stops where it is instead of wrapping.
    pub fn play_next(&mut self) -> Result<()> {
        if self.queue.is_empty() || !self.state.has_track() {
            return Ok(());
        }

        if self.loop_mode == LoopMode::Track {
            self.router.seek_to(0.0)?;
            self.router.play()?;
            self.set_state(PlaybackState::Playing);
            return Ok(());
        }

        match self.next_natural() {
            Some(track) => self.start_track(track, false),
            None => {
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
        }
    }

    /// Skip to the previous track, wrapping at the start of the queue
    pub fn play_prev(&mut self) -> Result<()> {
        if self.queue.is_empty() || !self.state.has_track() {
            return Ok(());
        }
        let Some(track) = self.queue.retreat_wrapping().cloned() else {
            return Ok(());
        };
        self.start_track(track, false)
    }

    /// Seek to a percentage of the track
    ///
    /// No-op while the backend has not reported a finite duration (remote
    /// embeds report NaN until metadata loads).
    pub fn seek(&mut self, percent: f64) -> Result<()> {
        if !self.state.has_track() {
            return Ok(());
        }
        let Some(duration) = self.router.duration() else {
            return Ok(());
        };
        if !duration.is_finite() || duration <= 0.0 {
            return Ok(());
        }
        let target = duration * (percent.clamp(0.0, 100.0) / 100.0);
        self.router.seek_to(target)
    }

    /// Toggle shuffle, keeping the active track active
    pub fn toggle_shuffle(&mut self) {
        let enabled = !self.queue.is_shuffled();
        self.queue.set_shuffle(enabled, &mut thread_rng());
        self.pending.push(PlaybackEvent::ShuffleToggled(enabled));
    }

    /// Advance the loop mode through its cycle
    pub fn toggle_loop(&mut self) {
        self.loop_mode = self.loop_mode.next();
        self.pending.push(PlaybackEvent::LoopChanged(self.loop_mode));
    }

    /// Connect or disconnect the equalizer
    pub fn toggle_eq(&mut self) {
        let enabled = !self.pipeline.eq_connected();
        self.pipeline.set_eq_connected(enabled);
        self.settings.listening_controls.equaliser_enabled = enabled;
    }

    /// Update all equalizer band gains
    pub fn set_equaliser_settings(&mut self, gains: [f32; 10]) {
        self.pipeline.set_eq_gains(gains);
        self.settings.equaliser = gains;
    }

    pub fn set_eq_preset(&mut self, preset: EqualizerPreset) {
        self.pipeline.set_eq_preset(preset);
        self.settings.equaliser = preset.gains();
    }

    /// Aggregated bass-boost slider; writes through to the two lowest bands
    pub fn set_bass_boost(&mut self, gain_db: f32) {
        self.pipeline.set_bass_boost(gain_db);
        self.settings.equaliser = self.pipeline.eq_gains();
    }

    pub fn set_volume_level(&mut self, level: u8) -> Result<()> {
        self.volume.set_level(level);
        self.apply_volume()
    }

    pub fn toggle_mute(&mut self) -> Result<()> {
        self.volume.toggle_mute();
        self.apply_volume()
    }

    pub fn set_volume_normalization(&mut self, enabled: bool) -> Result<()> {
        self.settings.listening_controls.volume_normalization = enabled;
        self.volume.set_normalized(enabled);
        self.apply_volume()
    }

    pub fn set_balance(&mut self, balance: f32) {
        self.settings.listening_controls.balance = balance;
        self.pipeline.set_balance(balance);
    }

    pub fn set_mono(&mut self, mono: bool) {
        self.settings.listening_controls.mono_audio = mono;
        self.pipeline.set_mono(mono);
    }

    /// Network connection changed; re-pick the quality level
    pub fn set_connection_type(&mut self, connection: ConnectionType) -> Result<()> {
        self.connection = connection;
        self.apply_quality()
    }

    /// Toggle between audio-only and video rendering of remote tracks
    pub fn set_show_video(&mut self, show_video: bool) -> Result<()> {
        self.show_video = show_video;
        self.apply_quality()
    }

    /// Close the player: stop everything and release both backends
    pub fn close_player(&mut self) {
        self.transition.cancel();
        self.router.release_all();
        self.queue.clear();
        self.autoplay_sourced = false;
        self.set_state(PlaybackState::Idle);
        self.pending.push(PlaybackEvent::PlayerClosed);
        info!("player closed");
    }

    /// Progress tick from the host's playback timer
    ///
    /// Drives the crossfade: pre-starts the next track when the outgoing
    /// one enters the crossfade window, and shapes volume for both sides of
    /// the transition.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.is_playing() {
            return Ok(());
        }
        let (Some(position), Some(duration)) = (self.router.position(), self.router.duration())
        else {
            return Ok(());
        };

        // A pre-start replaces the source in place, so the outgoing end
        // event may never fire; once the live track is past the fade
        // window, any end the host reports is its own
        self.transition.settle(position, duration);

        // Crossfade volume shaping only applies to the local backend; the
        // remote embed owns its own output and just plays to its end
        if self.router.live_kind() != Some(BackendKind::LocalAudio) {
            return Ok(());
        }

        if self.transition.should_prestart(position, duration) {
            if let Some(next) = self.next_natural() {
                debug!(title = %next.title, "crossfade pre-start");
                self.start_track(next, false)?;
                // start_track cancels transition state; re-latch after it
                self.transition.mark_advance_pending();
                // A remote incoming track plays at full volume from the
                // start; only local audio fades in
                if self.router.live_kind() == Some(BackendKind::LocalAudio) {
                    self.transition.begin_fade_in();
                    if let Some(fraction) = self.transition.fade_in_fraction(0.0) {
                        self.router
                            .set_volume(self.volume.effective() * fraction)?;
                    }
                }
                return Ok(());
            }
        }

        let fraction = match self.transition.fade_in_fraction(position) {
            Some(fade_in) => fade_in,
            None => self.transition.outgoing_fraction(position, duration),
        };
        self.router.set_volume(self.volume.effective() * fraction)
    }

    /// The live backend reported that the track played to its end
    ///
    /// Resolution order: swallow ends already handled by a crossfade
    /// pre-start, repeat the track under `LoopMode::Track`, advance through
    /// the queue, wrap under `LoopMode::Queue`, and finally hand over to
    /// autoplay or stop.
    pub async fn on_track_end(&mut self) -> Result<()> {
        if self.transition.take_advance_pending() {
            return Ok(());
        }

        if self.loop_mode == LoopMode::Track {
            self.router.seek_to(0.0)?;
            self.router.play()?;
            self.set_state(PlaybackState::Playing);
            return Ok(());
        }

        if let Some(next) = self.next_natural() {
            return self.start_track(next, false);
        }

        self.finish_queue().await
    }

    /// Run the local backend's samples through the processing pipeline
    pub fn process_local_audio(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if self.router.live_kind() == Some(BackendKind::LocalAudio) {
            self.pipeline.process(buffer, sample_rate);
        }
    }

    /// Take all pending UI events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    pub fn current_track(&self) -> Option<&Track> {
        if self.state.has_track() {
            self.queue.active()
        } else {
            None
        }
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    pub fn history(&self) -> &ListeningHistory {
        &self.history
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn volume_level(&self) -> u8 {
        self.volume.level()
    }

    /// Current track came from autoplay rather than the listener
    pub fn is_autoplay_sourced(&self) -> bool {
        self.autoplay_sourced
    }

    fn start_track(&mut self, track: Track, autoplay_sourced: bool) -> Result<()> {
        self.transition.cancel();
        self.history.record(&track);
        self.router.activate(&track.source)?;
        self.apply_quality()?;
        // Pushed unconditionally: on the first track the state is still
        // Idle at this point, and the backend must not keep a stale gain
        self.router.set_volume(self.volume.effective())?;
        self.router.play()?;
        self.autoplay_sourced = autoplay_sourced;
        self.set_state(PlaybackState::Playing);
        if !autoplay_sourced {
            self.pending.push(PlaybackEvent::NowPlaying {
                title: track.title.clone(),
                artist: track.artist.clone(),
            });
        }
        self.pending.push(PlaybackEvent::TrackChanged {
            id: track.id,
            title: track.title,
            artist: track.artist,
        });
        Ok(())
    }

    /// Next track for a natural advance: queue order, wrapping only under
    /// `LoopMode::Queue`
    fn next_natural(&mut self) -> Option<Track> {
        if !self.queue.at_end() {
            return self.queue.advance().cloned();
        }
        if self.loop_mode == LoopMode::Queue {
            return self.queue.advance_wrapping().cloned();
        }
        None
    }

    /// Queue played out: try autoplay, otherwise stop
    async fn finish_queue(&mut self) -> Result<()> {
        let autoplay_enabled = self.settings.listening_controls.auto_play;

        if autoplay_enabled {
            if let Some(resolver) = self.autoplay.as_ref() {
                let seed = self.history.recommendation_seed();
                match resolver.resolve(&seed).await {
                    Ok(track) => {
                        info!(title = %track.title, "autoplay continuation");
                        return self.play_song(track, None, true);
                    }
                    Err(err) => {
                        warn!(%err, "autoplay failed, stopping playback");
                        self.pending.push(PlaybackEvent::AutoplayFailed);
                        self.set_state(PlaybackState::Paused);
                        return Ok(());
                    }
                }
            }
        }

        self.pending.push(PlaybackEvent::QueueEnded);
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    fn apply_volume(&mut self) -> Result<()> {
        if self.state.has_track() {
            self.router.set_volume(self.volume.effective())?;
        }
        Ok(())
    }

    /// Push the quality level for the current connection to the remote
    /// embed; no-op for the local backend
    fn apply_quality(&mut self) -> Result<()> {
        if self.router.live_kind() != Some(BackendKind::RemoteEmbed) {
            return Ok(());
        }
        let by_connection = if self.show_video {
            &self.settings.playback_quality.video
        } else {
            &self.settings.playback_quality.audio
        };
        let quality = by_connection.for_connection(self.connection);
        let level: EmbedQuality = quality.embed_level();
        self.router.set_quality(level)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending.push(PlaybackEvent::StateChanged(state));
        }
    }
}
