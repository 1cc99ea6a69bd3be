//! End-to-end orchestrator tests against instrumented fake backends

use std::sync::{Arc, Mutex};

use spoton_core::{ConnectionType, Track, TrackSource, UserSettings};
use spoton_playback::{
    LoopMode, MediaBackend, PlaybackEvent, PlaybackOrchestrator, PlaybackState, PlayerConfig,
    Result,
};

#[derive(Debug, Default)]
struct Shared {
    commands: Vec<String>,
    position: f64,
    duration: Option<f64>,
    volume: f32,
    loaded: Option<String>,
}

#[derive(Clone)]
struct FakeBackend {
    name: &'static str,
    shared: Arc<Mutex<Shared>>,
}

impl FakeBackend {
    fn new(name: &'static str) -> (Self, Arc<Mutex<Shared>>) {
        let shared = Arc::new(Mutex::new(Shared {
            duration: Some(200.0),
            ..Shared::default()
        }));
        (
            Self {
                name,
                shared: shared.clone(),
            },
            shared,
        )
    }

    fn record(&self, call: String) {
        self.shared.lock().unwrap().commands.push(call);
    }
}

impl MediaBackend for FakeBackend {
    fn load(&mut self, source: &TrackSource) -> Result<()> {
        let what = match source {
            TrackSource::Local { url } => url.clone(),
            TrackSource::Remote { video_id } => video_id.clone(),
        };
        self.record(format!("{}:load({what})", self.name));
        let mut shared = self.shared.lock().unwrap();
        shared.loaded = Some(what);
        shared.position = 0.0;
        Ok(())
    }

    fn unload(&mut self) {
        self.record(format!("{}:unload", self.name));
        self.shared.lock().unwrap().loaded = None;
    }

    fn play(&mut self) -> Result<()> {
        self.record(format!("{}:play", self.name));
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record(format!("{}:pause", self.name));
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> Result<()> {
        self.record(format!("{}:seek({seconds})", self.name));
        self.shared.lock().unwrap().position = seconds;
        Ok(())
    }

    fn position(&self) -> Option<f64> {
        Some(self.shared.lock().unwrap().position)
    }

    fn duration(&self) -> Option<f64> {
        self.shared.lock().unwrap().duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.shared.lock().unwrap().volume = gain;
    }

    fn set_quality(&mut self, quality: spoton_core::EmbedQuality) {
        self.record(format!("{}:quality({})", self.name, quality.as_str()));
    }
}

fn local_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {id}"),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        album_id: "al1".to_string(),
        album_art: String::new(),
        duration: "3:20".to_string(),
        source: TrackSource::Local {
            url: format!("https://cdn/{id}.mp3"),
        },
    }
}

fn remote_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Video {id}"),
        artist: "Artist".to_string(),
        album: String::new(),
        album_id: String::new(),
        album_art: String::new(),
        duration: "3:20".to_string(),
        source: TrackSource::Remote {
            video_id: id.to_string(),
        },
    }
}

struct Harness {
    player: PlaybackOrchestrator,
    local: Arc<Mutex<Shared>>,
    remote: Arc<Mutex<Shared>>,
}

fn harness_with(settings: UserSettings) -> Harness {
    let (local_backend, local) = FakeBackend::new("local");
    let (remote_backend, remote) = FakeBackend::new("remote");

    let mut player = PlaybackOrchestrator::new(PlayerConfig {
        settings,
        connection: ConnectionType::Wifi,
    });
    player.set_local_backend(Box::new(local_backend));
    player.set_remote_backend(Box::new(remote_backend));

    Harness {
        player,
        local,
        remote,
    }
}

fn harness() -> Harness {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    harness_with(settings)
}

fn track_changes(events: &[PlaybackEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::TrackChanged { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn queue_plays_through_and_stops() {
    let mut h = harness();
    let playlist = vec![local_track("a"), local_track("b"), local_track("c")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "b");
    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "c");

    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.state(), PlaybackState::Paused);
    let events = h.player.drain_events();
    assert!(events.contains(&PlaybackEvent::QueueEnded));
}

#[tokio::test]
async fn loop_queue_wraps_at_end() {
    let mut h = harness();
    let playlist = vec![local_track("a"), local_track("b")];
    h.player
        .play_song(local_track("b"), Some(playlist), false)
        .unwrap();
    h.player.toggle_loop();
    assert_eq!(h.player.loop_mode(), LoopMode::Queue);

    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "a");
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[test]
fn walking_past_the_last_track_pauses_in_place() {
    let mut h = harness();
    let playlist = vec![local_track("a"), local_track("b"), local_track("c")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.player.play_next().unwrap();
    h.player.play_next().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "c");
    assert_eq!(h.player.state(), PlaybackState::Playing);

    // No loop, autoplay off: one more next stops without moving
    h.player.play_next().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "c");
    assert_eq!(h.player.state(), PlaybackState::Paused);
}

#[test]
fn next_then_prev_returns_to_same_track() {
    let mut h = harness();
    let playlist = vec![local_track("a"), local_track("b"), local_track("c")];
    h.player
        .play_song(local_track("b"), Some(playlist), false)
        .unwrap();

    h.player.play_next().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "c");
    h.player.play_prev().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "b");
}

#[test]
fn shuffle_preserves_current_track() {
    let mut h = harness();
    let playlist: Vec<Track> = (0..30).map(|i| local_track(&i.to_string())).collect();
    h.player
        .play_song(local_track("17"), Some(playlist), false)
        .unwrap();

    h.player.toggle_shuffle();
    assert!(h.player.is_shuffled());
    assert_eq!(h.player.current_track().unwrap().id, "17");

    h.player.toggle_shuffle();
    assert!(!h.player.is_shuffled());
    assert_eq!(h.player.current_track().unwrap().id, "17");
}

#[test]
fn loop_mode_cycles() {
    let mut h = harness();
    assert_eq!(h.player.loop_mode(), LoopMode::Off);
    h.player.toggle_loop();
    assert_eq!(h.player.loop_mode(), LoopMode::Queue);
    h.player.toggle_loop();
    assert_eq!(h.player.loop_mode(), LoopMode::Track);
    h.player.toggle_loop();
    assert_eq!(h.player.loop_mode(), LoopMode::Off);

    let events = h.player.drain_events();
    let loops: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::LoopChanged(_)))
        .collect();
    assert_eq!(loops.len(), 3);
}

#[test]
fn seek_uses_percentage_on_local_backend() {
    let mut h = harness();
    h.player.play_song(local_track("a"), None, false).unwrap();

    h.player.seek(50.0).unwrap();
    assert!((h.local.lock().unwrap().position - 100.0).abs() < f64::EPSILON);
}

#[test]
fn seek_uses_percentage_on_remote_backend() {
    let mut h = harness();
    h.player.notify_remote_ready().unwrap();
    h.player.play_song(remote_track("vid"), None, false).unwrap();

    h.player.seek(50.0).unwrap();
    assert!((h.remote.lock().unwrap().position - 100.0).abs() < f64::EPSILON);
}

#[test]
fn seek_is_a_no_op_while_duration_unknown() {
    let mut h = harness();
    h.player.notify_remote_ready().unwrap();
    h.player.play_song(remote_track("vid"), None, false).unwrap();
    h.remote.lock().unwrap().duration = None;

    h.player.seek(50.0).unwrap();
    assert!(h.remote.lock().unwrap().position.abs() < f64::EPSILON);
}

#[test]
fn switching_source_kinds_silences_old_backend() {
    let mut h = harness();
    h.player.notify_remote_ready().unwrap();
    h.player.play_song(local_track("a"), None, false).unwrap();
    h.player.play_song(remote_track("vid"), None, false).unwrap();

    let local = h.local.lock().unwrap();
    assert!(local.commands.iter().any(|c| c == "local:pause"));
    assert!(local.commands.iter().any(|c| c == "local:unload"));
    assert!(local.loaded.is_none());
    assert!(h.remote.lock().unwrap().loaded.is_some());
}

#[test]
fn remote_commands_replay_after_ready() {
    let mut h = harness();
    h.player.play_song(remote_track("vid"), None, false).unwrap();
    assert!(h.remote.lock().unwrap().commands.is_empty());

    h.player.notify_remote_ready().unwrap();
    let remote = h.remote.lock().unwrap();
    assert_eq!(remote.commands[0], "remote:load(vid)");
    assert!(remote.commands.contains(&"remote:play".to_string()));
}

#[test]
fn remote_gets_quality_for_connection() {
    let mut h = harness();
    h.player.notify_remote_ready().unwrap();
    h.player.play_song(remote_track("vid"), None, false).unwrap();

    // Default audio quality on cellular is Standard → hd720
    h.player
        .set_connection_type(ConnectionType::Cellular)
        .unwrap();
    let remote = h.remote.lock().unwrap();
    assert!(remote
        .commands
        .iter()
        .any(|c| c == "remote:quality(hd720)"));
}

#[test]
fn eq_gains_survive_disable_enable() {
    let mut h = harness();
    let gains = [5.0, 3.0, 1.0, -2.0, -1.0, 2.0, 4.0, 5.0, 6.0, 7.0];
    h.player.set_equaliser_settings(gains);
    h.player.toggle_eq();
    assert!(h.player.settings().listening_controls.equaliser_enabled);

    h.player.toggle_eq();
    h.player.toggle_eq();
    assert_eq!(h.player.settings().equaliser, gains);
}

#[test]
fn volume_normalization_caps_backend_gain() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.listening_controls.volume_normalization = true;
    let mut h = harness_with(settings);

    h.player.play_song(local_track("a"), None, false).unwrap();
    let gain = h.local.lock().unwrap().volume;
    assert!((gain - 0.85).abs() < 1e-3);
}

#[test]
fn crossfade_prestarts_next_track_exactly_once() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.track_transitions.automix = true;
    settings.track_transitions.crossfade = 5.0;
    let mut h = harness_with(settings);

    let playlist = vec![local_track("a"), local_track("b")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();
    h.player.drain_events();

    // Enter the crossfade window
    h.local.lock().unwrap().position = 196.0;
    h.player.tick().unwrap();

    let events = h.player.drain_events();
    assert_eq!(track_changes(&events), vec!["b"]);

    // Incoming track starts near silence
    assert!(h.local.lock().unwrap().volume < 0.05);

    // Further ticks must not advance again
    h.player.tick().unwrap();
    h.player.tick().unwrap();
    assert!(track_changes(&h.player.drain_events()).is_empty());
    assert_eq!(h.player.current_track().unwrap().id, "b");
}

#[tokio::test]
async fn crossfade_swallows_the_outgoing_end_event() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.track_transitions.automix = true;
    settings.track_transitions.crossfade = 5.0;
    let mut h = harness_with(settings);

    let playlist = vec![local_track("a"), local_track("b")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.local.lock().unwrap().position = 197.0;
    h.player.tick().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "b");

    // The outgoing track's end arrives after the switch; it must not
    // advance the queue a second time
    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "b");
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn queue_advances_past_a_crossfaded_track() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.track_transitions.automix = true;
    settings.track_transitions.crossfade = 5.0;
    let mut h = harness_with(settings);

    let playlist = vec![local_track("a"), local_track("b"), local_track("c")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.local.lock().unwrap().position = 196.0;
    h.player.tick().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "b");

    // The in-place source swap means a's end never fires; once b is past
    // the fade window its own end must advance the queue
    h.local.lock().unwrap().position = 6.0;
    h.player.tick().unwrap();
    h.player.on_track_end().await.unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "c");
    assert_eq!(h.player.state(), PlaybackState::Playing);
}

#[test]
fn prestart_into_remote_track_plays_at_full_volume() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.listening_controls.volume_normalization = false;
    settings.track_transitions.automix = true;
    settings.track_transitions.crossfade = 5.0;
    let mut h = harness_with(settings);
    h.player.notify_remote_ready().unwrap();

    let playlist = vec![local_track("a"), remote_track("vid")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.local.lock().unwrap().position = 196.0;
    h.player.tick().unwrap();
    assert_eq!(h.player.current_track().unwrap().id, "vid");
    assert!((h.remote.lock().unwrap().volume - 1.0).abs() < 1e-3);

    // The embed owns its own output; later ticks must not fade it
    h.remote.lock().unwrap().position = 2.5;
    h.player.tick().unwrap();
    assert!((h.remote.lock().unwrap().volume - 1.0).abs() < 1e-3);
}

#[test]
fn replaying_the_current_track_keeps_backend_state() {
    let mut h = harness();
    h.player.play_song(local_track("a"), None, false).unwrap();
    h.player.seek(50.0).unwrap();

    h.player.play_song(local_track("a"), None, false).unwrap();

    let local = h.local.lock().unwrap();
    assert!((local.position - 100.0).abs() < f64::EPSILON);
    let loads = local.commands.iter().filter(|c| c.contains("load")).count();
    assert_eq!(loads, 1);
}

#[test]
fn fade_in_ramps_volume_with_position() {
    let mut settings = UserSettings::default();
    settings.listening_controls.auto_play = false;
    settings.listening_controls.volume_normalization = false;
    settings.track_transitions.automix = true;
    settings.track_transitions.crossfade = 5.0;
    let mut h = harness_with(settings);

    let playlist = vec![local_track("a"), local_track("b")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();

    h.local.lock().unwrap().position = 196.0;
    h.player.tick().unwrap();
    let at_start = h.local.lock().unwrap().volume;

    h.local.lock().unwrap().position = 2.5;
    h.player.tick().unwrap();
    let mid_ramp = h.local.lock().unwrap().volume;

    h.local.lock().unwrap().position = 6.0;
    h.player.tick().unwrap();
    let after_ramp = h.local.lock().unwrap().volume;

    assert!(at_start < mid_ramp);
    assert!(mid_ramp < after_ramp);
    assert!((after_ramp - 1.0).abs() < 1e-3);
}

#[test]
fn close_player_releases_everything() {
    let mut h = harness();
    h.player.play_song(local_track("a"), None, false).unwrap();
    h.player.drain_events();

    h.player.close_player();
    assert_eq!(h.player.state(), PlaybackState::Idle);
    assert!(h.player.current_track().is_none());
    assert!(h.local.lock().unwrap().loaded.is_none());
    assert!(h
        .player
        .drain_events()
        .contains(&PlaybackEvent::PlayerClosed));
}

#[test]
fn history_records_played_tracks() {
    let mut h = harness();
    let playlist = vec![local_track("a"), local_track("b")];
    h.player
        .play_song(local_track("a"), Some(playlist), false)
        .unwrap();
    h.player.play_next().unwrap();

    let seed = h.player.history().recommendation_seed();
    assert_eq!(seed[0], "Track b - Artist");
    assert_eq!(seed[1], "Track a - Artist");
}
