//! Track transition engine
//!
//! Drives crossfades from the host's progress ticks. There are no timers
//! here: the outgoing fade follows the outgoing track's remaining time, and
//! the incoming fade follows the incoming track's own reported position,
//! quantized to discrete steps so repeated ticks at the same position are
//! idempotent.

use spoton_core::TrackTransitions;

/// Discrete fade-in steps for the incoming track
const FADE_STEPS: u32 = 50;

/// Fade-in ramp keyed to the incoming track's position
#[derive(Debug, Clone, Copy)]
struct FadeRamp {
    duration_secs: f32,
}

impl FadeRamp {
    /// Volume fraction for the incoming track at `position` seconds
    ///
    /// Steps from 0 to 1 over `duration_secs` in `FADE_STEPS` increments.
    /// Returns `None` once the ramp has completed.
    fn level_at(self, position: f64) -> Option<f32> {
        if self.duration_secs <= 0.0 {
            return None;
        }
        let step_secs = f64::from(self.duration_secs) / f64::from(FADE_STEPS);
        let step = (position.max(0.0) / step_secs).floor() as u32;
        if step >= FADE_STEPS {
            return None;
        }
        Some(step as f32 / FADE_STEPS as f32)
    }
}

/// Crossfade state machine
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    /// Crossfade duration in seconds, 0 disables
    crossfade_secs: f32,

    /// Whether the next track pre-starts under the outgoing one
    automix: bool,

    /// Active fade-in on the incoming track
    ramp: Option<FadeRamp>,

    /// Set when the queue has already advanced for a pre-started track, so
    /// the outgoing track's natural end must not advance again
    advance_pending: bool,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the transition settings snapshot
    pub fn configure(&mut self, transitions: &TrackTransitions) {
        self.crossfade_secs = transitions.crossfade.max(0.0);
        self.automix = transitions.automix;
    }

    pub fn crossfade_secs(&self) -> f32 {
        self.crossfade_secs
    }

    /// Whether the incoming track should start now, under the outgoing one
    ///
    /// True once per track: entering the crossfade window sets the advance
    /// latch, and the latch blocks re-triggering on subsequent ticks.
    pub fn should_prestart(&self, position: f64, duration: f64) -> bool {
        if !self.automix || self.crossfade_secs <= 0.0 || self.advance_pending {
            return false;
        }
        if !duration.is_finite() || duration <= 0.0 {
            return false;
        }
        duration - position <= f64::from(self.crossfade_secs)
    }

    /// Latch that the queue already advanced for a pre-started track
    pub fn mark_advance_pending(&mut self) {
        self.advance_pending = true;
    }

    /// Consume the latch at the outgoing track's natural end
    ///
    /// Returns `true` when the advance already happened and the end event
    /// must be swallowed.
    pub fn take_advance_pending(&mut self) -> bool {
        std::mem::take(&mut self.advance_pending)
    }

    /// Release the latch once the incoming track is past the fade window
    ///
    /// A pre-start replaces the source in place, so the outgoing track's
    /// end event may never fire at all; the latch only needs to absorb an
    /// end that was already in flight when the source switched. Any end
    /// reported after the fade window belongs to the incoming track.
    pub fn settle(&mut self, position: f64, duration: f64) {
        if !self.advance_pending {
            return;
        }
        let mut guard = f64::from(self.crossfade_secs);
        if duration.is_finite() && duration > 0.0 {
            guard = guard.min(duration / 2.0);
        }
        if position >= guard {
            self.advance_pending = false;
        }
    }

    /// Outgoing track volume fraction for the current tick
    ///
    /// 1.0 outside the crossfade window, falling linearly to 0.0 across it.
    pub fn outgoing_fraction(&self, position: f64, duration: f64) -> f32 {
        if self.crossfade_secs <= 0.0 || !duration.is_finite() || duration <= 0.0 {
            return 1.0;
        }
        let remaining = (duration - position).max(0.0);
        (remaining / f64::from(self.crossfade_secs)).min(1.0) as f32
    }

    /// Start a fade-in ramp on the incoming track
    pub fn begin_fade_in(&mut self) {
        if self.crossfade_secs > 0.0 {
            self.ramp = Some(FadeRamp {
                duration_secs: self.crossfade_secs,
            });
        }
    }

    /// Incoming track volume fraction at `position`, if a ramp is active
    ///
    /// Clears the ramp once it completes; callers then return to full
    /// volume.
    pub fn fade_in_fraction(&mut self, position: f64) -> Option<f32> {
        let ramp = self.ramp?;
        match ramp.level_at(position) {
            Some(level) => Some(level),
            None => {
                self.ramp = None;
                None
            }
        }
    }

    pub fn fading_in(&self) -> bool {
        self.ramp.is_some()
    }

    /// Drop any active ramp and latch (track switch, close)
    pub fn cancel(&mut self) {
        self.ramp = None;
        self.advance_pending = false;
    }
}
