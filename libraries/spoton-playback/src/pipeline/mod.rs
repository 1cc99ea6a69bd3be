//! Local audio processing pipeline
//!
//! Processes the local backend's interleaved stereo buffers. The chain is
//! equalizer → stereo stage; the equalizer can be disconnected entirely
//! (the disabled path has zero processing cost, it is not a flat EQ). The
//! remote embed renders its own audio, so none of this applies to it.

mod equalizer;
mod stereo;

pub use equalizer::{Equalizer, EqualizerPreset, EQ_BAND_FREQUENCIES};
pub use stereo::StereoStage;

use spoton_core::UserSettings;

/// Processing chain for the local audio backend
pub struct AudioPipeline {
    equalizer: Equalizer,
    stereo: StereoStage,

    /// Whether the equalizer is wired into the chain
    eq_connected: bool,
}

impl AudioPipeline {
    pub fn new() -> Self {
        Self {
            equalizer: Equalizer::new(),
            stereo: StereoStage::new(),
            eq_connected: false,
        }
    }

    /// Build a pipeline matching a settings snapshot
    pub fn from_settings(settings: &UserSettings) -> Self {
        let mut pipeline = Self::new();
        pipeline.set_eq_connected(settings.listening_controls.equaliser_enabled);
        pipeline.set_eq_gains(settings.equaliser);
        pipeline.set_balance(settings.listening_controls.balance);
        pipeline.set_mono(settings.listening_controls.mono_audio);
        pipeline
    }

    /// Connect or disconnect the equalizer
    ///
    /// Reconnecting resets filter state so stale history from the last
    /// connected period cannot produce a transient.
    pub fn set_eq_connected(&mut self, connected: bool) {
        if connected != self.eq_connected {
            self.equalizer.reset();
        }
        self.eq_connected = connected;
    }

    pub fn eq_connected(&self) -> bool {
        self.eq_connected
    }

    /// Update band gains without touching the connection state
    ///
    /// Gain values survive disconnect/reconnect; only filter state resets.
    pub fn set_eq_gains(&mut self, gains: [f32; 10]) {
        self.equalizer.set_gains(gains);
    }

    pub fn eq_gains(&self) -> [f32; 10] {
        self.equalizer.gains()
    }

    pub fn set_eq_preset(&mut self, preset: EqualizerPreset) {
        self.equalizer.set_preset(preset);
    }

    /// Drive the two lowest bands from one bass-boost value
    pub fn set_bass_boost(&mut self, gain_db: f32) {
        self.equalizer.set_bass_boost(gain_db);
    }

    pub fn eq_preset(&self) -> EqualizerPreset {
        self.equalizer.preset()
    }

    pub fn set_balance(&mut self, balance: f32) {
        self.stereo.set_balance(balance);
    }

    pub fn set_mono(&mut self, mono: bool) {
        self.stereo.set_mono(mono);
    }

    /// Process an interleaved stereo buffer in place
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if self.eq_connected {
            self.equalizer.process(buffer, sample_rate);
        }
        self.stereo.process(buffer);
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new()
    }
}
