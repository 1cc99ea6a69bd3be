//! 10-band equalizer
//!
//! Fixed band layout matching the equalizer dialog: a low shelf at 32 Hz, a
//! high shelf at 16 kHz, and peaking filters between. Gains are clamped to
//! ±12 dB. Changing a gain marks the preset as custom.

use std::f32::consts::PI;

/// Band center frequencies (Hz)
pub const EQ_BAND_FREQUENCIES: [f32; 10] = [
    32.0, 64.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

/// Peaking filter Q (octave bandwidth)
const PEAKING_Q: f32 = 1.41;

/// Named equalizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualizerPreset {
    /// Flat response
    #[default]
    Default,
    Rock,
    Pop,
    Jazz,
    Classical,
    BassBoost,
    VocalBoost,
    /// User-adjusted gains
    Custom,
}

impl EqualizerPreset {
    /// Band gains for this preset, in dB
    pub fn gains(self) -> [f32; 10] {
        match self {
            Self::Default | Self::Custom => [0.0; 10],
            Self::Rock => [5.0, 3.0, 1.0, -2.0, -1.0, 2.0, 4.0, 5.0, 6.0, 7.0],
            Self::Pop => [-2.0, -1.0, 0.0, 2.0, 4.0, 4.0, 2.0, 0.0, -1.0, -2.0],
            Self::Jazz => [4.0, 2.0, 1.0, 3.0, -1.0, -1.0, 0.0, 2.0, 3.0, 4.0],
            Self::Classical => [5.0, 4.0, 3.0, 2.0, -2.0, -2.0, 0.0, 2.0, 3.0, 4.0],
            Self::BassBoost => [6.0, 5.0, 4.0, 2.0, 1.0, -1.0, -2.0, -3.0, -4.0, -5.0],
            Self::VocalBoost => [-2.0, -1.0, 0.0, 2.0, 4.0, 4.0, 2.0, 0.0, -1.0, -2.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Rock => "Rock",
            Self::Pop => "Pop",
            Self::Jazz => "Jazz",
            Self::Classical => "Classical",
            Self::BassBoost => "Bass Boost",
            Self::VocalBoost => "Vocal Boost",
            Self::Custom => "Custom",
        }
    }
}

/// Filter shape a band uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BandShape {
    LowShelf,
    Peaking,
    HighShelf,
}

/// One biquad band with stereo state
#[derive(Debug, Clone)]
struct Band {
    shape: BandShape,
    frequency: f32,
    gain_db: f32,

    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1_l: f32,
    x2_l: f32,
    y1_l: f32,
    y2_l: f32,
    x1_r: f32,
    x2_r: f32,
    y1_r: f32,
    y2_r: f32,
}

impl Band {
    fn new(shape: BandShape, frequency: f32) -> Self {
        Self {
            shape,
            frequency,
            gain_db: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1_l: 0.0,
            x2_l: 0.0,
            y1_l: 0.0,
            y2_l: 0.0,
            x1_r: 0.0,
            x2_r: 0.0,
            y1_r: 0.0,
            y2_r: 0.0,
        }
    }

    fn set_gain(&mut self, gain_db: f32) {
        self.gain_db = gain_db.clamp(-12.0, 12.0);
    }

    fn update_coefficients(&mut self, sample_rate: f32) {
        if sample_rate < 1.0 {
            return;
        }

        // Near-zero gain: identity, skip the math
        if self.gain_db.abs() < 0.01 {
            self.b0 = 1.0;
            self.b1 = 0.0;
            self.b2 = 0.0;
            self.a1 = 0.0;
            self.a2 = 0.0;
            return;
        }

        let a = 10.0_f32.powf(self.gain_db / 40.0);
        // Clamp frequency below Nyquist to keep the filter stable
        let freq = self.frequency.min(sample_rate * 0.45);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();

        let (b0, b1, b2, a0, a1, a2) = match self.shape {
            BandShape::Peaking => {
                let alpha = sin_omega / (2.0 * PEAKING_Q);
                (
                    1.0 + alpha * a,
                    -2.0 * cos_omega,
                    1.0 - alpha * a,
                    1.0 + alpha / a,
                    -2.0 * cos_omega,
                    1.0 - alpha / a,
                )
            }
            BandShape::LowShelf => {
                // Shelf slope S = 1
                let alpha = sin_omega / 2.0 * std::f32::consts::SQRT_2;
                let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha),
                    2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega),
                    a * ((a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha),
                    (a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha,
                    -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega),
                    (a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha,
                )
            }
            BandShape::HighShelf => {
                let alpha = sin_omega / 2.0 * std::f32::consts::SQRT_2;
                let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega),
                    a * ((a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha),
                    (a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha,
                    2.0 * ((a - 1.0) - (a + 1.0) * cos_omega),
                    (a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha,
                )
            }
        };

        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }

    #[inline]
    fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut out_l = self.b0 * left + self.b1 * self.x1_l + self.b2 * self.x2_l
            - self.a1 * self.y1_l
            - self.a2 * self.y2_l;

        // Flush denormals
        if out_l.abs() < 1e-15 {
            out_l = 0.0;
        }

        self.x2_l = self.x1_l;
        self.x1_l = left;
        self.y2_l = self.y1_l;
        self.y1_l = out_l;

        let mut out_r = self.b0 * right + self.b1 * self.x1_r + self.b2 * self.x2_r
            - self.a1 * self.y1_r
            - self.a2 * self.y2_r;

        if out_r.abs() < 1e-15 {
            out_r = 0.0;
        }

        self.x2_r = self.x1_r;
        self.x1_r = right;
        self.y2_r = self.y1_r;
        self.y1_r = out_r;

        (out_l, out_r)
    }

    fn reset(&mut self) {
        self.x1_l = 0.0;
        self.x2_l = 0.0;
        self.y1_l = 0.0;
        self.y2_l = 0.0;
        self.x1_r = 0.0;
        self.x2_r = 0.0;
        self.y1_r = 0.0;
        self.y2_r = 0.0;
    }
}

/// 10-band equalizer over interleaved stereo samples
pub struct Equalizer {
    bands: Vec<Band>,
    preset: EqualizerPreset,
    sample_rate: u32,
    needs_update: bool,
}

impl Equalizer {
    pub fn new() -> Self {
        let bands = EQ_BAND_FREQUENCIES
            .iter()
            .enumerate()
            .map(|(i, &freq)| {
                let shape = match i {
                    0 => BandShape::LowShelf,
                    9 => BandShape::HighShelf,
                    _ => BandShape::Peaking,
                };
                Band::new(shape, freq)
            })
            .collect();

        Self {
            bands,
            preset: EqualizerPreset::Default,
            sample_rate: 44100,
            needs_update: true,
        }
    }

    /// Set a single band gain; marks the preset as custom
    pub fn set_band_gain(&mut self, index: usize, gain_db: f32) {
        if let Some(band) = self.bands.get_mut(index) {
            band.set_gain(gain_db);
            // Reset filter state on parameter change to prevent clicks
            band.reset();
            self.preset = EqualizerPreset::Custom;
            self.needs_update = true;
        }
    }

    /// Set all band gains at once; marks the preset as custom
    pub fn set_gains(&mut self, gains: [f32; 10]) {
        for (band, &gain) in self.bands.iter_mut().zip(gains.iter()) {
            band.set_gain(gain);
            band.reset();
        }
        self.preset = EqualizerPreset::Custom;
        self.needs_update = true;
    }

    pub fn gains(&self) -> [f32; 10] {
        let mut gains = [0.0; 10];
        for (slot, band) in gains.iter_mut().zip(self.bands.iter()) {
            *slot = band.gain_db;
        }
        gains
    }

    pub fn band_gain(&self, index: usize) -> Option<f32> {
        self.bands.get(index).map(|b| b.gain_db)
    }

    /// Aggregated bass-boost control: drives the two lowest bands together
    pub fn set_bass_boost(&mut self, gain_db: f32) {
        for band in &mut self.bands[..2] {
            band.set_gain(gain_db);
            band.reset();
        }
        self.preset = EqualizerPreset::Custom;
        self.needs_update = true;
    }

    /// Apply a named preset
    pub fn set_preset(&mut self, preset: EqualizerPreset) {
        let gains = preset.gains();
        for (band, &gain) in self.bands.iter_mut().zip(gains.iter()) {
            band.set_gain(gain);
            band.reset();
        }
        self.preset = preset;
        self.needs_update = true;
    }

    pub fn preset(&self) -> EqualizerPreset {
        self.preset
    }

    /// Clear filter state on all bands
    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }

    /// Process an interleaved stereo buffer in place
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if self.sample_rate != sample_rate {
            self.sample_rate = sample_rate;
            self.reset();
            self.needs_update = true;
        }

        if self.needs_update {
            let sr = self.sample_rate as f32;
            for band in &mut self.bands {
                band.update_coefficients(sr);
            }
            self.needs_update = false;
        }

        for chunk in buffer.chunks_exact_mut(2) {
            let mut left = chunk[0];
            let mut right = chunk[1];
            for band in &mut self.bands {
                (left, right) = band.process(left, right);
            }
            chunk[0] = left;
            chunk[1] = right;
        }
    }
}

impl Default for Equalizer {
    fn default() -> Self {
        Self::new()
    }
}
