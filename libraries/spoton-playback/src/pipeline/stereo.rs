//! Stereo stage: balance and mono downmix
//!
//! Balance attenuates the opposite channel rather than amplifying, so it
//! never clips. Mono collapses both channels to their average before
//! balance applies. Gains are smoothed per sample to avoid zipper noise
//! when the slider moves.

/// Per-sample smoothing coefficient for gain changes
const SMOOTHING: f32 = 0.001;

/// Balance and mono processing over interleaved stereo samples
#[derive(Debug, Clone)]
pub struct StereoStage {
    /// Balance, -1.0 (full left) to 1.0 (full right)
    balance: f32,

    /// Mono downmix enabled
    mono: bool,

    // Smoothed channel gains
    current_left: f32,
    current_right: f32,
}

impl StereoStage {
    pub fn new() -> Self {
        Self {
            balance: 0.0,
            mono: false,
            current_left: 1.0,
            current_right: 1.0,
        }
    }

    pub fn set_balance(&mut self, balance: f32) {
        self.balance = balance.clamp(-1.0, 1.0);
    }

    pub fn balance(&self) -> f32 {
        self.balance
    }

    pub fn set_mono(&mut self, mono: bool) {
        self.mono = mono;
    }

    pub fn is_mono(&self) -> bool {
        self.mono
    }

    fn target_gains(&self) -> (f32, f32) {
        if self.balance > 0.0 {
            (1.0 - self.balance, 1.0)
        } else {
            (1.0, 1.0 + self.balance)
        }
    }

    /// Process an interleaved stereo buffer in place
    pub fn process(&mut self, buffer: &mut [f32]) {
        let (target_left, target_right) = self.target_gains();

        let needs_balance = (self.current_left - target_left).abs() > 1e-6
            || (self.current_right - target_right).abs() > 1e-6
            || (target_left - 1.0).abs() > 1e-6
            || (target_right - 1.0).abs() > 1e-6;

        if !self.mono && !needs_balance {
            return;
        }

        for chunk in buffer.chunks_exact_mut(2) {
            let (mut left, mut right) = (chunk[0], chunk[1]);

            if self.mono {
                let mid = (left + right) * 0.5;
                left = mid;
                right = mid;
            }

            self.current_left += (target_left - self.current_left) * SMOOTHING;
            self.current_right += (target_right - self.current_right) * SMOOTHING;

            chunk[0] = left * self.current_left;
            chunk[1] = right * self.current_right;
        }
    }
}

impl Default for StereoStage {
    fn default() -> Self {
        Self::new()
    }
}
