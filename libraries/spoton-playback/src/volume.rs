//! Volume control
//!
//! Volume range is 0-100%, mapped linearly onto the media element's 0.0-1.0
//! range. Loudness normalization caps the base level below unity so
//! hot-mastered tracks get headroom instead of clipping.

/// Base gain applied when loudness normalization is on
const NORMALIZED_BASE: f32 = 0.85;

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Whether loudness normalization caps the base gain
    normalized: bool,
}

impl Volume {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
            normalized: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_normalized(&mut self, normalized: bool) {
        self.normalized = normalized;
    }

    /// Base gain before the slider: normalization headroom or unity
    pub fn base(&self) -> f32 {
        if self.normalized {
            NORMALIZED_BASE
        } else {
            1.0
        }
    }

    /// Effective gain for the media element (0.0-1.0)
    ///
    /// Returns 0.0 if muted, otherwise slider level scaled by the
    /// normalization base.
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0 * self.base()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}
