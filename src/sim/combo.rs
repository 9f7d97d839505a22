//! Consecutive-correct streak tracking

use serde::{Deserialize, Serialize};

use crate::consts::WARP_THRESHOLD;

/// Streak counter; warp speed is derived, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    combo: u32,
    max_combo: u32,
    warp_threshold: u32,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(WARP_THRESHOLD)
    }
}

impl ComboTracker {
    pub fn new(warp_threshold: u32) -> Self {
        Self {
            combo: 0,
            max_combo: 0,
            warp_threshold,
        }
    }

    pub fn register_correct(&mut self) {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
    }

    pub fn register_wrong(&mut self) {
        self.combo = 0;
    }

    /// Clear the streak; the session best survives
    pub fn reset(&mut self) {
        self.combo = 0;
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn is_warp_speed(&self) -> bool {
        self.combo >= self.warp_threshold
    }
}
