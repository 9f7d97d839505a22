//! Sound effect hooks
//!
//! The game core only knows event names; playback lives behind
//! `SoundPlayer`. `LogSound` is the placeholder backend used until real
//! audio assets exist.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEffect {
    /// Button press (start, continue)
    Click,
    /// Orb picked up, mission banner
    Whoosh,
    /// Correct answer
    Success,
    /// Wrong answer
    Error,
    /// Leaving a cleared level
    Warp,
    /// Streak reached warp speed
    Combo,
    /// Level cleared
    LevelUp,
    /// Player went idle
    Hint,
}

impl SoundEffect {
    /// Event name as used by the browser layer
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Click => "click",
            SoundEffect::Whoosh => "whoosh",
            SoundEffect::Success => "success",
            SoundEffect::Error => "error",
            SoundEffect::Warp => "warp",
            SoundEffect::Combo => "combo",
            SoundEffect::LevelUp => "levelUp",
            SoundEffect::Hint => "hint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(SoundEffect::Click),
            "whoosh" => Some(SoundEffect::Whoosh),
            "success" => Some(SoundEffect::Success),
            "error" => Some(SoundEffect::Error),
            "warp" => Some(SoundEffect::Warp),
            "combo" => Some(SoundEffect::Combo),
            "levelUp" => Some(SoundEffect::LevelUp),
            "hint" => Some(SoundEffect::Hint),
            _ => None,
        }
    }

    /// Mix volume relative to the SFX channel
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Click => 0.5,
            SoundEffect::Whoosh => 0.6,
            SoundEffect::Success => 0.8,
            SoundEffect::Error => 0.4,
            SoundEffect::Warp => 0.7,
            SoundEffect::Combo => 0.9,
            SoundEffect::LevelUp => 0.8,
            SoundEffect::Hint => 0.3,
        }
    }
}

/// Audio backend
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

/// Records effects in order (tests, replays)
impl SoundPlayer for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Placeholder backend: logs each effect at its effective volume
#[derive(Debug, Clone)]
pub struct LogSound {
    sfx_volume: f32,
}

impl Default for LogSound {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LogSound {
    pub fn new(sfx_volume: f32) -> Self {
        Self {
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
        }
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        self.sfx_volume * effect.base_volume()
    }
}

impl SoundPlayer for LogSound {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        log::trace!("🔊 {} (vol: {:.2})", effect.name(), vol);
    }
}
