//! Nebula Number Navigator - arithmetic and data-literacy mission game
//!
//! Core modules:
//! - `missions`: Procedural question generation (seeded RNG only)
//! - `sim`: Game state machine, combo tracking, idle detection, timers
//! - `driver`: Executes state machine effects against a virtual clock
//! - `audio`: Sound event names and playback backends
//! - `settings`: Tunable timings, scoring and mission rotation

pub mod audio;
pub mod driver;
pub mod missions;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{LogSound, SoundEffect, SoundPlayer};
pub use driver::GameDriver;
pub use missions::{MissionEngine, MissionType, Question};
pub use settings::{Settings, SettingsError, Timing};
pub use sim::{GameEvent, GamePhase, GameSession, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Correct answers needed to clear a level
    pub const QUESTIONS_PER_LEVEL: u32 = 6;
    /// Consecutive questions that share a mission type
    pub const QUESTIONS_PER_MISSION: u32 = 3;

    /// Points per level for a correct orb answer
    pub const POINTS_PER_CORRECT: u32 = 10;
    /// Points per level for a correct chart build (bonus for the harder interaction)
    pub const POINTS_PER_CHART: u32 = 15;

    /// Combo needed for warp speed
    pub const WARP_THRESHOLD: u32 = 2;

    /// Timings (milliseconds)
    pub const CELEBRATION_MS: u64 = 1800;
    pub const CHART_CELEBRATION_BONUS_MS: u64 = 500;
    pub const WRONG_FEEDBACK_MS: u64 = 800;
    pub const MISSION_BANNER_MS: u64 = 1800;
    pub const IDLE_TIMEOUT_MS: u64 = 10_000;
    pub const LEVEL_TRANSITION_MS: u64 = 1500;
    pub const COMBO_CHIME_DELAY_MS: u64 = 300;
    pub const MESSAGE_MS: u64 = 2500;
    /// Blur message lingers longer so a returning child still sees it
    pub const BLUR_MESSAGE_MS: u64 = 4000;

    /// Answer choices per question
    pub const CHOICE_COUNT: usize = 3;
}
