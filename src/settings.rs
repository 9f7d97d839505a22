//! Game settings and tuning
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::missions::{MissionEngine, MissionType, ScanOptions};

/// Settings could not be loaded or are unusable
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Delays for every timed transition (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// CELEBRATING -> next question
    pub celebration_ms: u64,
    /// Extra celebration after a built chart
    pub chart_celebration_bonus_ms: u64,
    /// WRONG_FEEDBACK -> PLAYING
    pub wrong_feedback_ms: u64,
    /// MISSION_INTRO -> PLAYING
    pub mission_banner_ms: u64,
    /// Inactivity before the hint fires
    pub idle_timeout_ms: u64,
    /// Warp visual between LEVEL_COMPLETE and PROGRESS_MAP
    pub level_transition_ms: u64,
    /// Delay between the success and combo sounds
    pub combo_chime_delay_ms: u64,
    /// How long a companion message stays up
    pub message_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            celebration_ms: CELEBRATION_MS,
            chart_celebration_bonus_ms: CHART_CELEBRATION_BONUS_MS,
            wrong_feedback_ms: WRONG_FEEDBACK_MS,
            mission_banner_ms: MISSION_BANNER_MS,
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            level_transition_ms: LEVEL_TRANSITION_MS,
            combo_chime_delay_ms: COMBO_CHIME_DELAY_MS,
            message_ms: MESSAGE_MS,
        }
    }
}

impl Timing {
    /// All delays zero; handy for driving a session step by step
    pub fn instant() -> Self {
        Self {
            celebration_ms: 0,
            chart_celebration_bonus_ms: 0,
            wrong_feedback_ms: 0,
            mission_banner_ms: 0,
            idle_timeout_ms: 0,
            level_transition_ms: 0,
            combo_chime_delay_ms: 0,
            message_ms: 0,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Progression ===
    /// Correct answers to clear a level
    pub questions_per_level: u32,
    /// Consecutive questions per mission before rotating
    pub questions_per_mission: u32,
    /// Mission cycle
    pub mission_rotation: Vec<MissionType>,
    /// First level offering the chart-building interaction (None = never)
    pub build_chart_from_level: Option<u32>,

    // === Scoring ===
    /// Points per level for an orb answer
    pub points_per_correct: u32,
    /// Points per level for a built chart
    pub points_per_chart: u32,
    /// Combo needed for warp speed
    pub warp_threshold: u32,

    // === Timing ===
    pub timing: Timing,

    // === Audio ===
    pub sound_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            questions_per_level: QUESTIONS_PER_LEVEL,
            questions_per_mission: QUESTIONS_PER_MISSION,
            mission_rotation: MissionType::ALL.to_vec(),
            build_chart_from_level: None,

            points_per_correct: POINTS_PER_CORRECT,
            points_per_chart: POINTS_PER_CHART,
            warp_threshold: WARP_THRESHOLD,

            timing: Timing::default(),

            sound_enabled: true,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings JSON from disk
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the state machine cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.mission_rotation.is_empty() {
            return Err(SettingsError::Invalid(
                "mission_rotation must list at least one mission".into(),
            ));
        }
        if self.questions_per_level == 0 {
            return Err(SettingsError::Invalid(
                "questions_per_level must be at least 1".into(),
            ));
        }
        if self.questions_per_mission == 0 {
            return Err(SettingsError::Invalid(
                "questions_per_mission must be at least 1".into(),
            ));
        }
        if self.warp_threshold == 0 {
            return Err(SettingsError::Invalid(
                "warp_threshold must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(SettingsError::Invalid(format!(
                "sfx_volume {} outside 0.0 - 1.0",
                self.sfx_volume
            )));
        }
        Ok(())
    }

    /// Mission engine configured from these settings
    pub fn mission_engine(&self) -> MissionEngine {
        MissionEngine::new(self.mission_rotation.clone(), self.questions_per_mission)
            .with_scan_options(ScanOptions {
                build_chart_from_level: self.build_chart_from_level,
            })
    }

    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.sfx_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
