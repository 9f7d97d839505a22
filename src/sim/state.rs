//! Game session state
//!
//! One `GameSession` lives from the title screen until the player navigates
//! away. Only `step` mutates it; rendering reads `Snapshot`s.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combo::ComboTracker;
use crate::missions::{MissionEngine, MissionType, Question};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Waiting for start
    Title,
    /// Mission banner showing
    MissionIntro,
    /// Waiting for an answer
    Playing,
    /// Correct answer celebration
    Celebrating,
    /// Gentle wrong-answer feedback; same question follows
    WrongFeedback,
    /// Level cleared
    LevelComplete,
    /// Galaxy map between levels
    ProgressMap,
}

/// Companion robot mood (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoboEmotion {
    #[default]
    Idle,
    Excited,
    Cheering,
    Confused,
    Sleeping,
}

/// Complete mutable session state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) settings: Settings,
    pub(crate) engine: MissionEngine,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,

    pub(crate) phase: GamePhase,
    pub(crate) level: u32,
    pub(crate) score: u64,
    /// Correct answers this level
    pub(crate) progress: u32,
    /// Global question counter, never reset; drives mission rotation
    pub(crate) question_index: u32,
    pub(crate) combo: ComboTracker,
    pub(crate) question: Option<Question>,

    pub(crate) robo_emotion: RoboEmotion,
    pub(crate) robo_message: Option<String>,
    /// Orb that was dropped wrongly, shown until feedback ends
    pub(crate) wrong_choice: Option<usize>,
    /// Warp visual running between LEVEL_COMPLETE and PROGRESS_MAP
    pub(crate) warping: bool,
}

impl GameSession {
    /// Create a session on the title screen
    pub fn new(seed: u64, settings: Settings) -> Self {
        let engine = settings.mission_engine();
        let combo = ComboTracker::new(settings.warp_threshold);
        Self {
            settings,
            engine,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            level: 1,
            score: 0,
            progress: 0,
            question_index: 0,
            combo,
            question: None,
            robo_emotion: RoboEmotion::Idle,
            robo_message: None,
            wrong_choice: None,
            warping: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &MissionEngine {
        &self.engine
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn robo_emotion(&self) -> RoboEmotion {
        self.robo_emotion
    }

    pub fn robo_message(&self) -> Option<&str> {
        self.robo_message.as_deref()
    }

    pub fn wrong_choice(&self) -> Option<usize> {
        self.wrong_choice
    }

    pub fn is_warping(&self) -> bool {
        self.warping
    }

    /// Mission for the question currently on screen
    pub fn current_mission(&self) -> Option<MissionType> {
        self.question.as_ref().map(Question::mission_type)
    }

    /// Swap in a specific question without touching progress (tooling, tests)
    pub fn replace_question(&mut self, question: Question) {
        self.wrong_choice = None;
        self.question = Some(question);
    }

    /// Render-facing copy of the state
    pub fn snapshot(&self, is_idle: bool) -> Snapshot {
        let is_idle = is_idle && self.phase == GamePhase::Playing;
        let hinted_choice = if is_idle {
            self.question.as_ref().and_then(Question::correct_index)
        } else {
            None
        };
        Snapshot {
            phase: self.phase,
            level: self.level,
            score: self.score,
            progress: self.progress,
            questions_per_level: self.settings.questions_per_level,
            question_index: self.question_index,
            combo: self.combo.combo(),
            max_combo: self.combo.max_combo(),
            is_warp_speed: self.combo.is_warp_speed(),
            is_idle,
            hinted_choice,
            wrong_choice: self.wrong_choice,
            mission_banner: if self.phase == GamePhase::MissionIntro {
                self.current_mission()
            } else {
                None
            },
            warping: self.warping,
            robo_emotion: self.robo_emotion,
            robo_message: self.robo_message.clone(),
            question: self.question.clone(),
        }
    }
}

/// Everything the rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub progress: u32,
    pub questions_per_level: u32,
    pub question_index: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub is_warp_speed: bool,
    pub is_idle: bool,
    /// Orb to wiggle while the player is idle
    pub hinted_choice: Option<usize>,
    pub wrong_choice: Option<usize>,
    pub mission_banner: Option<MissionType>,
    pub warping: bool,
    pub robo_emotion: RoboEmotion,
    pub robo_message: Option<String>,
    pub question: Option<Question>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
