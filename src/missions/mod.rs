//! Mission types, rotation policy and question generation
//!
//! Generators are pure apart from the RNG they are handed. Every generator
//! must return a valid question for any `level >= 1`:
//! - no negative numbers anywhere
//! - exactly one correct choice, matching `answer`
//! - pairwise distinct choice values

pub mod balance_cargo;
pub mod crack_code;
pub mod distractors;
pub mod fuel_engine;
pub mod question;
pub mod scan_data;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use question::{
    ChartType, Choice, ChoiceValue, Comparison, DataPoint, Direction, Operator, OrbColor,
    Question, QuestionKind, ScanData, ScanSubtype, SpaceIcon,
};
pub use scan_data::ScanOptions;

use crate::consts::QUESTIONS_PER_MISSION;

/// The four question categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    /// Solve an equation
    FuelEngine,
    /// Complete a sequence
    CrackCode,
    /// Compare two numbers
    BalanceCargo,
    /// Read a chart
    ScanData,
}

/// Banner text and styling for a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionMeta {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub color: OrbColor,
}

impl MissionType {
    pub const ALL: [MissionType; 4] = [
        MissionType::FuelEngine,
        MissionType::CrackCode,
        MissionType::BalanceCargo,
        MissionType::ScanData,
    ];

    pub fn meta(&self) -> MissionMeta {
        match self {
            MissionType::FuelEngine => MissionMeta {
                title: "Fuel the Engine",
                icon: "⚡",
                description: "Solve the equation to fuel up!",
                color: OrbColor::Cyan,
            },
            MissionType::CrackCode => MissionMeta {
                title: "Crack the Code",
                icon: "🔐",
                description: "Find the missing number!",
                color: OrbColor::Magenta,
            },
            MissionType::BalanceCargo => MissionMeta {
                title: "Balance the Cargo",
                icon: "⚖️",
                description: "Compare the numbers!",
                color: OrbColor::Lime,
            },
            MissionType::ScanData => MissionMeta {
                title: "Scan Data",
                icon: "📊",
                description: "Analyze the chart data!",
                color: OrbColor::Amber,
            },
        }
    }
}

/// Generate a question of `mission` for `level`
pub fn generate_question<R: Rng + ?Sized>(
    mission: MissionType,
    level: u32,
    options: &ScanOptions,
    rng: &mut R,
) -> Question {
    match mission {
        MissionType::FuelEngine => fuel_engine::generate(level, rng),
        MissionType::CrackCode => crack_code::generate(level, rng),
        MissionType::BalanceCargo => balance_cargo::generate(level, rng),
        MissionType::ScanData => scan_data::generate_with(level, options, rng),
    }
}

/// Rotation policy plus generator dispatch.
///
/// The mission holds for `questions_per_mission` consecutive question
/// indices, then advances cyclically through `rotation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionEngine {
    rotation: Vec<MissionType>,
    questions_per_mission: u32,
    scan_options: ScanOptions,
}

impl Default for MissionEngine {
    fn default() -> Self {
        Self::new(MissionType::ALL.to_vec(), QUESTIONS_PER_MISSION)
    }
}

impl MissionEngine {
    /// Create an engine. An empty rotation falls back to FUEL_ENGINE only and
    /// a zero hold length is treated as one.
    pub fn new(rotation: Vec<MissionType>, questions_per_mission: u32) -> Self {
        let rotation = if rotation.is_empty() {
            log::warn!("Empty mission rotation, falling back to FUEL_ENGINE");
            vec![MissionType::FuelEngine]
        } else {
            rotation
        };
        Self {
            rotation,
            questions_per_mission: questions_per_mission.max(1),
            scan_options: ScanOptions::default(),
        }
    }

    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    pub fn rotation(&self) -> &[MissionType] {
        &self.rotation
    }

    /// `rotation[(question_index / questions_per_mission) % len]`
    pub fn mission_type_for(&self, question_index: u32) -> MissionType {
        let cycle = (question_index / self.questions_per_mission) as usize % self.rotation.len();
        self.rotation[cycle]
    }

    /// Generate a question for an explicit mission
    pub fn generate<R: Rng + ?Sized>(
        &self,
        mission: MissionType,
        level: u32,
        rng: &mut R,
    ) -> Question {
        generate_question(mission, level.max(1), &self.scan_options, rng)
    }

    /// Generate the question for a global question index
    pub fn question_for<R: Rng + ?Sized>(
        &self,
        question_index: u32,
        level: u32,
        rng: &mut R,
    ) -> Question {
        self.generate(self.mission_type_for(question_index), level, rng)
    }
}
