//! Question data model shared by every mission generator
//!
//! A `Question` is produced fresh by a generator and owned by the session
//! until replaced. Rendering only reads it.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::MissionType;

/// Accent colors for answer orbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbColor {
    Cyan,
    Magenta,
    Lime,
    Amber,
    Rose,
}

impl OrbColor {
    pub const ALL: [OrbColor; 5] = [
        OrbColor::Cyan,
        OrbColor::Magenta,
        OrbColor::Lime,
        OrbColor::Amber,
        OrbColor::Rose,
    ];
}

/// Countable space objects used by SCAN_DATA charts.
///
/// Serialized as the glyph, the same token an icon orb submits on drop.
/// The lowercase names are still read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceIcon {
    #[serde(rename = "⭐", alias = "star")]
    Star,
    #[serde(rename = "🌙", alias = "moon")]
    Moon,
    #[serde(rename = "🪐", alias = "planet")]
    Planet,
    #[serde(rename = "☄️", alias = "comet")]
    Comet,
    #[serde(rename = "🚀", alias = "rocket")]
    Rocket,
}

impl SpaceIcon {
    pub const ALL: [SpaceIcon; 5] = [
        SpaceIcon::Star,
        SpaceIcon::Moon,
        SpaceIcon::Planet,
        SpaceIcon::Comet,
        SpaceIcon::Rocket,
    ];

    /// Emoji shown on the chart and on icon orbs
    pub fn glyph(&self) -> &'static str {
        match self {
            SpaceIcon::Star => "⭐",
            SpaceIcon::Moon => "🌙",
            SpaceIcon::Planet => "🪐",
            SpaceIcon::Comet => "☄️",
            SpaceIcon::Rocket => "🚀",
        }
    }

    pub fn color(&self) -> OrbColor {
        match self {
            SpaceIcon::Star => OrbColor::Cyan,
            SpaceIcon::Moon => OrbColor::Magenta,
            SpaceIcon::Planet => OrbColor::Lime,
            SpaceIcon::Comet => OrbColor::Amber,
            SpaceIcon::Rocket => OrbColor::Rose,
        }
    }

    /// Axis label under the icon's bar
    pub fn label(&self) -> &'static str {
        match self {
            SpaceIcon::Star => "Stars",
            SpaceIcon::Moon => "Moons",
            SpaceIcon::Planet => "Planets",
            SpaceIcon::Comet => "Comets",
            SpaceIcon::Rocket => "Rockets",
        }
    }
}

/// Arithmetic operator for FUEL_ENGINE equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Apply the operator. Callers construct operands so the result is a
    /// non-negative integer; `None` signals operands that break that rule.
    pub fn apply(&self, lhs: u32, rhs: u32) -> Option<u32> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => {
                if rhs == 0 || lhs % rhs != 0 {
                    None
                } else {
                    Some(lhs / rhs)
                }
            }
        }
    }
}

/// Comparison symbol for BALANCE_CARGO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "=")]
    Equal,
}

impl Comparison {
    pub const ALL: [Comparison; 3] = [Comparison::Less, Comparison::Greater, Comparison::Equal];

    pub fn of(lhs: u32, rhs: u32) -> Self {
        match lhs.cmp(&rhs) {
            std::cmp::Ordering::Greater => Comparison::Greater,
            std::cmp::Ordering::Less => Comparison::Less,
            std::cmp::Ordering::Equal => Comparison::Equal,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::Greater => ">",
            Comparison::Equal => "=",
        }
    }
}

/// Value carried by an answer orb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Number(u32),
    Symbol(Comparison),
    Icon(SpaceIcon),
}

/// Display form is what the orb shows and what a drop submits, so numeric
/// and symbolic answers compare uniformly as strings.
impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceValue::Number(n) => write!(f, "{n}"),
            ChoiceValue::Symbol(c) => f.write_str(c.symbol()),
            ChoiceValue::Icon(i) => f.write_str(i.glyph()),
        }
    }
}

/// A single draggable answer orb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: ChoiceValue,
    pub color: OrbColor,
    pub is_correct: bool,
}

/// Direction of a CRACK_CODE sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

/// SCAN_DATA question flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanSubtype {
    /// "How many ⭐?"
    Count,
    /// "Which has the most?" (icon answer)
    Most,
    /// "Which has the least?" (icon answer)
    Least,
    /// "How many objects in total?"
    Total,
    /// "⭐ has ___ more than 🌙"
    CompareBars,
    /// Build the bars to match the counted objects
    BuildChart,
}

/// Rendering hint only; answers never depend on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    Bar,
    Pictograph,
    DotPlot,
    PieChart,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Bar,
        ChartType::Pictograph,
        ChartType::DotPlot,
        ChartType::PieChart,
    ];
}

/// One category in a SCAN_DATA chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DataPoint {
    pub icon: SpaceIcon,
    pub count: u32,
}

/// Charts need the label and bar color next to the glyph, so those are
/// written out alongside the two stored fields.
impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut point = serializer.serialize_struct("DataPoint", 4)?;
        point.serialize_field("icon", &self.icon)?;
        point.serialize_field("label", self.icon.label())?;
        point.serialize_field("color", &self.icon.color())?;
        point.serialize_field("count", &self.count)?;
        point.end()
    }
}

/// SCAN_DATA specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanData {
    pub subtype: ScanSubtype,
    pub chart_type: ChartType,
    pub dataset: Vec<DataPoint>,
    pub question_text: String,
    pub target_icon: Option<SpaceIcon>,
    pub highlight_icon: Option<SpaceIcon>,
}

impl ScanData {
    pub fn counts(&self) -> Vec<u32> {
        self.dataset.iter().map(|d| d.count).collect()
    }
}

/// Mission-specific layout of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    FuelEngine {
        num1: u32,
        num2: u32,
        operator: Operator,
        /// Counting dots are drawn for beginners
        show_dots: bool,
    },
    CrackCode {
        sequence: [u32; 4],
        missing_index: usize,
        step: u32,
        direction: Direction,
    },
    BalanceCargo {
        num1: u32,
        num2: u32,
    },
    ScanData(ScanData),
}

/// A generated question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub answer: ChoiceValue,
    pub answer_color: OrbColor,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn mission_type(&self) -> MissionType {
        match self.kind {
            QuestionKind::FuelEngine { .. } => MissionType::FuelEngine,
            QuestionKind::CrackCode { .. } => MissionType::CrackCode,
            QuestionKind::BalanceCargo { .. } => MissionType::BalanceCargo,
            QuestionKind::ScanData(_) => MissionType::ScanData,
        }
    }

    pub fn scan_data(&self) -> Option<&ScanData> {
        match &self.kind {
            QuestionKind::ScanData(data) => Some(data),
            _ => None,
        }
    }

    /// Orbs show icons instead of numbers
    pub fn is_icon_choice(&self) -> bool {
        self.scan_data()
            .is_some_and(|d| matches!(d.subtype, ScanSubtype::Most | ScanSubtype::Least))
    }

    /// Orbs are replaced by the interactive bar chart
    pub fn is_build_chart(&self) -> bool {
        self.scan_data()
            .is_some_and(|d| d.subtype == ScanSubtype::BuildChart)
    }

    /// Index of the correct orb
    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| c.is_correct)
    }

    /// Index of the orb whose displayed value matches `submitted`
    pub fn choice_index(&self, submitted: &str) -> Option<usize> {
        self.choices
            .iter()
            .position(|c| c.value.to_string() == submitted)
    }

    /// Standard orb answers compare by display string
    pub fn accepts(&self, submitted: &str) -> bool {
        self.answer.to_string() == submitted
    }

    /// Chart answers must match every target count exactly
    pub fn accepts_chart(&self, heights: &[u32]) -> bool {
        self.scan_data().is_some_and(|data| {
            data.dataset.len() == heights.len()
                && data.dataset.iter().zip(heights).all(|(d, h)| d.count == *h)
        })
    }
}
