//! SCAN_DATA: count space objects and read simple charts
//!
//! Subtypes unlock with level:
//! - L1: COUNT, TOTAL
//! - L2-3: + MOST, LEAST
//! - L4+: + COMPARE_BARS
//! - BUILD_CHART only when enabled through `ScanOptions`

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::distractors::{numeric_choices, random_int, wrong_answers};
use super::question::{
    ChartType, Choice, ChoiceValue, DataPoint, OrbColor, Question, QuestionKind, ScanData,
    ScanSubtype, SpaceIcon,
};
use crate::consts::CHOICE_COUNT;

/// Highest count any category can reach before tie-breaking
pub const MAX_CATEGORY_COUNT: u32 = 6;

/// Level gating for optional subtypes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// First level that may ask the player to build the chart
    pub build_chart_from_level: Option<u32>,
}

/// Generate a chart question for `level` (1-based) with default gating
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Question {
    generate_with(level, &ScanOptions::default(), rng)
}

/// Generate a chart question for `level` with explicit subtype gating
pub fn generate_with<R: Rng + ?Sized>(level: u32, options: &ScanOptions, rng: &mut R) -> Question {
    let icon_count = match level {
        0 | 1 => 2,
        2 | 3 => 3,
        _ => 4,
    };
    let mut icons = SpaceIcon::ALL.to_vec();
    icons.shuffle(rng);
    icons.truncate(icon_count);

    let max_count = (2 + level).min(MAX_CATEGORY_COUNT);
    let mut dataset: Vec<DataPoint> = icons
        .into_iter()
        .map(|icon| DataPoint {
            icon,
            count: random_int(rng, 1, max_count),
        })
        .collect();
    separate_ties(&mut dataset);

    let pool = subtype_pool(level, options);
    let subtype = *pool.choose(rng).unwrap_or(&ScanSubtype::Count);
    let chart_type = if subtype == ScanSubtype::BuildChart {
        ChartType::Bar
    } else {
        *ChartType::ALL.choose(rng).unwrap_or(&ChartType::Bar)
    };

    from_dataset(dataset, subtype, chart_type, rng)
}

/// Subtypes available at `level`
pub fn subtype_pool(level: u32, options: &ScanOptions) -> Vec<ScanSubtype> {
    let mut pool = match level {
        0 | 1 => vec![ScanSubtype::Count, ScanSubtype::Total],
        2 | 3 => vec![
            ScanSubtype::Count,
            ScanSubtype::Most,
            ScanSubtype::Least,
            ScanSubtype::Total,
        ],
        _ => vec![
            ScanSubtype::Count,
            ScanSubtype::Most,
            ScanSubtype::Least,
            ScanSubtype::Total,
            ScanSubtype::CompareBars,
        ],
    };
    if options.build_chart_from_level.is_some_and(|from| level >= from) {
        pool.push(ScanSubtype::BuildChart);
    }
    pool
}

/// Make every count distinct so MOST/LEAST have a single answer.
///
/// Tied datasets get each count bumped up by its index; any collision that
/// survives keeps moving up one at a time.
pub fn separate_ties(dataset: &mut [DataPoint]) {
    if counts_distinct(dataset) {
        return;
    }
    for (i, point) in dataset.iter_mut().enumerate() {
        point.count = (point.count + i as u32).max(1);
    }
    let mut taken: Vec<u32> = Vec::with_capacity(dataset.len());
    for point in dataset.iter_mut() {
        while taken.contains(&point.count) {
            point.count += 1;
        }
        taken.push(point.count);
    }
}

fn counts_distinct(dataset: &[DataPoint]) -> bool {
    dataset
        .iter()
        .enumerate()
        .all(|(i, a)| dataset[i + 1..].iter().all(|b| a.count != b.count))
}

/// Build a question of `subtype` over a fixed dataset.
///
/// An empty dataset is given a single star so every subtype stays answerable.
pub fn from_dataset<R: Rng + ?Sized>(
    mut dataset: Vec<DataPoint>,
    subtype: ScanSubtype,
    chart_type: ChartType,
    rng: &mut R,
) -> Question {
    if dataset.is_empty() {
        dataset.push(DataPoint {
            icon: SpaceIcon::Star,
            count: 1,
        });
    }
    let subtype = if subtype == ScanSubtype::CompareBars && dataset.len() < 2 {
        ScanSubtype::Count
    } else {
        subtype
    };

    let (answer, answer_color, choices, question_text, target_icon, highlight_icon) =
        match subtype {
            ScanSubtype::Count => {
                let point = dataset[random_int(rng, 0, dataset.len() as u32 - 1) as usize];
                let color = point.icon.color();
                let wrongs = wrong_answers(rng, point.count, CHOICE_COUNT - 1, 2);
                (
                    ChoiceValue::Number(point.count),
                    color,
                    numeric_choices(rng, point.count, color, &wrongs),
                    format!("How many {} ?", point.icon.glyph()),
                    Some(point.icon),
                    Some(point.icon),
                )
            }
            ScanSubtype::Most | ScanSubtype::Least => {
                let extreme = if subtype == ScanSubtype::Most {
                    dataset.iter().max_by_key(|d| d.count)
                } else {
                    dataset.iter().min_by_key(|d| d.count)
                };
                let icon = extreme.map(|d| d.icon).unwrap_or(SpaceIcon::Star);
                let text = if subtype == ScanSubtype::Most {
                    "Which has the MOST?"
                } else {
                    "Which has the LEAST?"
                };
                (
                    ChoiceValue::Icon(icon),
                    icon.color(),
                    icon_choices(&dataset, icon, rng),
                    text.to_string(),
                    Some(icon),
                    None,
                )
            }
            ScanSubtype::Total | ScanSubtype::BuildChart => {
                let total: u32 = dataset.iter().map(|d| d.count).sum();
                let wrongs = wrong_answers(rng, total, CHOICE_COUNT - 1, 3);
                let text = if subtype == ScanSubtype::Total {
                    "How many objects in TOTAL?"
                } else {
                    "Build the chart to match the objects!"
                };
                (
                    ChoiceValue::Number(total),
                    OrbColor::Cyan,
                    numeric_choices(rng, total, OrbColor::Cyan, &wrongs),
                    text.to_string(),
                    None,
                    None,
                )
            }
            ScanSubtype::CompareBars => {
                let mut indices: Vec<usize> = (0..dataset.len()).collect();
                indices.shuffle(rng);
                let (a, b) = (dataset[indices[0]], dataset[indices[1]]);
                let (bigger, smaller) = if a.count >= b.count { (a, b) } else { (b, a) };
                let diff = bigger.count - smaller.count;
                let color = bigger.icon.color();
                let wrongs = wrong_answers(rng, diff, CHOICE_COUNT - 1, 2);
                (
                    ChoiceValue::Number(diff),
                    color,
                    numeric_choices(rng, diff, color, &wrongs),
                    format!(
                        "{} has ___ more than {}",
                        bigger.icon.glyph(),
                        smaller.icon.glyph()
                    ),
                    Some(bigger.icon),
                    Some(bigger.icon),
                )
            }
        };

    log::debug!(
        "Scan data {:?} over {:?}: answer {}",
        subtype,
        dataset.iter().map(|d| d.count).collect::<Vec<_>>(),
        answer
    );

    Question {
        kind: QuestionKind::ScanData(ScanData {
            subtype,
            chart_type,
            dataset,
            question_text,
            target_icon,
            highlight_icon,
        }),
        answer,
        answer_color,
        choices,
    }
}

/// Icon orbs: the answer plus other categories, topped up with icons not
/// on the chart when the dataset is too small to fill every orb.
/// A category listed twice still yields a single orb.
fn icon_choices<R: Rng + ?Sized>(
    dataset: &[DataPoint],
    answer: SpaceIcon,
    rng: &mut R,
) -> Vec<Choice> {
    let mut others: Vec<SpaceIcon> = Vec::with_capacity(SpaceIcon::ALL.len());
    for icon in dataset.iter().map(|d| d.icon) {
        if icon != answer && !others.contains(&icon) {
            others.push(icon);
        }
    }
    others.shuffle(rng);
    let mut spare: Vec<SpaceIcon> = SpaceIcon::ALL
        .iter()
        .copied()
        .filter(|icon| *icon != answer && !others.contains(icon))
        .collect();
    spare.shuffle(rng);
    others.extend(spare);
    others.truncate(CHOICE_COUNT - 1);

    let mut choices: Vec<Choice> = std::iter::once(answer)
        .chain(others)
        .map(|icon| Choice {
            value: ChoiceValue::Icon(icon),
            color: icon.color(),
            is_correct: icon == answer,
        })
        .collect();
    choices.shuffle(rng);
    choices
}
