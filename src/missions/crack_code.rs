//! CRACK_CODE: find the missing number in a 4-element arithmetic sequence

use rand::Rng;

use super::distractors::{numeric_choices, random_color, random_int, wrong_answers};
use super::question::{ChoiceValue, Direction, Question, QuestionKind};
use crate::consts::CHOICE_COUNT;

/// Sequence length shown to the player
pub const SEQUENCE_LEN: usize = 4;

/// Chance that a sequence counts up
const ASCENDING_CHANCE: f64 = 0.7;

/// Generate a sequence question for `level` (1-based)
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Question {
    let step = if level <= 2 {
        random_int(rng, 1, 3)
    } else {
        random_int(rng, 2, 5)
    };
    let direction = if rng.random_bool(ASCENDING_CHANCE) {
        Direction::Ascending
    } else {
        Direction::Descending
    };
    let start = match direction {
        Direction::Ascending => random_int(rng, 1, 10) as i64,
        Direction::Descending => random_int(rng, step * 4, step * 4 + 10) as i64,
    };

    let (sequence, step, direction) = match build_sequence(start, step, direction) {
        Some(sequence) => (sequence, step, direction),
        None => {
            let safe_start = random_int(rng, 1, 5);
            let safe_step = random_int(rng, 1, 3);
            log::debug!("Crack code fell back to safe ascending sequence");
            (
                ascending(safe_start, safe_step),
                safe_step,
                Direction::Ascending,
            )
        }
    };

    // Never the first or last slot: boundary answers are too easy to guess
    let missing_index = random_int(rng, 1, 2) as usize;
    from_sequence(sequence, missing_index, step, direction, rng)
}

/// Sequence from `start` moving by `step`, or `None` if any element is negative
fn build_sequence(start: i64, step: u32, direction: Direction) -> Option<[u32; SEQUENCE_LEN]> {
    let delta = match direction {
        Direction::Ascending => step as i64,
        Direction::Descending => -(step as i64),
    };
    let mut sequence = [0u32; SEQUENCE_LEN];
    for (i, slot) in sequence.iter_mut().enumerate() {
        let value = start + delta * i as i64;
        *slot = u32::try_from(value).ok()?;
    }
    Some(sequence)
}

fn ascending(start: u32, step: u32) -> [u32; SEQUENCE_LEN] {
    std::array::from_fn(|i| start + step * i as u32)
}

/// Build a question around a fixed sequence.
///
/// `missing_index` is clamped into the interior slots.
pub fn from_sequence<R: Rng + ?Sized>(
    sequence: [u32; SEQUENCE_LEN],
    missing_index: usize,
    step: u32,
    direction: Direction,
    rng: &mut R,
) -> Question {
    let missing_index = missing_index.clamp(1, SEQUENCE_LEN - 2);
    let answer = sequence[missing_index];
    let answer_color = random_color(rng);
    // Near-misses one step away (plus one) look like plausible slips
    let wrongs = wrong_answers(rng, answer, CHOICE_COUNT - 1, step + 1);
    let choices = numeric_choices(rng, answer, answer_color, &wrongs);

    Question {
        kind: QuestionKind::CrackCode {
            sequence,
            missing_index,
            step,
            direction,
        },
        answer: ChoiceValue::Number(answer),
        answer_color,
        choices,
    }
}
