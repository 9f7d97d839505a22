//! Shared randomness helpers: ranged ints, orb colors, wrong answers
//!
//! Every helper takes the caller's RNG so generation stays reproducible
//! from a session seed.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::question::{Choice, ChoiceValue, OrbColor};

/// Sampling attempts before falling back to deterministic distractors
pub const MAX_DISTRACTOR_ATTEMPTS: u32 = 50;

/// Uniform integer in `[min, max]` (inclusive)
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    rng.random_range(min..=max)
}

/// Random orb color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> OrbColor {
    *OrbColor::ALL.choose(rng).unwrap_or(&OrbColor::Cyan)
}

/// Fair coin
#[inline]
pub fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

/// Generate `count` wrong answers close to `correct`.
///
/// Offsets are drawn from `[1, max_offset]` with a random sign and kept when
/// the candidate is positive, differs from `correct` and is not a repeat.
/// After `MAX_DISTRACTOR_ATTEMPTS` draws the remainder is filled with
/// `correct + 1, correct + 2, ...` skipping values already taken, so this
/// always terminates with exactly `count` values.
pub fn wrong_answers<R: Rng + ?Sized>(
    rng: &mut R,
    correct: u32,
    count: usize,
    max_offset: u32,
) -> Vec<u32> {
    let max_offset = max_offset.max(1);
    let mut wrongs: Vec<u32> = Vec::with_capacity(count);
    let mut attempts = 0;

    while wrongs.len() < count && attempts < MAX_DISTRACTOR_ATTEMPTS {
        let offset = random_int(rng, 1, max_offset) as i64;
        let offset = if coin(rng) { offset } else { -offset };
        let candidate = correct as i64 + offset;
        if candidate > 0 && candidate != correct as i64 {
            let candidate = candidate as u32;
            if !wrongs.contains(&candidate) {
                wrongs.push(candidate);
            }
        }
        attempts += 1;
    }

    if wrongs.len() < count {
        log::debug!(
            "Distractor budget exhausted for {} ({} of {}), filling upward",
            correct,
            wrongs.len(),
            count
        );
    }
    let mut next = correct.saturating_add(1);
    while wrongs.len() < count {
        if !wrongs.contains(&next) {
            wrongs.push(next);
        }
        next = next.saturating_add(1);
    }

    wrongs
}

/// Build the shuffled orb list for a numeric answer
pub fn numeric_choices<R: Rng + ?Sized>(
    rng: &mut R,
    answer: u32,
    answer_color: OrbColor,
    wrongs: &[u32],
) -> Vec<Choice> {
    let mut choices = Vec::with_capacity(wrongs.len() + 1);
    choices.push(Choice {
        value: ChoiceValue::Number(answer),
        color: answer_color,
        is_correct: true,
    });
    for &w in wrongs {
        choices.push(Choice {
            value: ChoiceValue::Number(w),
            color: random_color(rng),
            is_correct: false,
        });
    }
    choices.shuffle(rng);
    choices
}
