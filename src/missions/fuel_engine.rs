//! FUEL_ENGINE: solve the equation to fuel up
//!
//! Operand ranges are picked per level tier so that subtraction never goes
//! negative and division is always exact. Nothing is generated and rejected.

use rand::Rng;

use super::distractors::{coin, numeric_choices, random_color, random_int, wrong_answers};
use super::question::{ChoiceValue, Operator, Question, QuestionKind};
use crate::consts::CHOICE_COUNT;

/// Generate an equation question for `level` (1-based)
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Question {
    let (num1, num2, operator) = operands_for_level(level, rng);
    from_operands(num1, num2, operator, level, rng)
}

/// Pick `(num1, num2, operator)` for a level tier
fn operands_for_level<R: Rng + ?Sized>(level: u32, rng: &mut R) -> (u32, u32, Operator) {
    match level {
        // Simple addition, sum <= 10
        0 | 1 => (random_int(rng, 1, 5), random_int(rng, 1, 5), Operator::Add),
        // Addition up to 20, or subtraction with num1 >= 8 > num2
        2 => {
            if coin(rng) {
                (random_int(rng, 5, 12), random_int(rng, 2, 8), Operator::Add)
            } else {
                (random_int(rng, 8, 20), random_int(rng, 2, 7), Operator::Subtract)
            }
        }
        // Intro multiplication (2x-5x tables) or larger add/sub
        3 | 4 => {
            if rng.random::<f64>() < 0.4 {
                (random_int(rng, 2, 5), random_int(rng, 2, 9), Operator::Multiply)
            } else if coin(rng) {
                (random_int(rng, 15, 30), random_int(rng, 5, 20), Operator::Add)
            } else {
                (random_int(rng, 20, 50), random_int(rng, 5, 15), Operator::Subtract)
            }
        }
        // Full mix; division built from divisor x quotient
        _ => {
            let roll = rng.random::<f64>();
            if roll < 0.25 {
                let divisor = random_int(rng, 2, 9);
                let quotient = random_int(rng, 2, 9);
                (divisor * quotient, divisor, Operator::Divide)
            } else if roll < 0.5 {
                (random_int(rng, 3, 12), random_int(rng, 3, 12), Operator::Multiply)
            } else if coin(rng) {
                (random_int(rng, 20, 100), random_int(rng, 10, 50), Operator::Add)
            } else {
                (random_int(rng, 50, 150), random_int(rng, 10, 50), Operator::Subtract)
            }
        }
    }
}

/// Build a question from fixed operands.
///
/// Operands that would break integrality (negative difference, inexact
/// division) are swapped into a valid order first: `a - b` becomes the
/// larger minus the smaller, and an inexact `a ÷ b` becomes `(a*b) ÷ b`.
pub fn from_operands<R: Rng + ?Sized>(
    num1: u32,
    num2: u32,
    operator: Operator,
    level: u32,
    rng: &mut R,
) -> Question {
    let (num1, num2) = match operator {
        Operator::Subtract if num1 < num2 => (num2, num1),
        Operator::Divide if num2 == 0 => (num1, 1),
        Operator::Divide if num1 % num2 != 0 => (num1.saturating_mul(num2), num2),
        _ => (num1, num2),
    };
    let answer = operator.apply(num1, num2).unwrap_or(0);

    let answer_color = random_color(rng);
    // Wider spread for harder levels so near-misses aren't obvious
    let max_offset = if level <= 2 { 3 } else { random_int(rng, 3, 8) };
    let wrongs = wrong_answers(rng, answer, CHOICE_COUNT - 1, max_offset);
    let choices = numeric_choices(rng, answer, answer_color, &wrongs);

    log::debug!(
        "Fuel engine L{}: {} {} {} = {}",
        level,
        num1,
        operator.symbol(),
        num2,
        answer
    );

    Question {
        kind: QuestionKind::FuelEngine {
            num1,
            num2,
            operator,
            show_dots: level == 1,
        },
        answer: ChoiceValue::Number(answer),
        answer_color,
        choices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn parts(q: &Question) -> (u32, u32, Operator) {
        match q.kind {
            QuestionKind::FuelEngine {
                num1,
                num2,
                operator,
                ..
            } => (num1, num2, operator),
            _ => panic!("expected fuel engine question"),
        }
    }

    #[test]
    fn test_level_one_is_small_addition() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let q = generate(1, &mut rng);
            let (a, b, op) = parts(&q);
            assert_eq!(op, Operator::Add);
            assert!(a + b <= 10);
            assert!(matches!(q.kind, QuestionKind::FuelEngine { show_dots: true, .. }));
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = Pcg32::seed_from_u64(5);
        for level in 1..=12 {
            for _ in 0..100 {
                let q = generate(level, &mut rng);
                let (a, b, op) = parts(&q);
                if op == Operator::Subtract {
                    assert!(a >= b, "{a} - {b} at level {level}");
                }
            }
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut seen = 0;
        for _ in 0..400 {
            let q = generate(6, &mut rng);
            let (a, b, op) = parts(&q);
            if op == Operator::Divide {
                seen += 1;
                assert_eq!(a % b, 0);
                assert_eq!(q.answer, ChoiceValue::Number(a / b));
            }
        }
        assert!(seen > 0, "level 6 should produce some division");
    }

    #[test]
    fn test_fixed_operands() {
        let mut rng = Pcg32::seed_from_u64(0);
        let q = from_operands(3, 5, Operator::Add, 1, &mut rng);
        assert_eq!(q.answer, ChoiceValue::Number(8));
        assert!(q.accepts("8"));

        let q = from_operands(3, 9, Operator::Subtract, 2, &mut rng);
        assert_eq!(parts(&q), (9, 3, Operator::Subtract));
        assert_eq!(q.answer, ChoiceValue::Number(6));
    }
}
