//! BALANCE_CARGO: drag `<`, `>` or `=` between two numbers

use rand::Rng;
use rand::seq::SliceRandom;

use super::distractors::{random_color, random_int};
use super::question::{Choice, ChoiceValue, Comparison, Question, QuestionKind};

/// Generate a comparison question for `level` (1-based)
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Question {
    let (min, max) = match level {
        0..=2 => (1, 10),
        3 | 4 => (10, 50),
        _ => (20, 100),
    };
    let num1 = random_int(rng, min, max);
    let num2 = random_int(rng, min, max);
    from_operands(num1, num2, rng)
}

/// Build a comparison question for fixed operands; ties answer `=`
pub fn from_operands<R: Rng + ?Sized>(num1: u32, num2: u32, rng: &mut R) -> Question {
    let answer = Comparison::of(num1, num2);
    let answer_color = random_color(rng);

    let mut choices: Vec<Choice> = Comparison::ALL
        .iter()
        .map(|&op| Choice {
            value: ChoiceValue::Symbol(op),
            color: if op == answer {
                answer_color
            } else {
                random_color(rng)
            },
            is_correct: op == answer,
        })
        .collect();
    choices.shuffle(rng);

    Question {
        kind: QuestionKind::BalanceCargo { num1, num2 },
        answer: ChoiceValue::Symbol(answer),
        answer_color,
        choices,
    }
}
