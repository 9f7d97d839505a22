//! Generated question invariants across levels, seeds and mission types

use nebula_navigator::missions::{
    ChoiceValue, Comparison, Direction, MissionType, Operator, Question, QuestionKind, ScanOptions,
    ScanSubtype, balance_cargo, crack_code, generate_question,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn generate(mission: MissionType, level: u32, seed: u64, options: &ScanOptions) -> Question {
    let mut rng = Pcg32::seed_from_u64(seed);
    generate_question(mission, level, options, &mut rng)
}

fn mission_strategy() -> impl Strategy<Value = MissionType> {
    prop::sample::select(MissionType::ALL.to_vec())
}

fn scan_options_strategy() -> impl Strategy<Value = ScanOptions> {
    prop::option::of(1u32..=20).prop_map(|build_chart_from_level| ScanOptions {
        build_chart_from_level,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn exactly_one_correct_choice_matching_answer(
        mission in mission_strategy(),
        level in 1u32..=20,
        seed in any::<u64>(),
        options in scan_options_strategy(),
    ) {
        let q = generate(mission, level, seed, &options);
        prop_assert_eq!(q.mission_type(), mission);
        prop_assert_eq!(q.choices.len(), 3);
        let correct: Vec<_> = q.choices.iter().filter(|c| c.is_correct).collect();
        prop_assert_eq!(correct.len(), 1);
        prop_assert_eq!(&correct[0].value, &q.answer);
        prop_assert!(q.accepts(&q.answer.to_string()));
    }

    #[test]
    fn choice_values_are_pairwise_distinct(
        mission in mission_strategy(),
        level in 1u32..=20,
        seed in any::<u64>(),
        options in scan_options_strategy(),
    ) {
        let q = generate(mission, level, seed, &options);
        for (i, a) in q.choices.iter().enumerate() {
            for b in &q.choices[i + 1..] {
                prop_assert_ne!(&a.value, &b.value);
                // Orbs are matched by their displayed text
                prop_assert_ne!(a.value.to_string(), b.value.to_string());
            }
        }
    }

    #[test]
    fn fuel_engine_arithmetic_is_exact(level in 1u32..=20, seed in any::<u64>()) {
        let q = generate(MissionType::FuelEngine, level, seed, &ScanOptions::default());
        let QuestionKind::FuelEngine { num1, num2, operator, show_dots } = q.kind else {
            return Err(TestCaseError::fail("wrong kind"));
        };
        prop_assert_eq!(show_dots, level == 1);
        let expected = match operator {
            Operator::Add => num1 + num2,
            Operator::Subtract => {
                prop_assert!(num1 >= num2, "{} - {} would go negative", num1, num2);
                num1 - num2
            }
            Operator::Multiply => num1 * num2,
            Operator::Divide => {
                prop_assert!(num2 > 0);
                prop_assert_eq!(num1 % num2, 0);
                num1 / num2
            }
        };
        prop_assert_eq!(q.answer, ChoiceValue::Number(expected));
    }

    #[test]
    fn crack_code_has_constant_step(level in 1u32..=20, seed in any::<u64>()) {
        let q = generate(MissionType::CrackCode, level, seed, &ScanOptions::default());
        let QuestionKind::CrackCode { sequence, missing_index, step, direction } = q.kind else {
            return Err(TestCaseError::fail("wrong kind"));
        };
        prop_assert!(missing_index == 1 || missing_index == 2);
        prop_assert_eq!(q.answer, ChoiceValue::Number(sequence[missing_index]));
        prop_assert!(step > 0);
        for pair in sequence.windows(2) {
            let delta = i64::from(pair[1]) - i64::from(pair[0]);
            let expected = match direction {
                Direction::Ascending => i64::from(step),
                Direction::Descending => -i64::from(step),
            };
            prop_assert_eq!(delta, expected, "sequence {:?}", sequence);
        }
    }

    #[test]
    fn balance_cargo_compares_correctly(level in 1u32..=20, seed in any::<u64>()) {
        let q = generate(MissionType::BalanceCargo, level, seed, &ScanOptions::default());
        let QuestionKind::BalanceCargo { num1, num2 } = q.kind else {
            return Err(TestCaseError::fail("wrong kind"));
        };
        prop_assert_eq!(&q.answer, &ChoiceValue::Symbol(Comparison::of(num1, num2)));
        for symbol in Comparison::ALL {
            let hits = q
                .choices
                .iter()
                .filter(|c| c.value == ChoiceValue::Symbol(symbol))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }

    #[test]
    fn scan_data_extremes_are_unambiguous(
        level in 1u32..=20,
        seed in any::<u64>(),
        options in scan_options_strategy(),
    ) {
        let q = generate(MissionType::ScanData, level, seed, &options);
        let Some(scan) = q.scan_data() else {
            return Err(TestCaseError::fail("wrong kind"));
        };
        let counts = scan.counts();
        prop_assert!(!counts.is_empty());
        for (i, a) in counts.iter().enumerate() {
            prop_assert!(!counts[i + 1..].contains(a), "tied counts {:?}", counts);
        }

        let count_of = |value: &ChoiceValue| match value {
            ChoiceValue::Icon(icon) => scan
                .dataset
                .iter()
                .find(|d| d.icon == *icon)
                .map(|d| d.count),
            _ => None,
        };
        match scan.subtype {
            ScanSubtype::Most => {
                prop_assert_eq!(count_of(&q.answer), counts.iter().copied().max());
            }
            ScanSubtype::Least => {
                prop_assert_eq!(count_of(&q.answer), counts.iter().copied().min());
            }
            ScanSubtype::Total | ScanSubtype::BuildChart => {
                prop_assert_eq!(&q.answer, &ChoiceValue::Number(counts.iter().sum()));
            }
            _ => {}
        }
        if scan.subtype == ScanSubtype::BuildChart {
            prop_assert!(options.build_chart_from_level.is_some_and(|from| level >= from));
            prop_assert!(q.accepts_chart(&counts));
        }
    }
}

#[test]
fn scenario_b_sequence_two_four_six_eight() {
    let mut rng = Pcg32::seed_from_u64(2);
    for missing_index in [1, 2] {
        let q = crack_code::from_sequence(
            [2, 4, 6, 8],
            missing_index,
            2,
            Direction::Ascending,
            &mut rng,
        );
        let QuestionKind::CrackCode { missing_index: shown, .. } = q.kind else {
            panic!("wrong kind");
        };
        assert_eq!(shown, missing_index);
        let expected = if missing_index == 2 { 6 } else { 4 };
        assert_eq!(q.answer, ChoiceValue::Number(expected));
    }
}

#[test]
fn scenario_c_equal_cargo() {
    let mut rng = Pcg32::seed_from_u64(5);
    let q = balance_cargo::from_operands(5, 5, &mut rng);
    assert_eq!(q.answer, ChoiceValue::Symbol(Comparison::Equal));
    assert!(q.accepts("="));
}
