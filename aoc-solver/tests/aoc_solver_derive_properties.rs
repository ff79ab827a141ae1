//! Property-based tests for the `AocSolver` derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

/// Parses a row of digits; part 1 sums them, part 2 counts distinct digits
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct DigitRow;

impl AocParser for DigitRow {
    type SharedData<'a> = Vec<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("not a digit: {c}")))
            })
            .collect()
    }
}

impl PartSolver<1> for DigitRow {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|&d| d as u32).sum::<u32>().to_string())
    }
}

impl PartSolver<2> for DigitRow {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.sort_unstable();
        shared.dedup();
        Ok(shared.len().to_string())
    }
}

fn digits_input(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// **Feature: aoc-solver-derive, Property 1: Part dispatch correctness**
///
/// *For any* part in `1..=max_parts`, `Solver::solve_part(shared, N)` equals
/// `<Self as PartSolver<N>>::solve(shared)`.
mod property_1_part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn solve_part_dispatches_to_matching_part_solver(
            digits in prop::collection::vec(0u8..10, 1..20),
            part in 1u8..=2
        ) {
            let input = digits_input(&digits);
            let mut via_solver = DigitRow::parse(&input).unwrap();
            let mut direct = DigitRow::parse(&input).unwrap();

            let solver_result = DigitRow::solve_part(&mut via_solver, part).unwrap();
            let direct_result = match part {
                1 => <DigitRow as PartSolver<1>>::solve(&mut direct),
                _ => <DigitRow as PartSolver<2>>::solve(&mut direct),
            }
            .unwrap();

            prop_assert_eq!(solver_result, direct_result);
            prop_assert_eq!(via_solver, direct);
        }
    }
}

/// **Feature: aoc-solver-derive, Property 2: Invalid part rejection**
///
/// *For any* part outside `1..=max_parts`, the generated `solve_part`
/// returns `PartOutOfRange(part)` without touching the shared data.
mod property_2_invalid_part_rejection {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn invalid_part_is_out_of_range(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = DigitRow::parse("3321").unwrap();

            match DigitRow::solve_part(&mut shared, invalid_part) {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, invalid_part),
                other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
            }
            prop_assert_eq!(shared, vec![3, 3, 2, 1]);
        }
    }
}

/// **Feature: aoc-solver-derive, Property 3: Mutations are visible to later parts**
mod property_3_mutation {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn part2_mutation_changes_part1(digits in prop::collection::vec(0u8..10, 1..20)) {
            let mut shared = DigitRow::parse(&digits_input(&digits)).unwrap();

            let distinct: std::collections::BTreeSet<u8> = digits.iter().copied().collect();
            let distinct_sum: u32 = distinct.iter().map(|&d| d as u32).sum();

            DigitRow::solve_part(&mut shared, 2).unwrap();
            prop_assert_eq!(DigitRow::solve_part(&mut shared, 1).unwrap(), distinct_sum.to_string());
        }
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<DigitRow as Solver>::PARTS, 2);
}

#[test]
fn test_parse_error_message() {
    let err = DigitRow::parse("12a").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat("not a digit: a".into()));
}
