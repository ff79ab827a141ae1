use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022", "bitset"])]
pub struct Solver;

/// Item types as bits, bit `priority` set for each type present
type Items = u64;

fn priority(item: u8) -> Option<u32> {
    match item {
        b'a'..=b'z' => Some(u32::from(item - b'a') + 1),
        b'A'..=b'Z' => Some(u32::from(item - b'A') + 27),
        _ => None,
    }
}

fn items(bytes: &[u8]) -> Items {
    bytes
        .iter()
        .filter_map(|&item| priority(item))
        .fold(0, |set, p| set | 1 << p)
}

fn priority_sum(sets: impl Iterator<Item = Items>) -> u32 {
    sets.map(Items::trailing_zeros).filter(|&p| p < Items::BITS).sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| {
                let bytes = line.as_bytes();
                if bytes.len() % 2 != 0 || bytes.iter().any(|&b| priority(b).is_none()) {
                    return Err(invalid(format!("bad rucksack {line:?}")));
                }
                Ok(bytes)
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let shared_items = shared.iter().map(|rucksack| {
            let (first, second) = rucksack.split_at(rucksack.len() / 2);
            items(first) & items(second)
        });
        Ok(priority_sum(shared_items).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed("rucksacks do not split into groups of three"));
        }
        let badges = shared
            .iter()
            .tuples()
            .map(|(a, b, c)| items(a) & items(b) & items(c));
        Ok(priority_sum(badges).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        vJrwpWtwJgWrhcsFMMfFFhFp
        jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
        PmmdzqPrVvPwwTWBwg
        wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
        ttgJtRGJQctTZtZT
        CrZsJsPPZsGzwwsLwLmpwMDw
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "157");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "70");
    }

    #[test]
    fn test_priorities() {
        assert_eq!(priority(b'a'), Some(1));
        assert_eq!(priority(b'Z'), Some(52));
        assert_eq!(priority(b'1'), None);
    }

    #[test]
    fn test_incomplete_group() {
        let mut shared = Solver::parse("abab\ncdcd\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }
}
