use crate::utils::parse::{invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023"])]
pub struct Solver;

impl AocParser for Solver {
    /// Winning numbers held on each card, in card order
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<usize, ParseError> {
                let (_, numbers) = line
                    .split_once(':')
                    .ok_or_else(|| invalid(format!("bad card {line:?}")))?;
                let (winning, held) = numbers
                    .split_once('|')
                    .ok_or_else(|| invalid(format!("card without a bar {line:?}")))?;
                let winning: HashSet<u32> = unsigned_numbers::<u32>(winning)?.into_iter().collect();
                let held = unsigned_numbers::<u32>(held)?;
                Ok(held.iter().filter(|number| winning.contains(number)).count())
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = shared
            .iter()
            .filter(|&&matches| matches > 0)
            .map(|&matches| 1u64 << (matches - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Each card wins copies of the next cards, never past the last one
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; shared.len()];
        for (card, &matches) in shared.iter().enumerate() {
            let end = (card + 1 + matches).min(copies.len());
            for won in card + 1..end {
                copies[won] += copies[card];
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}
