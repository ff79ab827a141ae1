use crate::utils::parse::{invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022", "parsing"])]
pub struct Solver;

type Pair = (RangeInclusive<u32>, RangeInclusive<u32>);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pair>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Pair, ParseError> {
                match unsigned_numbers::<u32>(line)?.as_slice() {
                    &[a, b, c, d] => Ok((a..=b, c..=d)),
                    _ => Err(invalid(format!("expected `a-b,c-d`, got {line:?}"))),
                }
            })
            .collect()
    }
}

fn fully_contains((first, second): &Pair) -> bool {
    (first.contains(second.start()) && first.contains(second.end()))
        || (second.contains(first.start()) && second.contains(first.end()))
}

fn overlaps((first, second): &Pair) -> bool {
    first.start() <= second.end() && second.start() <= first.end()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|pair| fully_contains(pair)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|pair| overlaps(pair)).count().to_string())
    }
}
