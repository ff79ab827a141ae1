use crate::utils::parse::{blocks, invalid};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calories carried by each elf, largest first
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = blocks(input)
            .into_iter()
            .map(|elf| {
                elf.lines()
                    .map(|line| {
                        line.trim()
                            .parse::<u32>()
                            .map_err(|e| invalid(format!("{line:?}: {e}")))
                    })
                    .sum::<Result<u32, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals)
    }
}

fn top(totals: &[u32], elves: usize) -> Result<String, SolveError> {
    if totals.len() < elves {
        return Err(SolveError::failed(format!("need at least {elves} elves")));
    }
    Ok(totals[..elves].iter().sum::<u32>().to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        top(shared, 1)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        top(shared, 3)
    }
}
