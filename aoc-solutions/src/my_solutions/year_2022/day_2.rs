use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022", "simulation"])]
pub struct Solver;

/// Both columns as `0..3`; the opponent's shape and the second column,
/// which is either a shape or an outcome depending on the part
type Round = (u8, u8);

fn column(symbol: &str, letters: [&str; 3]) -> Option<u8> {
    letters.iter().position(|&l| l == symbol).map(|i| i as u8)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| {
                line.split_once(' ')
                    .and_then(|(theirs, second)| {
                        Some((column(theirs, ["A", "B", "C"])?, column(second, ["X", "Y", "Z"])?))
                    })
                    .ok_or_else(|| invalid(format!("bad round {line:?}")))
            })
            .collect()
    }
}

/// Shape score plus outcome score, where shape `(theirs + 1) % 3` wins
fn score(theirs: u8, mine: u8) -> u32 {
    let outcome = (mine + 4 - theirs) % 3;
    u32::from(mine) + 1 + u32::from(outcome) * 3
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared.iter().map(|&(theirs, mine)| score(theirs, mine)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The second column is lose, draw, win
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(theirs, outcome)| score(theirs, (theirs + outcome + 2) % 3))
            .sum();
        Ok(total.to_string())
    }
}
