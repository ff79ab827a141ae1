use crate::utils::matrix::Matrix;
use crate::utils::parse::{blocks, invalid};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["2023", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Matrix<char>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|block| {
                Matrix::parse_with(block, |c| match c {
                    '#' | '.' => Ok(c),
                    _ => Err("expected ash or rock"),
                })
                .map_err(|e| invalid(e.to_string()))
            })
            .collect()
    }
}

/// Rows above a horizontal mirror that leaves exactly `smudges` cells
/// unmatched
fn mirror_row(pattern: &Matrix<char>, smudges: usize) -> Option<usize> {
    let rows: Vec<&[char]> = pattern.rows().collect();
    (1..rows.len()).find(|&split| {
        let above = rows[..split].iter().rev();
        let below = rows[split..].iter();
        let mismatches: usize = above
            .zip(below)
            .map(|(a, b)| a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
            .sum();
        mismatches == smudges
    })
}

fn summarize(patterns: &[Matrix<char>], smudges: usize) -> Result<usize, SolveError> {
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            mirror_row(&pattern.transpose(), smudges)
                .or_else(|| mirror_row(pattern, smudges).map(|rows| 100 * rows))
                .ok_or_else(|| SolveError::failed(format!("pattern {index} has no mirror")))
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(summarize(shared, 0)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Every mirror has exactly one smudge on it
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(summarize(shared, 1)?.to_string())
    }
}
