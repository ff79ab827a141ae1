use crate::utils::parse::{lines, numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input).map(numbers::<i32>).collect()
    }
}

/// Strictly monotonic with steps of 1 to 3
fn is_safe(levels: impl IntoIterator<Item = i32>) -> bool {
    let mut levels = levels.into_iter();
    let Some(mut previous) = levels.next() else {
        return true;
    };
    let mut direction = 0;
    for level in levels {
        let step = level - previous;
        if !(1..=3).contains(&step.abs()) || step.signum() * direction < 0 {
            return false;
        }
        direction = step.signum();
        previous = level;
    }
    true
}

/// Safe after dropping at most one level
fn is_dampened_safe(levels: &[i32]) -> bool {
    is_safe(levels.iter().copied())
        || (0..levels.len()).any(|skip| {
            is_safe(
                levels
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &level)| level),
            )
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .iter()
            .filter(|report| is_safe(report.iter().copied()))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .iter()
            .filter(|report| is_dampened_safe(report))
            .count();
        Ok(safe.to_string())
    }
}
