use crate::utils::parse::{lines, numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input).map(numbers::<i64>).collect()
    }
}

/// Next value of the sequence, found by extrapolating its difference tables
fn extrapolate(sequence: &[i64]) -> i64 {
    let Some(&last) = sequence.last() else {
        return 0;
    };
    if sequence.iter().all(|&v| v == last) {
        return last;
    }
    let differences: Vec<i64> = sequence.windows(2).map(|w| w[1] - w[0]).collect();
    last + extrapolate(&differences)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|s| extrapolate(s)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Extrapolating backwards is extrapolating the reversed sequence
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: i64 = shared
            .iter()
            .map(|s| {
                let reversed: Vec<i64> = s.iter().rev().copied().collect();
                extrapolate(&reversed)
            })
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        0 3 6 9 12 15
        1 3 6 10 15 21
        10 13 16 21 30 45
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "114");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(extrapolate(&[-1, -3, -5]), -7);
    }
}
