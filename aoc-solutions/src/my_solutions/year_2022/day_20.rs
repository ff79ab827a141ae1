use crate::utils::parse::{invalid, numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 20, tags = ["2022", "simulation"])]
pub struct Solver;

const DECRYPTION_KEY: i64 = 811_589_153;

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let values: Vec<i64> = numbers(input)?;
        if values.iter().filter(|&&v| v == 0).count() != 1 {
            return Err(invalid("the file must hold exactly one 0"));
        }
        Ok(values)
    }
}

/// Sum of the values 1000, 2000 and 3000 places after the 0 once the file
/// has been mixed `rounds` times
fn grove_coordinates(values: &[i64], key: i64, rounds: usize) -> i64 {
    let values: Vec<i64> = values.iter().map(|v| v * key).collect();
    let len = values.len();
    // Original indices in their current order
    let mut order: Vec<usize> = (0..len).collect();

    if len > 1 {
        for _ in 0..rounds {
            for (original, &value) in values.iter().enumerate() {
                let Some(from) = order.iter().position(|&i| i == original) else {
                    continue;
                };
                order.remove(from);
                // The moving value is out of the ring, which is one shorter
                let to = (from as i64 + value).rem_euclid(len as i64 - 1) as usize;
                order.insert(to, original);
            }
        }
    }

    let Some(zero) = order.iter().position(|&i| values[i] == 0) else {
        return 0;
    };
    [1000, 2000, 3000]
        .iter()
        .map(|offset| values[order[(zero + offset) % len]])
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(grove_coordinates(shared, 1, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(grove_coordinates(shared, DECRYPTION_KEY, 10).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1
        2
        -3
        3
        -2
        0
        4
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1623178306");
    }

    #[test]
    fn test_needs_single_zero() {
        assert!(Solver::parse("1\n2\n").is_err());
        assert!(Solver::parse("0\n0\n").is_err());
        assert_eq!(grove_coordinates(&[0], 1, 1), 0);
    }
}
