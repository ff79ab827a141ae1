use crate::utils::parse::{invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "recursion"])]
pub struct Solver;

pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Equation, ParseError> {
                let (target, operands) = line
                    .split_once(':')
                    .ok_or_else(|| invalid(format!("missing ':' in {line:?}")))?;
                Ok(Equation {
                    target: target
                        .trim()
                        .parse()
                        .map_err(|e| invalid(format!("{target:?}: {e}")))?,
                    operands: unsigned_numbers(operands)?,
                })
            })
            .collect()
    }
}

/// `value` with the decimal digits of `suffix` removed from its end
fn strip_digits(value: u64, suffix: u64) -> Option<u64> {
    let modulus = 10u64.checked_pow(suffix.checked_ilog10().unwrap_or(0) + 1)?;
    (value % modulus == suffix).then_some(value / modulus)
}

/// Works backwards from the target, undoing the last operator each step
fn can_make(target: u64, operands: &[u64], concatenate: bool) -> bool {
    match operands {
        [] => false,
        [only] => *only == target,
        [rest @ .., last] => {
            (target >= *last && can_make(target - last, rest, concatenate))
                || (*last != 0 && target % last == 0 && can_make(target / last, rest, concatenate))
                || (concatenate
                    && target != *last
                    && strip_digits(target, *last)
                        .is_some_and(|prefix| can_make(prefix, rest, concatenate)))
        }
    }
}

fn calibration(equations: &[Equation], concatenate: bool) -> u64 {
    equations
        .iter()
        .filter(|e| can_make(e.target, &e.operands, concatenate))
        .map(|e| e.target)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        190: 10 19
        3267: 81 40 27
        83: 17 5
        156: 15 6
        7290: 6 8 6 15
        161011: 16 10 13
        192: 17 8 14
        21037: 9 7 18 13
        292: 11 6 16 20
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3749");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "11387");
    }

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits(156, 6), Some(15));
        assert_eq!(strip_digits(1_000, 0), Some(100));
        assert_eq!(strip_digits(123, 24), None);
    }
}
