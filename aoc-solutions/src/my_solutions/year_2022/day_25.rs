use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2022, day = 25, tags = ["2022", "math"])]
pub struct Solver;

/// Balanced base five: digits run from `=` (-2) to `2`
fn from_snafu(number: &str) -> Result<i64, ParseError> {
    number.chars().try_fold(0i64, |value, c| {
        let digit = match c {
            '=' => -2,
            '-' => -1,
            '0' => 0,
            '1' => 1,
            '2' => 2,
            _ => return Err(invalid(format!("{c:?} is not a SNAFU digit in {number:?}"))),
        };
        value
            .checked_mul(5)
            .and_then(|value| value.checked_add(digit))
            .ok_or_else(|| invalid(format!("SNAFU number {number:?} overflows")))
    })
}

fn to_snafu(mut value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value != 0 {
        // Digits 3 and 4 become -2 and -1 with a carry
        let digit = (value + 2).rem_euclid(5) - 2;
        digits.push(match digit {
            -2 => '=',
            -1 => '-',
            0 => '0',
            1 => '1',
            _ => '2',
        });
        value = (value - digit) / 5;
    }
    digits.iter().rev().collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input).map(from_snafu).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(to_snafu(shared.iter().sum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1=-0-2
        12111
        2=0=
        21
        2=01
        111
        20012
        112
        1=-1=
        1-12
        12
        1=
        122
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.iter().sum::<i64>(), 4890);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2=-1=0");
    }

    #[test]
    fn test_conversions() {
        for (decimal, snafu) in [
            (0, "0"),
            (3, "1="),
            (8, "2="),
            (2022, "1=11-2"),
            (314159265, "1121-1110-1=0"),
        ] {
            assert_eq!(to_snafu(decimal), snafu);
            assert_eq!(from_snafu(snafu).unwrap(), decimal);
        }
        assert!(from_snafu("13").is_err());
    }
}
