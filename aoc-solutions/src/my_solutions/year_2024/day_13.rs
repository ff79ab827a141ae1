use crate::utils::parse::{blocks, fixed_numbers, invalid, lines};
use crate::utils::point::Point2D;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["2024", "math"])]
pub struct Solver;

const PRIZE_OFFSET: i64 = 10_000_000_000_000;
const COST_A: i64 = 3;
const COST_B: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Machine {
    a: Point2D<i64>,
    b: Point2D<i64>,
    prize: Point2D<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|block| -> Result<Machine, ParseError> {
                let points = lines(block)
                    .map(|line| fixed_numbers::<i64, 2>(line).map(|[x, y]| Point2D::new(x, y)))
                    .collect::<Result<Vec<_>, _>>()?;
                match points[..] {
                    [a, b, prize] => Ok(Machine { a, b, prize }),
                    _ => Err(invalid(format!("expected three lines in {block:?}"))),
                }
            })
            .collect()
    }
}

impl Machine {
    /// Tokens for the unique whole press counts that land on the prize
    /// (Cramer's rule), `None` when there are none
    fn tokens(&self, offset: i64) -> Option<i64> {
        let prize = self.prize + Point2D::new(offset, offset);
        let determinant = self.a.x * self.b.y - self.a.y * self.b.x;
        if determinant == 0 {
            return None;
        }
        let a = prize.x * self.b.y - prize.y * self.b.x;
        let b = self.a.x * prize.y - self.a.y * prize.x;
        if a % determinant != 0 || b % determinant != 0 {
            return None;
        }
        let (a, b) = (a / determinant, b / determinant);
        (a >= 0 && b >= 0).then_some(a * COST_A + b * COST_B)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared.iter().filter_map(|m| m.tokens(0)).sum();
        Ok(tokens.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared.iter().filter_map(|m| m.tokens(PRIZE_OFFSET)).sum();
        Ok(tokens.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Button A: X+94, Y+34
        Button B: X+22, Y+67
        Prize: X=8400, Y=5400

        Button A: X+26, Y+66
        Button B: X+67, Y+21
        Prize: X=12748, Y=12176

        Button A: X+17, Y+86
        Button B: X+84, Y+37
        Prize: X=7870, Y=6450

        Button A: X+69, Y+23
        Button B: X+27, Y+71
        Prize: X=18641, Y=10279
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "480");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "875318608908");
    }

    #[test]
    fn test_only_second_and_fourth_win_with_offset() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        let winners: Vec<bool> = shared
            .iter()
            .map(|m| m.tokens(PRIZE_OFFSET).is_some())
            .collect();
        assert_eq!(winners, vec![false, true, false, true]);
    }
}
