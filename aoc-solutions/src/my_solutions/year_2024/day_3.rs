use crate::utils::parse::invalid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(u64, u64),
    Do,
    Dont,
}

fn instruction_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").unwrap())
}

fn operand(digits: &str) -> Result<u64, ParseError> {
    digits
        .parse()
        .map_err(|e| invalid(format!("{digits:?}: {e}")))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        instruction_regex()
            .captures_iter(input)
            .map(|captures| -> Result<Instruction, ParseError> {
                match (captures.get(1), captures.get(2)) {
                    (Some(a), Some(b)) => Ok(Instruction::Mul(
                        operand(a.as_str())?,
                        operand(b.as_str())?,
                    )),
                    _ if &captures[0] == "do()" => Ok(Instruction::Do),
                    _ => Ok(Instruction::Dont),
                }
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|instruction| match instruction {
                Instruction::Mul(a, b) => a * b,
                _ => 0,
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut enabled = true;
        let mut total = 0;
        for instruction in shared.iter() {
            match *instruction {
                Instruction::Do => enabled = true,
                Instruction::Dont => enabled = false,
                Instruction::Mul(a, b) if enabled => total += a * b,
                Instruction::Mul(..) => {}
            }
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(
            "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))",
        )
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "161");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(
            "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))",
        )
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "48");
    }

    #[test]
    fn test_ignores_long_operands() {
        let shared = Solver::parse("mul(1234,5)mul( 1,2)mul(7,8)").unwrap();
        assert_eq!(shared, vec![Instruction::Mul(7, 8)]);
    }
}
