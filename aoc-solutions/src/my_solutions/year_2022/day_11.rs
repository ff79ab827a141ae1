use crate::utils::math::lcm_of;
use crate::utils::parse::{blocks, invalid, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["2022", "simulation", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(u64),
    Multiply(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(value) => old + value,
            Operation::Multiply(value) => old * value,
            Operation::Square => old * old,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

fn monkey_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"Monkey \d+:\s+Starting items:([\d, ]*)\s+",
            r"Operation: new = old ([*+]) (\d+|old)\s+",
            r"Test: divisible by (\d+)\s+",
            r"If true: throw to monkey (\d+)\s+",
            r"If false: throw to monkey (\d+)"
        ))
        .unwrap()
    })
}

fn parse_monkey(block: &str) -> Result<Monkey, ParseError> {
    let captures = monkey_regex()
        .captures(block)
        .ok_or_else(|| invalid(format!("bad monkey notes {block:?}")))?;
    let (_, [items, operator, operand, divisor, if_true, if_false]) = captures.extract();
    let number = |s: &str| -> Result<u64, ParseError> {
        s.parse().map_err(|e| invalid(format!("{s:?}: {e}")))
    };

    let operation = match (operator, operand) {
        ("*", "old") => Operation::Square,
        ("*", value) => Operation::Multiply(number(value)?),
        ("+", "old") => Operation::Multiply(2),
        (_, value) => Operation::Add(number(value)?),
    };
    let divisor = number(divisor)?;
    if divisor == 0 {
        return Err(invalid("divisible by 0"));
    }

    Ok(Monkey {
        items: unsigned_numbers(items)?,
        operation,
        divisor,
        if_true: number(if_true)? as usize,
        if_false: number(if_false)? as usize,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let monkeys: Vec<Monkey> = blocks(input)
            .into_iter()
            .map(parse_monkey)
            .collect::<Result<_, _>>()?;
        if let Some(monkey) = monkeys
            .iter()
            .find(|m| m.if_true >= monkeys.len() || m.if_false >= monkeys.len())
        {
            return Err(invalid(format!(
                "a monkey throws to monkey {} of {}",
                monkey.if_true.max(monkey.if_false),
                monkeys.len()
            )));
        }
        Ok(monkeys)
    }
}

/// Product of the two highest inspection counts. `relief` turns the new
/// worry level into the one passed on.
fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: impl Fn(u64) -> u64) -> u64 {
    let mut monkeys = monkeys.to_vec();
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for index in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[index].items);
            inspected[index] += items.len() as u64;
            let Monkey {
                operation,
                divisor,
                if_true,
                if_false,
                ..
            } = monkeys[index];
            for item in items {
                let worry = relief(operation.apply(item));
                let target = if worry % divisor == 0 { if_true } else { if_false };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspected.into_iter().sorted_unstable().rev().take(2).product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, |worry| worry / 3).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Worry levels only matter modulo every divisor at once
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let modulus = lcm_of(shared.iter().map(|m| m.divisor))
            .map_err(|e| SolveError::failed(e.to_string()))?;
        Ok(monkey_business(shared, 10_000, |worry| worry % modulus).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Monkey 0:
          Starting items: 79, 98
          Operation: new = old * 19
          Test: divisible by 23
            If true: throw to monkey 2
            If false: throw to monkey 3

        Monkey 1:
          Starting items: 54, 65, 75, 74
          Operation: new = old + 6
          Test: divisible by 19
            If true: throw to monkey 2
            If false: throw to monkey 0

        Monkey 2:
          Starting items: 79, 60, 97
          Operation: new = old * old
          Test: divisible by 13
            If true: throw to monkey 1
            If false: throw to monkey 3

        Monkey 3:
          Starting items: 74
          Operation: new = old + 3
          Test: divisible by 17
            If true: throw to monkey 0
            If false: throw to monkey 1
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared[2].operation, Operation::Square);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "10605");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2713310158");
    }

    #[test]
    fn test_throw_to_missing_monkey() {
        let input = EXAMPLE.replace("throw to monkey 3", "throw to monkey 9");
        assert!(Solver::parse(&input).is_err());
    }
}
