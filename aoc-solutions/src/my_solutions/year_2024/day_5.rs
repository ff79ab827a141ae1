use crate::utils::parse::{blocks, invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "sorting"])]
pub struct Solver;

pub struct PrintQueue {
    /// `(a, b)`: page `a` must come before page `b`
    rules: HashSet<(u32, u32)>,
    updates: Vec<Vec<u32>>,
}

impl AocParser for Solver {
    type SharedData<'a> = PrintQueue;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [rules, updates] = blocks(input)[..] else {
            return Err(invalid("expected rules and updates separated by a blank line"));
        };
        let rules = lines(rules)
            .map(|line| -> Result<(u32, u32), ParseError> {
                match unsigned_numbers::<u32>(line)?[..] {
                    [before, after] => Ok((before, after)),
                    _ => Err(invalid(format!("bad rule {line:?}"))),
                }
            })
            .collect::<Result<_, ParseError>>()?;
        let updates = lines(updates)
            .map(unsigned_numbers::<u32>)
            .collect::<Result<_, _>>()?;
        Ok(PrintQueue { rules, updates })
    }
}

impl PrintQueue {
    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        if self.rules.contains(&(*a, *b)) {
            Ordering::Less
        } else if self.rules.contains(&(*b, *a)) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn is_ordered(&self, update: &[u32]) -> bool {
        update.is_sorted_by(|a, b| self.compare(a, b) != Ordering::Greater)
    }
}

fn middle(update: &[u32]) -> u32 {
    update.get(update.len() / 2).copied().unwrap_or(0)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|update| shared.is_ordered(update))
            .map(|update| middle(update))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|update| !shared.is_ordered(update))
            .map(|update| {
                let mut fixed = update.clone();
                fixed.sort_by(|a, b| shared.compare(a, b));
                middle(&fixed)
            })
            .sum();
        Ok(total.to_string())
    }
}
