use crate::utils::parse::invalid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["2023", "hashing"])]
pub struct Solver;

fn holiday_hash(s: &str) -> usize {
    s.bytes()
        .fold(0, |hash, byte| (hash + usize::from(byte)) * 17 % 256)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Remove,
    Insert(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    text: &'a str,
    label: &'a str,
    operation: Operation,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split(',')
            .map(str::trim)
            .map(|text| -> Result<Step<'a>, ParseError> {
                let (label, operation) = if let Some(label) = text.strip_suffix('-') {
                    (label, Operation::Remove)
                } else {
                    let (label, focal_length) = text
                        .split_once('=')
                        .ok_or_else(|| invalid(format!("bad step {text:?}")))?;
                    let focal_length = focal_length
                        .parse()
                        .map_err(|e| invalid(format!("focal length in {text:?}: {e}")))?;
                    (label, Operation::Insert(focal_length))
                };
                Ok(Step {
                    text,
                    label,
                    operation,
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared.iter().map(|step| holiday_hash(step.text)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut boxes: Vec<Vec<(&str, u8)>> = vec![Vec::new(); 256];
        for step in shared.iter() {
            let lenses = &mut boxes[holiday_hash(step.label)];
            let slot = lenses.iter().position(|&(label, _)| label == step.label);
            match (step.operation, slot) {
                (Operation::Remove, Some(slot)) => {
                    lenses.remove(slot);
                }
                (Operation::Remove, None) => {}
                (Operation::Insert(focal_length), Some(slot)) => lenses[slot].1 = focal_length,
                (Operation::Insert(focal_length), None) => lenses.push((step.label, focal_length)),
            }
        }

        let power: usize = boxes
            .iter()
            .enumerate()
            .flat_map(|(box_number, lenses)| {
                lenses.iter().enumerate().map(move |(slot, &(_, focal_length))| {
                    (box_number + 1) * (slot + 1) * usize::from(focal_length)
                })
            })
            .sum();
        Ok(power.to_string())
    }
}
