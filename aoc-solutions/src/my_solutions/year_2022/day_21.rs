use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["2022", "tree", "recursion"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job<'a> {
    Number(i64),
    Operation(&'a str, char, &'a str),
}

pub struct Monkeys<'a>(HashMap<&'a str, Job<'a>>);

impl AocParser for Solver {
    type SharedData<'a> = Monkeys<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jobs = lines(input)
            .map(|line| -> Result<(&'a str, Job<'a>), ParseError> {
                let (name, job) = line
                    .split_once(": ")
                    .ok_or_else(|| invalid(format!("bad monkey {line:?}")))?;
                let job = match job.split_whitespace().collect::<Vec<_>>()[..] {
                    [number] => Job::Number(
                        number
                            .parse()
                            .map_err(|e| invalid(format!("{line:?}: {e}")))?,
                    ),
                    [left, op @ ("+" | "-" | "*" | "/"), right] => {
                        Job::Operation(left, op.chars().next().unwrap_or('+'), right)
                    }
                    _ => return Err(invalid(format!("bad job {line:?}"))),
                };
                Ok((name, job))
            })
            .collect::<Result<_, _>>()?;
        Ok(Monkeys(jobs))
    }
}

fn apply(left: i64, op: char, right: i64) -> Option<i64> {
    match op {
        '+' => left.checked_add(right),
        '-' => left.checked_sub(right),
        '*' => left.checked_mul(right),
        _ => left.checked_div(right),
    }
}

impl<'a> Monkeys<'a> {
    /// The number `name` yells; `None` when it depends on `unknown` or on a
    /// monkey that does not exist
    fn yell(&self, name: &str, unknown: Option<&str>) -> Option<i64> {
        if Some(name) == unknown {
            return None;
        }
        match *self.0.get(name)? {
            Job::Number(value) => Some(value),
            Job::Operation(left, op, right) => {
                apply(self.yell(left, unknown)?, op, self.yell(right, unknown)?)
            }
        }
    }

    /// Value the human must yell for `name` to yell `target`, walking down
    /// the side of each operation that depends on the human
    fn solve_for_human(&self, name: &str, target: i64) -> Option<i64> {
        if name == HUMAN {
            return Some(target);
        }
        let Job::Operation(left, op, right) = *self.0.get(name)? else {
            return None;
        };
        match (self.yell(left, Some(HUMAN)), self.yell(right, Some(HUMAN))) {
            (None, Some(known)) => {
                let needed = match op {
                    '+' => target - known,
                    '-' => target + known,
                    '*' => target / known,
                    _ => target * known,
                };
                self.solve_for_human(left, needed)
            }
            (Some(known), None) => {
                let needed = match op {
                    '+' => target - known,
                    '-' => known - target,
                    '*' => target / known,
                    _ => known / target,
                };
                self.solve_for_human(right, needed)
            }
            _ => None,
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .yell(ROOT, None)
            .map(|value| value.to_string())
            .ok_or_else(|| SolveError::failed("root cannot be evaluated"))
    }
}

impl PartSolver<2> for Solver {
    /// Root compares its two operands for equality
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let Some(&Job::Operation(left, _, right)) = shared.0.get(ROOT) else {
            return Err(SolveError::failed("root has no operation"));
        };
        let human = match (shared.yell(left, Some(HUMAN)), shared.yell(right, Some(HUMAN))) {
            (None, Some(target)) => shared.solve_for_human(left, target),
            (Some(target), None) => shared.solve_for_human(right, target),
            _ => None,
        };
        human
            .map(|value| value.to_string())
            .ok_or_else(|| SolveError::failed("exactly one side of root must depend on humn"))
    }
}
