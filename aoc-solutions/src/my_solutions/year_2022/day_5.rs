use crate::utils::parse::{fixed_numbers, invalid, missing};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022", "parsing", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
struct Move {
    count: usize,
    from: usize,
    to: usize,
}

pub struct Cargo {
    /// Bottom crate first
    stacks: Vec<Vec<char>>,
    moves: Vec<Move>,
}

/// Crate rows drawn above a numbered base line; crate labels sit in every
/// fourth column starting at 1
fn parse_stacks(drawing: &[&str]) -> Result<Vec<Vec<char>>, ParseError> {
    let (base, rows) = drawing
        .split_last()
        .ok_or_else(|| missing("no crate drawing"))?;
    let count = base.split_whitespace().count();
    let mut stacks = vec![Vec::new(); count];

    for row in rows.iter().rev() {
        for (index, label) in row.chars().skip(1).step_by(4).enumerate() {
            if label == ' ' {
                continue;
            }
            stacks
                .get_mut(index)
                .ok_or_else(|| invalid(format!("crate {label} beyond the last stack")))?
                .push(label);
        }
    }
    Ok(stacks)
}

impl AocParser for Solver {
    type SharedData<'a> = Cargo;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Leading spaces in the drawing are significant
        let mut all_lines = input.lines().skip_while(|line| line.trim().is_empty());
        let drawing: Vec<&str> = all_lines
            .by_ref()
            .take_while(|line| !line.trim().is_empty())
            .collect();
        let stacks = parse_stacks(&drawing)?;

        let moves = all_lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| -> Result<Move, ParseError> {
                let [count, from, to] = fixed_numbers::<usize, 3>(line)?;
                if !(1..=stacks.len()).contains(&from) || !(1..=stacks.len()).contains(&to) {
                    return Err(invalid(format!("move {line:?} names an unknown stack")));
                }
                Ok(Move {
                    count,
                    from: from - 1,
                    to: to - 1,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Cargo { stacks, moves })
    }
}

impl Cargo {
    /// Top crates after every move; `keep_order` lifts all crates of a move
    /// at once instead of one by one
    fn rearrange(&self, keep_order: bool) -> Result<String, SolveError> {
        let mut stacks = self.stacks.clone();
        for (step, &Move { count, from, to }) in self.moves.iter().enumerate() {
            let height = stacks[from].len();
            if count > height {
                return Err(SolveError::failed(format!(
                    "move {} lifts {count} crates from a stack of {height}",
                    step + 1
                )));
            }
            let mut lifted = stacks[from].split_off(height - count);
            if !keep_order {
                lifted.reverse();
            }
            stacks[to].extend(lifted);
        }
        Ok(stacks.iter().filter_map(|stack| stack.last()).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n\nmove 1 from 2 to 1\nmove 3 from 1 to 3\nmove 2 from 2 to 1\nmove 1 from 1 to 2\n";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.stacks, vec![vec!['Z', 'N'], vec!['M', 'C', 'D'], vec!['P']]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "CMZ");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "MCD");
    }

    #[test]
    fn test_overdrawn_stack() {
        let input = "[A]\n 1 \n\nmove 2 from 1 to 1\n";
        let mut shared = Solver::parse(input).unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_unknown_stack() {
        assert!(Solver::parse("[A]\n 1 \n\nmove 1 from 1 to 2\n").is_err());
    }
}
