use crate::utils::parse::{invalid, lines};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["2022", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// Every single step of the head, in order
    type SharedData<'a> = Vec<Direction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut steps = Vec::new();
        for line in lines(input) {
            let (direction, count) = line
                .split_once(' ')
                .ok_or_else(|| invalid(format!("bad motion {line:?}")))?;
            let direction = direction
                .chars()
                .next()
                .and_then(|c| Direction::try_from(c).ok())
                .ok_or_else(|| invalid(format!("bad direction in {line:?}")))?;
            let count: usize = count
                .parse()
                .map_err(|e| invalid(format!("step count in {line:?}: {e}")))?;
            steps.extend(std::iter::repeat_n(direction, count));
        }
        Ok(steps)
    }
}

/// A knot that is no longer touching the one ahead moves one step towards it,
/// diagonally when they share neither row nor column
fn follow(knot: Point, ahead: Point) -> Point {
    if knot == ahead || knot.is_adjacent_to(ahead) {
        return knot;
    }
    knot + knot.vector_towards(ahead)
}

fn tail_positions(steps: &[Direction], knots: usize) -> usize {
    let mut rope = vec![Point::origin(); knots];
    let mut visited = HashSet::from([Point::origin()]);
    for &direction in steps {
        rope[0] = rope[0].neighbor(direction);
        for i in 1..rope.len() {
            rope[i] = follow(rope[i], rope[i - 1]);
        }
        if let Some(&tail) = rope.last() {
            visited.insert(tail);
        }
    }
    visited.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 10).to_string())
    }
}
