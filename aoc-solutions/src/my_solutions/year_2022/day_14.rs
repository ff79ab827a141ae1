use crate::utils::parse::{invalid, lines};
use crate::utils::point::{Point, parse_points};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["2022", "grid", "simulation"])]
pub struct Solver;

const SAND_SOURCE: Point = Point::new(500, 0);

/// Down, then down-left, then down-right
const FALL_STEPS: [Point; 3] = [Point::new(0, 1), Point::new(-1, 1), Point::new(1, 1)];

pub struct Cave {
    rocks: HashSet<Point>,
    /// The infinite floor, two rows under the lowest rock
    floor_y: i32,
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rocks = HashSet::new();
        for line in lines(input) {
            let corners: Vec<Point> =
                parse_points(line, "->").map_err(|e| invalid(e.to_string()))?;
            for (&from, &to) in corners.iter().tuple_windows() {
                let step = from.vector_towards(to);
                let mut cursor = from;
                rocks.insert(cursor);
                while cursor != to {
                    cursor += step;
                    rocks.insert(cursor);
                }
            }
        }
        let floor_y = rocks
            .iter()
            .map(|p| p.y)
            .max()
            .ok_or_else(|| invalid("no rock paths"))?
            + 2;
        Ok(Cave { rocks, floor_y })
    }
}

impl Cave {
    /// Drops units of sand one at a time until `stop` accepts where one came
    /// to rest; returns how many came to rest including that one
    fn pour(&self, mut stop: impl FnMut(Point) -> bool) -> usize {
        let mut blocked = self.rocks.clone();
        let mut resting = 0;
        loop {
            let mut sand = SAND_SOURCE;
            while let Some(next) = FALL_STEPS
                .iter()
                .map(move |&step| sand + step)
                .find(|p| p.y < self.floor_y && !blocked.contains(p))
            {
                sand = next;
            }
            blocked.insert(sand);
            resting += 1;
            if stop(sand) {
                return resting;
            }
        }
    }
}

impl PartSolver<1> for Solver {
    /// The first unit resting on the floor has fallen past every rock, so it
    /// does not count
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor_y = shared.floor_y;
        Ok((shared.pour(|sand| sand.y == floor_y - 1) - 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.pour(|sand| sand == SAND_SOURCE).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        498,4 -> 498,6 -> 496,6
        503,4 -> 502,4 -> 502,9 -> 494,9
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.rocks.len(), 20);
        assert_eq!(shared.floor_y, 11);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "24");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "93");
    }
}
