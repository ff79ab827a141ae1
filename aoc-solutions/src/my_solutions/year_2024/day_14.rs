use crate::utils::parse::{fixed_numbers, lines};
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 14, tags = ["2024", "simulation"])]
pub struct Solver;

const EXAMPLE_ROBOTS: usize = 12;
const EXAMPLE_AREA: Point = Point::new(11, 7);
const AREA: Point = Point::new(101, 103);
const SECONDS: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    position: Point,
    velocity: Point,
}

pub struct Bathroom {
    robots: Vec<Robot>,
    area: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = Bathroom;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let robots = lines(input)
            .map(|line| {
                fixed_numbers::<i32, 4>(line).map(|[px, py, vx, vy]| Robot {
                    position: Point::new(px, py),
                    velocity: Point::new(vx, vy),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let area = if robots.len() == EXAMPLE_ROBOTS {
            EXAMPLE_AREA
        } else {
            AREA
        };
        Ok(Bathroom { robots, area })
    }
}

impl Bathroom {
    fn positions_after(&self, seconds: i32) -> impl Iterator<Item = Point> + '_ {
        self.robots.iter().map(move |robot| {
            let moved = robot.position + robot.velocity * seconds;
            Point::new(moved.x.rem_euclid(self.area.x), moved.y.rem_euclid(self.area.y))
        })
    }

    fn safety_factor(&self, seconds: i32) -> usize {
        let (mid_x, mid_y) = (self.area.x / 2, self.area.y / 2);
        let mut quadrants = [0; 4];
        for p in self.positions_after(seconds) {
            if p.x == mid_x || p.y == mid_y {
                continue;
            }
            quadrants[usize::from(p.x > mid_x) + 2 * usize::from(p.y > mid_y)] += 1;
        }
        quadrants.iter().product()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.safety_factor(SECONDS).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// First second where no two robots overlap; positions repeat after
    /// `width * height` seconds
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let period = shared.area.x * shared.area.y;
        (0..period)
            .find(|&seconds| {
                let mut seen = HashSet::with_capacity(shared.robots.len());
                shared.positions_after(seconds).all(|p| seen.insert(p))
            })
            .map(|seconds| seconds.to_string())
            .ok_or_else(|| SolveError::failed("robots always overlap"))
    }
}
