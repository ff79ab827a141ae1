use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["2024", "grid", "bfs"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Matrix<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_digits(input).map_err(|e| invalid(e.to_string()))
    }
}

const TRAILHEAD: u8 = 0;
const SUMMIT: u8 = 9;

fn is_uphill(_: Point, from: &u8, _: Point, to: &u8) -> bool {
    *to == from + 1
}

impl PartSolver<1> for Solver {
    /// Summits reachable from each trailhead
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let score: usize = shared
            .filter_points(|_, &height| height == TRAILHEAD)
            .into_iter()
            .map(|start| {
                let mut summits = HashSet::new();
                shared.walk(start, is_uphill, |p, &height, _| {
                    if height == SUMMIT {
                        summits.insert(p);
                    }
                    None::<()>
                });
                summits.len()
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Distinct uphill trails, counted from the summits down
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut trails = shared.map(|_, &height| usize::from(height == SUMMIT));
        for height in (TRAILHEAD..SUMMIT).rev() {
            for p in shared.filter_points(|_, &h| h == height) {
                let count = shared
                    .orthogonal_neighbors(p)
                    .filter(|&n| shared[n] == height + 1)
                    .map(|n| trails[n])
                    .sum();
                trails[p] = count;
            }
        }
        let rating: usize = trails
            .iter()
            .filter(|&(p, _)| shared[p] == TRAILHEAD)
            .map(|(_, &count)| count)
            .sum();
        Ok(rating.to_string())
    }
}
