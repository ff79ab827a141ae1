use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 12, tags = ["2024", "grid", "flood-fill"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    area: usize,
    perimeter: usize,
    /// Equal to the number of straight sides
    corners: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Region>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let garden = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        Ok(regions(&garden))
    }
}

fn regions(garden: &Matrix<char>) -> Vec<Region> {
    let same_plant = |_: Point, a: &char, _: Point, b: &char| a == b;
    let mut assigned = garden.map(|_, _| false);
    let mut found = Vec::new();

    for start in garden.points() {
        if assigned[start] {
            continue;
        }
        let plots: Vec<Point> = garden.distances_from(start, same_plant).into_keys().collect();
        let in_region = |p: Point| garden.get(p) == Some(&garden[start]);

        let mut region = Region {
            area: plots.len(),
            perimeter: 0,
            corners: 0,
        };
        for &p in &plots {
            assigned[p] = true;
            for direction in Direction::ALL {
                if !in_region(p.neighbor(direction)) {
                    region.perimeter += 1;
                }
                // A corner between this direction and the next one clockwise
                let side = p.neighbor(direction);
                let other = p.neighbor(direction.turn_right());
                let diagonal = side + direction.turn_right().vector();
                let outer = !in_region(side) && !in_region(other);
                let inner = in_region(side) && in_region(other) && !in_region(diagonal);
                if outer || inner {
                    region.corners += 1;
                }
            }
        }
        found.push(region);
    }
    found
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.iter().map(|r| r.area * r.perimeter).sum();
        Ok(price.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: usize = shared.iter().map(|r| r.area * r.corners).sum();
        Ok(price.to_string())
    }
}
