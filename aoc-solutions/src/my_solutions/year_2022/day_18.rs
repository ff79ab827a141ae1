use crate::utils::parse::invalid;
use crate::utils::point::{Point3D, parse_points_3d};
use crate::utils::search::bfs_distances;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["2022", "search"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Point3D>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let cubes = parse_points_3d(input, "\n").map_err(|e| invalid(e.to_string()))?;
        if cubes.is_empty() {
            return Err(invalid("no cubes"));
        }
        Ok(cubes.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let exposed = shared
            .iter()
            .flat_map(|cube| cube.orthogonal_neighbors())
            .filter(|side| !shared.contains(side))
            .count();
        Ok(exposed.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Floods the air around the droplet inside a box one unit larger than
    /// it; every lava face the flood touches is exterior
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let low = Point3D::new(
            shared.iter().map(|c| c.x).min().unwrap_or(0) - 1,
            shared.iter().map(|c| c.y).min().unwrap_or(0) - 1,
            shared.iter().map(|c| c.z).min().unwrap_or(0) - 1,
        );
        let high = Point3D::new(
            shared.iter().map(|c| c.x).max().unwrap_or(0) + 1,
            shared.iter().map(|c| c.y).max().unwrap_or(0) + 1,
            shared.iter().map(|c| c.z).max().unwrap_or(0) + 1,
        );

        let outside = bfs_distances(low, |air: &Point3D| {
            air.orthogonal_neighbors()
                .into_iter()
                .filter(|n| n.is_between(low, high) && !shared.contains(n))
                .collect::<Vec<_>>()
        });

        let exterior = outside
            .keys()
            .flat_map(|air| air.orthogonal_neighbors())
            .filter(|n| shared.contains(n))
            .count();
        Ok(exterior.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        2,2,2
        1,2,2
        3,2,2
        2,1,2
        2,3,2
        2,2,1
        2,2,3
        2,2,4
        2,2,6
        1,2,5
        3,2,5
        2,1,5
        2,3,5
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "64");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "58");
    }

    #[test]
    fn test_two_adjacent_cubes() {
        let mut shared = Solver::parse("1,1,1\n2,1,1").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "10");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "10");
    }
}
