use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid"])]
pub struct Solver;

/// Galaxy coordinates split per axis, the distance sum is separable
pub struct Galaxies {
    xs: Vec<u64>,
    ys: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Galaxies;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let image = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let galaxies = image.filter_points(|_, &c| c == '#');
        Ok(Galaxies {
            xs: galaxies.iter().map(|p| p.x as u64).collect(),
            ys: galaxies.iter().map(|p| p.y as u64).collect(),
        })
    }
}

/// Pairwise distance sum along one axis where every coordinate without a
/// galaxy counts `factor` times
fn axis_distance_sum(coordinates: &[u64], factor: u64) -> u64 {
    let mut sorted = coordinates.to_vec();
    sorted.sort_unstable();

    let mut expanded = Vec::with_capacity(sorted.len());
    let mut empty_before = 0;
    for (i, &c) in sorted.iter().enumerate() {
        if i > 0 {
            empty_before += c.saturating_sub(sorted[i - 1] + 1);
        }
        expanded.push(c + empty_before * (factor - 1));
    }

    // Each coordinate is the larger end of `i` pairs and the smaller end of the rest
    let mut prefix = 0;
    let mut total = 0;
    for (i, &c) in expanded.iter().enumerate() {
        total += c * i as u64 - prefix;
        prefix += c;
    }
    total
}

impl Galaxies {
    fn distance_sum(&self, factor: u64) -> u64 {
        axis_distance_sum(&self.xs, factor) + axis_distance_sum(&self.ys, factor)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ...#......
        .......#..
        #.........
        ..........
        ......#...
        .#........
        .........#
        ..........
        .......#..
        #...#.....
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "374");
        assert_eq!(shared.distance_sum(10), 1030);
        assert_eq!(shared.distance_sum(100), 8410);
    }

    #[test]
    fn test_no_galaxies() {
        let mut shared = Solver::parse("...\n...").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }
}
