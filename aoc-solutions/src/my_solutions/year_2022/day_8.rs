use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["2022", "grid"])]
pub struct Solver;

/// Heights of the trees from `p` outwards in `direction`, `p` excluded
fn sight_line(trees: &Matrix<u8>, p: Point, direction: Direction) -> impl Iterator<Item = u8> + '_ {
    std::iter::successors(Some(p.neighbor(direction)), move |&q| Some(q.neighbor(direction)))
        .map_while(move |q| trees.get(q).copied())
}

fn is_visible(trees: &Matrix<u8>, p: Point) -> bool {
    let height = trees[p];
    Direction::ALL
        .into_iter()
        .any(|direction| sight_line(trees, p, direction).all(|other| other < height))
}

fn scenic_score(trees: &Matrix<u8>, p: Point) -> usize {
    let height = trees[p];
    Direction::ALL
        .into_iter()
        .map(|direction| {
            let mut seen = 0;
            for other in sight_line(trees, p, direction) {
                seen += 1;
                if other >= height {
                    break;
                }
            }
            seen
        })
        .product()
}

impl AocParser for Solver {
    type SharedData<'a> = Matrix<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_digits(input).map_err(|e| invalid(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count(|p, _| is_visible(shared, p)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .points()
            .map(|p| scenic_score(shared, p))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        30373
        25512
        65332
        33549
        35390
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "21");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "8");
    }

    #[test]
    fn test_scenic_score() {
        let trees = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(scenic_score(&trees, Point::new(2, 1)), 4);
        // Edge trees see nothing in one direction
        assert_eq!(scenic_score(&trees, Point::new(0, 2)), 0);
        assert!(is_visible(&trees, Point::new(0, 2)));
        assert!(!is_visible(&trees, Point::new(2, 2)));
    }
}
