use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{DiagonalDirection, Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Matrix<char>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))
    }
}

fn spells(grid: &Matrix<char>, start: Point, step: Point, word: &str) -> bool {
    word.chars()
        .enumerate()
        .all(|(i, c)| grid.get(start + step * i as i32) == Some(&c))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let steps: Vec<Point> = Direction::ALL
            .iter()
            .map(|d| d.vector())
            .chain(DiagonalDirection::ALL.iter().map(|d| d.vector()))
            .collect();
        let found: usize = shared
            .filter_points(|_, &c| c == 'X')
            .into_iter()
            .map(|start| {
                steps
                    .iter()
                    .filter(|&&step| spells(shared, start, step, "XMAS"))
                    .count()
            })
            .sum();
        Ok(found.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Both diagonals through an `A` read `MAS` in either direction
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let is_mas = |a: Point, b: Point| {
            matches!(
                (shared.get(a), shared.get(b)),
                (Some(&'M'), Some(&'S')) | (Some(&'S'), Some(&'M'))
            )
        };
        let crosses = shared.count(|p, &c| {
            c == 'A'
                && is_mas(
                    p.diagonal_neighbor(DiagonalDirection::UpLeft),
                    p.diagonal_neighbor(DiagonalDirection::DownRight),
                )
                && is_mas(
                    p.diagonal_neighbor(DiagonalDirection::UpRight),
                    p.diagonal_neighbor(DiagonalDirection::DownLeft),
                )
        });
        Ok(crosses.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        MMMSXXMASM
        MSAMXMSMSA
        AMXSXMAAMM
        MSAMASMSMX
        XMASAMXAMM
        XXAMMXXAMA
        SMSMSASXSS
        SAXAMASAAA
        MAMMMXMMMM
        MXMXAXMASX
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "18");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "9");
    }
}
