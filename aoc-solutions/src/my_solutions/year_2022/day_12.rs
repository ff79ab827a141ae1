use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["2022", "grid", "search"])]
pub struct Solver;

pub struct HeightMap {
    heights: Matrix<u8>,
    start: Point,
    end: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let chars = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let start = chars.position(&'S').ok_or_else(|| missing("start `S`"))?;
        let end = chars.position(&'E').ok_or_else(|| missing("end `E`"))?;
        let heights = chars.map(|_, &c| match c {
            'S' => 0,
            'E' => 25,
            c => (c as u8).saturating_sub(b'a'),
        });
        Ok(HeightMap { heights, start, end })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .heights
            .shortest_distance(shared.start, shared.end, |_, &from, _, &to| to <= from + 1)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("the summit is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    /// Walks downhill from the summit to the closest lowest square
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .heights
            .breadth_first_search(
                shared.end,
                |_, &from, _, &to| from <= to + 1,
                |_, &height, _| height == 0,
            )
            .map(|result| result.cost.to_string())
            .ok_or_else(|| SolveError::failed("no lowest square reaches the summit"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.start, Point::new(0, 0));
        assert_eq!(shared.end, Point::new(5, 2));
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "31");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "29");
    }

    #[test]
    fn test_missing_end() {
        assert!(matches!(
            Solver::parse("Sab"),
            Err(ParseError::MissingData(_))
        ));
    }
}
