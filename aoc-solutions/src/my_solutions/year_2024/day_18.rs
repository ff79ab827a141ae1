use crate::utils::matrix::Matrix;
use crate::utils::parse::lines;
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["2024", "grid", "bfs", "binary-search"])]
pub struct Solver;

const EXAMPLE_SIZE: usize = 7;
const EXAMPLE_FALLEN: usize = 12;
const SIZE: usize = 71;
const FALLEN: usize = 1024;

pub struct MemorySpace {
    bytes: Vec<Point>,
    size: usize,
    fallen: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = MemorySpace;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bytes = lines(input)
            .map(|line| {
                line.parse::<Point>()
                    .map_err(|e| ParseError::InvalidFormat(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let (size, fallen) = if bytes.len() < FALLEN {
            (EXAMPLE_SIZE, EXAMPLE_FALLEN)
        } else {
            (SIZE, FALLEN)
        };
        Ok(MemorySpace {
            bytes,
            size,
            fallen,
        })
    }
}

impl MemorySpace {
    /// Steps from the top-left to the bottom-right corner once the first
    /// `fallen` bytes are corrupted
    fn shortest_exit(&self, fallen: usize) -> Option<usize> {
        let mut corrupted = Matrix::new(self.size, self.size, false);
        for &byte in self.bytes.iter().take(fallen) {
            corrupted.set(byte, true);
        }
        let exit = Point::new(self.size as i32 - 1, self.size as i32 - 1);
        corrupted.shortest_distance(Point::origin(), exit, |_, _, _, &blocked| !blocked)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .shortest_exit(shared.fallen)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("the exit is already cut off"))
    }
}

impl PartSolver<2> for Solver {
    /// Binary search for the first byte after which the exit is unreachable
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (mut reachable, mut blocked) = (0, shared.bytes.len());
        if shared.shortest_exit(blocked).is_some() {
            return Err(SolveError::failed("the exit is never cut off"));
        }
        while blocked - reachable > 1 {
            let middle = (reachable + blocked) / 2;
            if shared.shortest_exit(middle).is_some() {
                reachable = middle;
            } else {
                blocked = middle;
            }
        }
        Ok(shared.bytes[blocked - 1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        5,4
        4,2
        4,5
        3,0
        2,1
        6,3
        2,4
        1,5
        0,6
        3,3
        2,6
        5,1
        1,2
        5,5
        2,5
        6,5
        1,4
        0,4
        6,4
        1,1
        6,1
        1,0
        0,5
        1,6
        2,0
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!((shared.size, shared.fallen), (EXAMPLE_SIZE, EXAMPLE_FALLEN));
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "22");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "6,1");
    }
}
