use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "bfs", "geometry"])]
pub struct Solver;

/// The two directions a pipe connects, empty for ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pipe(&'static [Direction]);

const GROUND: Pipe = Pipe(&[]);

/// Tiles the start tile can stand for
const SHAPES: [Pipe; 6] = [
    Pipe(&[Direction::Up, Direction::Down]),
    Pipe(&[Direction::Left, Direction::Right]),
    Pipe(&[Direction::Up, Direction::Right]),
    Pipe(&[Direction::Up, Direction::Left]),
    Pipe(&[Direction::Down, Direction::Left]),
    Pipe(&[Direction::Down, Direction::Right]),
];

impl Pipe {
    fn from_tile(c: char) -> Result<Self, &'static str> {
        match c {
            '|' => Ok(SHAPES[0]),
            '-' => Ok(SHAPES[1]),
            'L' => Ok(SHAPES[2]),
            'J' => Ok(SHAPES[3]),
            '7' => Ok(SHAPES[4]),
            'F' => Ok(SHAPES[5]),
            '.' | 'S' => Ok(GROUND),
            _ => Err("unknown pipe tile"),
        }
    }

    fn connects(self, direction: Direction) -> bool {
        self.0.contains(&direction)
    }
}

pub struct PipeMaze {
    pipes: Matrix<Pipe>,
    /// Steps from the start along the loop, for every loop tile
    distances: HashMap<Point, usize>,
}

impl AocParser for Solver {
    type SharedData<'a> = PipeMaze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let start = tiles
            .position(&'S')
            .ok_or_else(|| missing("no start tile"))?;
        let mut pipes = Matrix::parse_with(input, Pipe::from_tile)
            .map_err(|e| invalid(e.to_string()))?;

        let shape = SHAPES
            .into_iter()
            .find(|shape| {
                shape.0.iter().all(|&direction| {
                    pipes
                        .get(start.neighbor(direction))
                        .is_some_and(|pipe| pipe.connects(direction.opposite()))
                })
            })
            .ok_or_else(|| invalid(format!("start tile at {start} is not on a loop")))?;
        pipes.set(start, shape);

        let distances = pipes.distances_from(start, |from, from_pipe, to, to_pipe| {
            Direction::ALL.into_iter().any(|direction| {
                from.neighbor(direction) == to
                    && from_pipe.connects(direction)
                    && to_pipe.connects(direction.opposite())
            })
        });

        Ok(PipeMaze { pipes, distances })
    }
}

impl PipeMaze {
    /// Scans each row left to right and flips inside/outside on every loop
    /// tile with a northward connection
    fn enclosed_tiles(&self) -> usize {
        let mut enclosed = 0;
        for y in 0..self.pipes.height() {
            let mut inside = false;
            for x in 0..self.pipes.width() {
                let p = Point::new(x as i32, y as i32);
                if !self.distances.contains_key(&p) {
                    enclosed += usize::from(inside);
                } else if self.pipes[p].connects(Direction::Up) {
                    inside = !inside;
                }
            }
        }
        enclosed
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let farthest = shared.distances.values().max().copied().unwrap_or(0);
        Ok(farthest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.enclosed_tiles().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    #[test]
    fn test_farthest_point() {
        let simple = indoc! {"
            -L|F7
            7S-7|
            L|7||
            -L-J|
            L|-JF
        "};
        let mut shared = Solver::parse(simple).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");

        let complex = indoc! {"
            7-F7-
            .FJ|7
            SJLL7
            |F--J
            LJ.LJ
        "};
        let mut shared = Solver::parse(complex).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
    }

    #[test]
    fn test_enclosed_tiles() {
        let squeezed = indoc! {"
            ..........
            .S------7.
            .|F----7|.
            .||....||.
            .||....||.
            .|L-7F-J|.
            .|..||..|.
            .L--JL--J.
            ..........
        "};
        let mut shared = Solver::parse(squeezed).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4");

        let larger = indoc! {"
            FF7FSF7F7F7F7F7F---7
            L|LJ||||||||||||F--J
            FL-7LJLJ||||||LJL-77
            F--JF--7||LJLJ7F7FJ-
            L---JF-JLJ.||-FJLJJ7
            |F|F-JF---7F7-L7L|7|
            |FFJF7L7F-JF7|JL---7
            7-L-JL7||F7|L7F-7F7|
            L.L7LFJ|||||FJL7||LJ
            L7JLJL-JLJLJL--JLJ.L
        "};
        let mut shared = Solver::parse(larger).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "10");
    }

    #[test]
    fn test_start_off_loop() {
        assert!(Solver::parse("S..\n...\n").is_err());
    }
}
