use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["2023", "grid", "simulation"])]
pub struct Solver;

const ROUND: u8 = b'O';
const CUBE: u8 = b'#';
const EMPTY: u8 = b'.';

const SPIN_CYCLES: usize = 1_000_000_000;
const SPIN: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

impl AocParser for Solver {
    type SharedData<'a> = Matrix<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_with(input, |c| match c {
            'O' | '#' | '.' => Ok(c as u8),
            _ => Err("expected O, # or ."),
        })
        .map_err(|e| invalid(e.to_string()))
    }
}

/// Lines of points running away from the wall the rocks roll towards
fn lines_from_wall(width: i32, height: i32, towards: Direction) -> Vec<Vec<Point>> {
    match towards {
        Direction::Up => (0..width)
            .map(|x| (0..height).map(|y| Point::new(x, y)).collect())
            .collect(),
        Direction::Down => (0..width)
            .map(|x| (0..height).rev().map(|y| Point::new(x, y)).collect())
            .collect(),
        Direction::Left => (0..height)
            .map(|y| (0..width).map(|x| Point::new(x, y)).collect())
            .collect(),
        Direction::Right => (0..height)
            .map(|y| (0..width).rev().map(|x| Point::new(x, y)).collect())
            .collect(),
    }
}

fn tilt(platform: &mut Matrix<u8>, towards: Direction) {
    let lines = lines_from_wall(platform.width() as i32, platform.height() as i32, towards);
    for line in lines {
        let mut free = 0;
        for (i, &p) in line.iter().enumerate() {
            match platform[p] {
                CUBE => free = i + 1,
                ROUND => {
                    platform[p] = EMPTY;
                    platform[line[free]] = ROUND;
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn north_load(platform: &Matrix<u8>) -> usize {
    let height = platform.height();
    platform.fold(0, |load, p, &cell| {
        if cell == ROUND {
            load + height - p.y as usize
        } else {
            load
        }
    })
}

fn spin(platform: &mut Matrix<u8>) {
    for towards in SPIN {
        tilt(platform, towards);
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        tilt(&mut platform, Direction::Up);
        Ok(north_load(&platform).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Spins until a layout repeats, then skips ahead by whole cycles
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        let mut seen: HashMap<Matrix<u8>, usize> = HashMap::new();
        let mut history: Vec<Matrix<u8>> = Vec::new();

        for done in 0..SPIN_CYCLES {
            if let Some(&first) = seen.get(&platform) {
                let period = done - first;
                let last = &history[first + (SPIN_CYCLES - first) % period];
                return Ok(north_load(last).to_string());
            }
            seen.insert(platform.clone(), done);
            history.push(platform.clone());
            spin(&mut platform);
        }
        Ok(north_load(&platform).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        O....#....
        O.OO#....#
        .....##...
        OO.#O....O
        .O.....O#.
        O.#..O.#.#
        ..O..#O..O
        .......O..
        #....###..
        #OO..#....
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "136");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "64");
    }

    #[test]
    fn test_one_spin() {
        let mut platform = Solver::parse(EXAMPLE).unwrap();
        spin(&mut platform);
        let expected = Solver::parse(indoc! {"
            .....#....
            ....#...O#
            ...OO##...
            .OO#......
            .....OOO#.
            .O#...O#.#
            ....O#....
            ......OOOO
            #...O###..
            #..OO#....
        "})
        .unwrap();
        assert_eq!(platform, expected);
    }

    #[test]
    fn test_rejects_unknown_cells() {
        assert!(Solver::parse("O.x").is_err());
    }
}
