use crate::utils::matrix::Matrix;
use crate::utils::parse::{blocks, invalid, missing};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

const ROBOT: char = '@';
const WALL: char = '#';
const EMPTY: char = '.';
const BOX: char = 'O';
const BOX_LEFT: char = '[';
const BOX_RIGHT: char = ']';

pub struct Warehouse {
    map: Matrix<char>,
    moves: Vec<Direction>,
}

impl AocParser for Solver {
    type SharedData<'a> = Warehouse;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [map, moves] = blocks(input)[..] else {
            return Err(invalid("expected a map and moves separated by a blank line"));
        };
        let map = Matrix::parse_with(map, |c| match c {
            ROBOT | WALL | EMPTY | BOX => Ok(c),
            _ => Err("unknown warehouse tile"),
        })
        .map_err(|e| invalid(e.to_string()))?;
        if map.position(&ROBOT).is_none() {
            return Err(missing("no robot in the warehouse"));
        }
        let moves = moves
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Direction::try_from(c).map_err(|e| invalid(e.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(Warehouse { map, moves })
    }
}

/// Doubles every tile horizontally, boxes become `[]`
fn widen(map: &Matrix<char>) -> Matrix<char> {
    Matrix::from_fn(map.width() * 2, map.height(), |p| {
        let tile = map[Point::new(p.x / 2, p.y)];
        match (tile, p.x % 2) {
            (BOX, 0) => BOX_LEFT,
            (BOX, _) => BOX_RIGHT,
            (ROBOT, 1) => EMPTY,
            (tile, _) => tile,
        }
    })
}

/// Moves the robot one step, pushing every box in the way, or leaves the map
/// untouched when something hits a wall
fn step(map: &mut Matrix<char>, robot: Point, direction: Direction) -> Point {
    let offset = direction.vector();
    let mut moving = vec![robot];
    let mut i = 0;
    while i < moving.len() {
        let next = moving[i] + offset;
        i += 1;
        let partner = match map.get(next) {
            None | Some(&WALL) => return robot,
            Some(&BOX) => None,
            Some(&BOX_LEFT) => Some(next.neighbor(Direction::Right)),
            Some(&BOX_RIGHT) => Some(next.neighbor(Direction::Left)),
            Some(_) => continue,
        };
        for p in std::iter::once(next).chain(partner.filter(|_| direction.is_vertical())) {
            if !moving.contains(&p) {
                moving.push(p);
            }
        }
    }
    // Furthest tiles first so nothing is overwritten
    for &p in moving.iter().rev() {
        map[p + offset] = map[p];
        map[p] = EMPTY;
    }
    robot + offset
}

fn gps_sum(mut map: Matrix<char>, moves: &[Direction]) -> Result<usize, SolveError> {
    let mut robot = map
        .position(&ROBOT)
        .ok_or_else(|| SolveError::failed("no robot"))?;
    for &direction in moves {
        robot = step(&mut map, robot, direction);
    }
    Ok(map
        .filter_points(|_, &tile| tile == BOX || tile == BOX_LEFT)
        .into_iter()
        .map(|p| 100 * p.y as usize + p.x as usize)
        .sum())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        gps_sum(shared.map.clone(), &shared.moves).map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        gps_sum(widen(&shared.map), &shared.moves).map(|sum| sum.to_string())
    }
}
