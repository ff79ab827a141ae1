use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["2023", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// `/`
    MirrorUp,
    /// `\`
    MirrorDown,
    /// `|`
    SplitVertical,
    /// `-`
    SplitHorizontal,
}

impl TryFrom<char> for Tile {
    type Error = &'static str;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Tile::Empty),
            '/' => Ok(Tile::MirrorUp),
            '\\' => Ok(Tile::MirrorDown),
            '|' => Ok(Tile::SplitVertical),
            '-' => Ok(Tile::SplitHorizontal),
            _ => Err("unknown contraption tile"),
        }
    }
}

impl Tile {
    /// Directions a beam leaves this tile in after entering it heading
    /// `heading`
    fn deflect(self, heading: Direction) -> Vec<Direction> {
        use Direction::*;
        match (self, heading) {
            (Tile::Empty, _) => vec![heading],
            (Tile::MirrorUp, Right) => vec![Up],
            (Tile::MirrorUp, Up) => vec![Right],
            (Tile::MirrorUp, Left) => vec![Down],
            (Tile::MirrorUp, Down) => vec![Left],
            (Tile::MirrorDown, Right) => vec![Down],
            (Tile::MirrorDown, Down) => vec![Right],
            (Tile::MirrorDown, Left) => vec![Up],
            (Tile::MirrorDown, Up) => vec![Left],
            (Tile::SplitVertical, Left | Right) => vec![Up, Down],
            (Tile::SplitHorizontal, Up | Down) => vec![Left, Right],
            (Tile::SplitVertical | Tile::SplitHorizontal, _) => vec![heading],
        }
    }
}

fn energized(contraption: &Matrix<Tile>, start: Point, heading: Direction) -> usize {
    let mut seen: HashSet<(Point, Direction)> = HashSet::new();
    let mut beams = vec![(start, heading)];

    while let Some((p, heading)) = beams.pop() {
        let Some(&tile) = contraption.get(p) else {
            continue;
        };
        if !seen.insert((p, heading)) {
            continue;
        }
        beams.extend(
            tile.deflect(heading)
                .into_iter()
                .map(|next| (p.neighbor(next), next)),
        );
    }

    seen.iter().map(|&(p, _)| p).collect::<HashSet<_>>().len()
}

impl AocParser for Solver {
    type SharedData<'a> = Matrix<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Matrix::parse_with(input, Tile::try_from).map_err(|e| invalid(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(shared, Point::origin(), Direction::Right).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (width, height) = (shared.width() as i32, shared.height() as i32);
        let vertical = (0..width).flat_map(|x| {
            [
                (Point::new(x, 0), Direction::Down),
                (Point::new(x, height - 1), Direction::Up),
            ]
        });
        let horizontal = (0..height).flat_map(|y| {
            [
                (Point::new(0, y), Direction::Right),
                (Point::new(width - 1, y), Direction::Left),
            ]
        });

        let best = vertical
            .chain(horizontal)
            .map(|(start, heading)| energized(shared, start, heading))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}
