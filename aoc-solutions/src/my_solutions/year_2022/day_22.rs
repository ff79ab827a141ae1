use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 22, tags = ["2022", "grid", "simulation", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Void,
    Open,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Forward(u32),
    TurnLeft,
    TurnRight,
}

pub struct Notes {
    board: Matrix<Tile>,
    path: Vec<Instruction>,
}

/// Face positions, in face-sized units, of the net every real input folds
/// its cube from
const CUBE_NET: [(i32, i32); 6] = [(1, 0), (2, 0), (1, 1), (0, 2), (1, 2), (0, 3)];

fn instruction_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\d+|[LR]").unwrap())
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Leading spaces on the board are significant
        let mut all_lines = input.lines().skip_while(|line| line.trim().is_empty());
        let board_lines: Vec<&str> = all_lines
            .by_ref()
            .take_while(|line| !line.trim().is_empty())
            .collect();
        let path_line = all_lines
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| missing("no path below the board"))?;

        let width = board_lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let rows = board_lines
            .iter()
            .map(|line| {
                line.chars()
                    .chain(std::iter::repeat(' '))
                    .take(width)
                    .map(|c| match c {
                        ' ' => Ok(Tile::Void),
                        '.' => Ok(Tile::Open),
                        '#' => Ok(Tile::Wall),
                        _ => Err(invalid(format!("unknown board tile {c:?}"))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let board = Matrix::from_rows(rows).map_err(|e| invalid(e.to_string()))?;

        let path = instruction_regex()
            .find_iter(path_line)
            .map(|m| match m.as_str() {
                "L" => Ok(Instruction::TurnLeft),
                "R" => Ok(Instruction::TurnRight),
                steps => steps
                    .parse()
                    .map(Instruction::Forward)
                    .map_err(|e| invalid(format!("step count {steps:?}: {e}"))),
            })
            .collect::<Result<_, _>>()?;

        Ok(Notes { board, path })
    }
}

type Walker = (Point, Direction);

impl Notes {
    fn is_on_board(&self, p: Point) -> bool {
        self.board.get(p).is_some_and(|&tile| tile != Tile::Void)
    }

    /// Flat wrapping: leaving the board re-enters on the far side of the same
    /// row or column
    fn wrap_flat(&self, (p, facing): Walker) -> Option<Walker> {
        let back = facing.opposite();
        let mut entry = p;
        while self.is_on_board(entry.neighbor(back)) {
            entry = entry.neighbor(back);
        }
        Some((entry, facing))
    }

    /// Side length of a cube face, when the board is folded from the
    /// expected net
    fn face_size(&self) -> Option<i32> {
        let cells = self.board.count(|_, &tile| tile != Tile::Void);
        let size = ((cells / 6) as f64).sqrt() as i32;
        let faces: BTreeSet<(i32, i32)> = self
            .board
            .filter_points(|_, &tile| tile != Tile::Void)
            .into_iter()
            .map(|p| (p.x / size.max(1), p.y / size.max(1)))
            .collect();
        (size > 0 && size * size * 6 == cells as i32 && faces == CUBE_NET.into_iter().collect())
            .then_some(size)
    }

    /// Cube wrapping across the edges of the net, with `n` the face size
    fn wrap_cube(n: i32, (p, facing): Walker) -> Option<Walker> {
        use Direction::*;
        let (lx, ly) = (p.x % n, p.y % n);
        let (x, y, facing) = match ((p.x / n, p.y / n), facing) {
            ((1, 0), Up) => (0, 3 * n + lx, Right),
            ((0, 3), Left) => (n + ly, 0, Down),
            ((2, 0), Up) => (lx, 4 * n - 1, Up),
            ((0, 3), Down) => (2 * n + lx, 0, Down),
            ((2, 0), Right) => (2 * n - 1, 3 * n - 1 - ly, Left),
            ((1, 2), Right) => (3 * n - 1, n - 1 - ly, Left),
            ((2, 0), Down) => (2 * n - 1, n + lx, Left),
            ((1, 1), Right) => (2 * n + ly, n - 1, Up),
            ((1, 0), Left) => (0, 3 * n - 1 - ly, Right),
            ((0, 2), Left) => (n, n - 1 - ly, Right),
            ((1, 1), Left) => (ly, 2 * n, Down),
            ((0, 2), Up) => (n, n + lx, Right),
            ((1, 2), Down) => (n - 1, 3 * n + lx, Left),
            ((0, 3), Right) => (n + ly, 3 * n - 1, Up),
            _ => return None,
        };
        Some((Point::new(x, y), facing))
    }

    /// Final password, `wrap` deciding where a step off the board lands
    fn walk(&self, wrap: impl Fn(Walker) -> Option<Walker>) -> Result<usize, SolveError> {
        let start = self
            .board
            .row(0)
            .and_then(|row| row.iter().position(|&tile| tile == Tile::Open))
            .ok_or_else(|| SolveError::failed("no open tile on the top row"))?;
        let (mut p, mut facing) = (Point::new(start as i32, 0), Direction::Right);

        for &instruction in &self.path {
            match instruction {
                Instruction::TurnLeft => facing = facing.turn_left(),
                Instruction::TurnRight => facing = facing.turn_right(),
                Instruction::Forward(steps) => {
                    for _ in 0..steps {
                        let ahead = p.neighbor(facing);
                        let (next, next_facing) = if self.is_on_board(ahead) {
                            (ahead, facing)
                        } else {
                            wrap((p, facing)).ok_or_else(|| {
                                SolveError::failed(format!("no edge to wrap across at {p}"))
                            })?
                        };
                        if self.board[next] == Tile::Wall {
                            break;
                        }
                        (p, facing) = (next, next_facing);
                    }
                }
            }
        }

        let facing_score = (facing.index() + 3) % 4;
        Ok(1000 * (p.y as usize + 1) + 4 * (p.x as usize + 1) + facing_score)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let password = shared.walk(|walker| shared.wrap_flat(walker))?;
        Ok(password.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let n = shared
            .face_size()
            .ok_or_else(|| SolveError::failed("the board does not fold along the expected net"))?;
        let password = shared.walk(|walker| Notes::wrap_cube(n, walker))?;
        Ok(password.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
                ...#
                .#..
                #...
                ....
        ...#.......#
        ........#...
        ..#....#....
        ..........#.
                ...#....
                .....#..
                .#......
                ......#.

        10R5L5R10L4R5L5
    "};

    /// Wall-free board on the expected net with faces of side `n`
    fn open_cube(n: usize, path: &str) -> String {
        let mut board = String::new();
        for row in 0..4 {
            for _ in 0..n {
                for column in 0..3 {
                    let on_net = CUBE_NET.contains(&(column, row));
                    board.push_str(&(if on_net { "." } else { " " }).repeat(n));
                }
                board.push('\n');
            }
        }
        format!("{board}\n{path}\n")
    }

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6032");
        // The example folds from a different net
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_cube_round_trips() {
        // Walking four faces straight in any direction comes back to the start
        for path in ["16", "R16", "L16", "RR16", "16R16R16R16"] {
            let mut shared = Solver::parse(&open_cube(4, path)).unwrap();
            let facing = match path {
                "R16" => 1,
                "L16" => 3,
                "RR16" => 2,
                "16R16R16R16" => 3,
                _ => 0,
            };
            assert_eq!(
                Solver::solve_part(&mut shared, 2).unwrap(),
                (1000 + 4 * 5 + facing).to_string(),
                "path {path}"
            );
        }
    }

    #[test]
    fn test_cube_edges_are_inverse() {
        let n = 4;
        let board = Solver::parse(&open_cube(4, "1")).unwrap();
        for p in board.board.filter_points(|_, &tile| tile == Tile::Open) {
            for facing in Direction::ALL {
                if board.is_on_board(p.neighbor(facing)) {
                    continue;
                }
                let (q, arriving) = Notes::wrap_cube(n, (p, facing)).unwrap();
                assert!(board.is_on_board(q), "{p} {facing:?} lands off the board");
                let (back, leaving) = Notes::wrap_cube(n, (q, arriving.opposite())).unwrap();
                assert_eq!((back, leaving), (p, facing.opposite()));
            }
        }
    }
}
