use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::{Direction, Point};
use crate::utils::search::dijkstra_all;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["2024", "grid", "pathfinding"])]
pub struct Solver;

const STEP_COST: u64 = 1;
const TURN_COST: u64 = 1000;

type Reindeer = (Point, Direction);

pub struct Maze {
    walls: Matrix<bool>,
    start: Point,
    end: Point,
    /// Best score to every reachable state, from the start facing east
    from_start: Option<HashMap<Reindeer, u64>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Maze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Matrix::parse_with(input, |c| match c {
            '#' | '.' | 'S' | 'E' => Ok(c),
            _ => Err("unknown maze tile"),
        })
        .map_err(|e| invalid(e.to_string()))?;
        let start = map.position(&'S').ok_or_else(|| missing("no start tile"))?;
        let end = map.position(&'E').ok_or_else(|| missing("no end tile"))?;
        Ok(Maze {
            walls: map.map(|_, &c| c == '#'),
            start,
            end,
            from_start: None,
        })
    }
}

impl Maze {
    fn is_open(&self, p: Point) -> bool {
        self.walls.get(p) == Some(&false)
    }

    /// Moves from a state, walking forwards or, for the reverse search,
    /// backwards
    fn moves(&self, &(p, facing): &Reindeer, backwards: bool) -> Vec<(Reindeer, u64)> {
        let ahead = if backwards {
            p.neighbor(facing.opposite())
        } else {
            p.neighbor(facing)
        };
        let mut moves = vec![
            ((p, facing.turn_left()), TURN_COST),
            ((p, facing.turn_right()), TURN_COST),
        ];
        if self.is_open(ahead) {
            moves.push(((ahead, facing), STEP_COST));
        }
        moves
    }

    fn from_start(&mut self) -> &HashMap<Reindeer, u64> {
        if self.from_start.is_none() {
            let scores = dijkstra_all([(self.start, Direction::Right)], |state| {
                self.moves(state, false)
            });
            self.from_start = Some(scores);
        }
        self.from_start.get_or_insert_default()
    }

    fn best_score(&mut self) -> Option<u64> {
        let end = self.end;
        let scores = self.from_start();
        Direction::ALL
            .iter()
            .filter_map(|&facing| scores.get(&(end, facing)).copied())
            .min()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .best_score()
            .map(|score| score.to_string())
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    /// A tile is on a best path when the score to reach it plus the score
    /// from it to the end equals the best score
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .best_score()
            .ok_or_else(|| SolveError::failed("the end tile is unreachable"))?;

        let ends = Direction::ALL.map(|facing| (shared.end, facing));
        let to_end = dijkstra_all(ends, |state| shared.moves(state, true));
        let from_start = shared
            .from_start
            .as_ref()
            .ok_or_else(|| SolveError::failed("missing scores"))?;

        let tiles: HashSet<Point> = from_start
            .iter()
            .filter(|&(state, score)| {
                to_end
                    .get(state)
                    .is_some_and(|rest| score + rest == best)
            })
            .map(|(&(p, _), _)| p)
            .collect();
        Ok(tiles.len().to_string())
    }
}
