use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::{Itertools, MinMaxResult};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 23, tags = ["2022", "grid", "simulation", "cellular-automaton"])]
pub struct Solver;

/// Proposal order of the first round; it rotates by one every round
const PROPOSALS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// The cell one step towards `direction` and the two diagonals beside it
fn looking_towards(p: Point, direction: Direction) -> [Point; 3] {
    let ahead = p.neighbor(direction);
    [
        ahead,
        ahead.neighbor(direction.turn_left()),
        ahead.neighbor(direction.turn_right()),
    ]
}

#[derive(Clone)]
pub struct Grove {
    elves: HashSet<Point>,
    round: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Grove;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let scan = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let elves = scan.filter_points(|_, &c| c == '#').into_iter().collect();
        Ok(Grove { elves, round: 0 })
    }
}

impl Grove {
    /// Plays one round and returns how many elves moved
    fn play_round(&mut self) -> usize {
        let order = (0..4).map(|i| PROPOSALS[(self.round + i) % 4]).collect_vec();
        self.round += 1;

        let mut proposals: HashMap<Point, Vec<Point>> = HashMap::new();
        for &elf in &self.elves {
            if !elf.all_neighbors().iter().any(|p| self.elves.contains(p)) {
                continue;
            }
            let target = order.iter().find(|&&direction| {
                looking_towards(elf, direction)
                    .iter()
                    .all(|p| !self.elves.contains(p))
            });
            if let Some(&direction) = target {
                proposals.entry(elf.neighbor(direction)).or_default().push(elf);
            }
        }

        let mut moved = 0;
        for (target, elves) in proposals {
            if let [elf] = elves[..] {
                self.elves.remove(&elf);
                self.elves.insert(target);
                moved += 1;
            }
        }
        moved
    }

    /// Empty ground tiles in the smallest rectangle holding every elf
    fn empty_ground(&self) -> usize {
        let span = |values: MinMaxResult<i32>| match values {
            MinMaxResult::NoElements => 0,
            MinMaxResult::OneElement(_) => 1,
            MinMaxResult::MinMax(min, max) => (max - min + 1) as usize,
        };
        let width = span(self.elves.iter().map(|p| p.x).minmax());
        let height = span(self.elves.iter().map(|p| p.y).minmax());
        width * height - self.elves.len()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grove = shared.clone();
        for _ in 0..10 {
            grove.play_round();
        }
        Ok(grove.empty_ground().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grove = shared.clone();
        while grove.play_round() > 0 {}
        Ok(grove.round.to_string())
    }
}
