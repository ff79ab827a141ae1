use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

pub struct Lab {
    obstacles: Matrix<bool>,
    start: Point,
    facing: Direction,
    /// Cells on the unobstructed patrol, filled by part 1
    patrol: Option<Vec<Point>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Lab;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let start = map
            .find_point(|_, &c| matches!(c, '^' | '>' | 'v' | '<'))
            .ok_or_else(|| missing("no guard on the map"))?;
        let facing = Direction::try_from(map[start]).map_err(|e| invalid(e.to_string()))?;
        Ok(Lab {
            obstacles: map.map(|_, &c| c == '#'),
            start,
            facing,
            patrol: None,
        })
    }
}

enum Patrol {
    Exits(Vec<Point>),
    Loops,
}

impl Lab {
    fn patrol_with(&self, extra: Option<Point>) -> Patrol {
        let blocked = |p: Point| Some(p) == extra || self.obstacles.get(p) == Some(&true);
        // Bit per direction the guard has left each cell in
        let mut seen = Matrix::new(self.obstacles.width(), self.obstacles.height(), 0u8);
        let mut position = self.start;
        let mut facing = self.facing;
        loop {
            let bit = 1 << facing.index();
            if seen[position] & bit != 0 {
                return Patrol::Loops;
            }
            seen[position] |= bit;

            let ahead = position.neighbor(facing);
            if !self.obstacles.contains(ahead) {
                return Patrol::Exits(seen.filter_points(|_, &bits| bits != 0));
            }
            if blocked(ahead) {
                facing = facing.turn_right();
            } else {
                position = ahead;
            }
        }
    }

    fn patrol(&mut self) -> &[Point] {
        if self.patrol.is_none() {
            let visited = match self.patrol_with(None) {
                Patrol::Exits(visited) => visited,
                Patrol::Loops => Vec::new(),
            };
            self.patrol = Some(visited);
        }
        self.patrol.as_deref().unwrap_or_default()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.patrol().len().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Only cells on the original patrol can change the guard's route
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let candidates = shared.patrol().to_vec();
        let start = shared.start;
        let loops = candidates
            .into_iter()
            .filter(|&p| p != start)
            .filter(|&p| matches!(shared.patrol_with(Some(p)), Patrol::Loops))
            .count();
        Ok(loops.to_string())
    }
}
