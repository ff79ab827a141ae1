use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["2024", "grid", "bfs"])]
pub struct Solver;

const SHORT_CHEAT: i32 = 2;
const LONG_CHEAT: i32 = 20;
const MIN_SAVING: usize = 100;
/// Tracks shorter than this are the puzzle examples
const EXAMPLE_TRACK_LIMIT: usize = 100;
const EXAMPLE_SHORT_SAVING: usize = 1;
const EXAMPLE_LONG_SAVING: usize = 50;

pub struct Racetrack {
    /// Picoseconds from the start to each track tile
    distances: Matrix<Option<usize>>,
    is_example: bool,
}

impl AocParser for Solver {
    type SharedData<'a> = Racetrack;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Matrix::parse_with(input, |c| match c {
            '#' | '.' | 'S' | 'E' => Ok(c),
            _ => Err("unknown track tile"),
        })
        .map_err(|e| invalid(e.to_string()))?;
        let start = map.position(&'S').ok_or_else(|| missing("no start"))?;
        let end = map.position(&'E').ok_or_else(|| missing("no end"))?;

        let reached = map.distances_from(start, |_, _, _, &to| to != '#');
        let base = *reached
            .get(&end)
            .ok_or_else(|| invalid("the end is not reachable without cheating"))?;
        let distances = map.map(|p, _| reached.get(&p).copied());
        Ok(Racetrack {
            distances,
            is_example: base < EXAMPLE_TRACK_LIMIT,
        })
    }
}

impl Racetrack {
    /// Cheats of up to `length` picoseconds saving at least `min_saving`
    fn cheats(&self, length: i32, min_saving: usize) -> usize {
        let offsets: Vec<(Point, usize)> = (-length..=length)
            .flat_map(|dy| (-length..=length).map(move |dx| Point::new(dx, dy)))
            .map(|offset| (offset, offset.manhattan_distance(Point::origin()) as usize))
            .filter(|&(_, cost)| (2..=length as usize).contains(&cost))
            .collect();

        self.distances
            .iter()
            .filter_map(|(p, distance)| distance.map(|d| (p, d)))
            .map(|(from, from_distance)| {
                offsets
                    .iter()
                    .filter(|&&(offset, cost)| {
                        matches!(
                            self.distances.get(from + offset),
                            Some(&Some(to_distance)) if to_distance >= from_distance + cost + min_saving
                        )
                    })
                    .count()
            })
            .sum()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let min_saving = if shared.is_example {
            EXAMPLE_SHORT_SAVING
        } else {
            MIN_SAVING
        };
        Ok(shared.cheats(SHORT_CHEAT, min_saving).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let min_saving = if shared.is_example {
            EXAMPLE_LONG_SAVING
        } else {
            MIN_SAVING
        };
        Ok(shared.cheats(LONG_CHEAT, min_saving).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ###############
        #...#...#.....#
        #.#.#.#.#.###.#
        #S#...#.#.#...#
        #######.#.#.###
        #######.#.#...#
        #######.#.###.#
        ###..E#...#...#
        ###.#######.###
        #...###...#...#
        #.#####.#.###.#
        #.#...#.#.#...#
        #.#.#.#.#.#.###
        #...#...#...###
        ###############
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert!(shared.is_example);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "44");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "285");
    }

    #[test]
    fn test_saving_thresholds() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.cheats(SHORT_CHEAT, 64), 1);
        assert_eq!(shared.cheats(SHORT_CHEAT, 20), 5);
        assert_eq!(shared.cheats(LONG_CHEAT, 76), 3);
    }
}
