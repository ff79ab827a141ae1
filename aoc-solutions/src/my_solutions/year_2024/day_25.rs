use crate::utils::matrix::Matrix;
use crate::utils::parse::{blocks, invalid};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2024, day = 25, tags = ["2024"])]
pub struct Solver;

const PIN: char = '#';
/// Pin heights of a lock and a key fit when every column sums to at most this
const SPACE: usize = 5;

#[derive(Default)]
pub struct Schematics {
    locks: Vec<Vec<usize>>,
    keys: Vec<Vec<usize>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematics;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut schematics = Schematics::default();
        for block in blocks(input) {
            let grid = Matrix::parse_with(block, |c| match c {
                '#' | '.' => Ok(c),
                _ => Err("expected # or ."),
            })
            .map_err(|e| invalid(e.to_string()))?;
            let heights = grid.map_columns(|_, column| {
                column.iter().filter(|&&&c| c == PIN).count().saturating_sub(1)
            });
            // Locks have their top row filled
            if grid.row(0).is_some_and(|row| row.iter().all(|&c| c == PIN)) {
                schematics.locks.push(heights);
            } else {
                schematics.keys.push(heights);
            }
        }
        Ok(schematics)
    }
}

fn fits(lock: &[usize], key: &[usize]) -> bool {
    lock.len() == key.len() && lock.iter().zip(key).all(|(l, k)| l + k <= SPACE)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let pairs = shared
            .locks
            .iter()
            .map(|lock| shared.keys.iter().filter(|key| fits(lock, key)).count())
            .sum::<usize>();
        Ok(pairs.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        #####
        .####
        .####
        .####
        .#.#.
        .#...
        .....

        #####
        ##.##
        .#.##
        ...##
        ...#.
        ...#.
        .....

        .....
        #....
        #....
        #...#
        #.#.#
        #.###
        #####

        .....
        .....
        #.#..
        ###..
        ###.#
        ###.#
        #####

        .....
        .....
        .....
        #....
        #.#..
        #.#.#
        #####
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.locks, vec![vec![0, 5, 3, 4, 3], vec![1, 2, 0, 5, 3]]);
        assert_eq!(shared.keys[0], vec![5, 0, 2, 1, 3]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }
}
