use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::Point;
use crate::utils::search::walk;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["2023", "grid", "bfs", "math"])]
pub struct Solver;

const ROCK: char = '#';

pub struct Garden {
    /// One tile of the garden, which repeats forever in every direction
    tiles: Matrix<char>,
    start: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = Matrix::parse_with(input, |c| match c {
            '.' | '#' | 'S' => Ok(c),
            _ => Err("expected a garden plot, rock or start"),
        })
        .map_err(|e| invalid(e.to_string()))?;
        let start = tiles
            .position(&'S')
            .ok_or_else(|| missing("no start tile"))?;
        Ok(Garden { tiles, start })
    }
}

impl Garden {
    fn is_rock(&self, p: Point) -> bool {
        let (width, height) = (self.tiles.width() as i32, self.tiles.height() as i32);
        let tile = Point::new(p.x.rem_euclid(width), p.y.rem_euclid(height));
        self.tiles.get(tile) == Some(&ROCK)
    }

    /// Plots that can be the last one after exactly `steps` steps. Stepping
    /// back and forth fills in every plot reached earlier with the same parity.
    fn reachable_plots(&self, steps: usize) -> u64 {
        let mut plots = 0;
        walk(
            self.start,
            |&p: &Point| {
                p.orthogonal_neighbors()
                    .into_iter()
                    .filter(|&next| !self.is_rock(next))
                    .collect::<Vec<_>>()
            },
            |_, distance| {
                if distance > steps {
                    return Some(());
                }
                if distance % 2 == steps % 2 {
                    plots += 1;
                }
                None
            },
        );
        plots
    }

    /// Plots reachable after `steps` steps, fitting a quadratic through the
    /// counts at three step totals that cross the tile's edge 0, 1 and 2
    /// times. Holds for square tiles whose start row and column are free of
    /// rocks, as every real garden is.
    fn extrapolated_plots(&self, steps: usize) -> Result<u64, SolveError> {
        let size = self.tiles.height();
        if self.tiles.width() != size {
            return Err(SolveError::failed("the garden tile is not square"));
        }
        let (tiles, remainder) = (steps / size, steps % size);
        if tiles < 3 {
            return Ok(self.reachable_plots(steps));
        }

        let [y0, y1, y2] =
            [0, 1, 2].map(|crossings| self.reachable_plots(remainder + crossings * size) as i64);
        let a = (y0 - 2 * y1 + y2) / 2;
        let b = (-3 * y0 + 4 * y1 - y2) / 2;
        let x = tiles as i64;
        let plots = a * x * x + b * x + y0;
        u64::try_from(plots)
            .map_err(|_| SolveError::failed("the plot count does not fit a quadratic"))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.reachable_plots(64).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.extrapolated_plots(26_501_365)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ...........
        .....###.#.
        .###.##..#.
        ..#.#...#..
        ....#.#....
        .##..S####.
        .##..#...#.
        .......##..
        .##.#.####.
        .##..##.##.
        ...........
    "};

    #[test]
    fn test_example() {
        let garden = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(garden.reachable_plots(6), 16);
        assert_eq!(garden.reachable_plots(10), 50);
        assert_eq!(garden.reachable_plots(50), 1594);
        assert_eq!(garden.reachable_plots(100), 6536);
    }

    #[test]
    fn test_open_garden_is_quadratic() {
        let open = indoc! {"
            .....
            .....
            ..S..
            .....
            .....
        "};
        let garden = Solver::parse(open).unwrap();
        // Every plot within a diamond of the same parity: (steps + 1)^2
        assert_eq!(garden.reachable_plots(12), 169);
        assert_eq!(garden.extrapolated_plots(52).unwrap(), 53 * 53);
    }

    #[test]
    fn test_rejects_unknown_tile() {
        assert!(Solver::parse("S.x\n").is_err());
        assert!(Solver::parse("...\n").is_err());
    }
}
