use crate::utils::math::lcm;
use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::Point;
use crate::utils::search::walk;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["2022", "grid", "bfs"])]
pub struct Solver;

/// The walled valley as scanned at minute 0. Blizzards move through it
/// without ever touching each other, so each cell's state at any minute can
/// be read back from where its blizzards started.
pub struct Valley {
    scan: Matrix<char>,
    start: Point,
    goal: Point,
    /// Minutes after which every blizzard is back where it started
    period: usize,
}

fn gap_in_row(scan: &Matrix<char>, y: usize) -> Option<Point> {
    let x = scan.row(y)?.iter().position(|&c| c == '.')?;
    Some(Point::new(x as i32, y as i32))
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let scan = Matrix::parse_with(input, |c| match c {
            '#' | '.' | '^' | '>' | 'v' | '<' => Ok(c),
            _ => Err(format!("unknown valley tile {c:?}")),
        })
        .map_err(|e| invalid(e.to_string()))?;
        if scan.width() < 3 || scan.height() < 3 {
            return Err(invalid("the valley has no room inside its walls"));
        }

        let start = gap_in_row(&scan, 0).ok_or_else(|| missing("no gap in the top wall"))?;
        let goal = gap_in_row(&scan, scan.height() - 1)
            .ok_or_else(|| missing("no gap in the bottom wall"))?;
        let period = lcm(scan.width() - 2, scan.height() - 2);
        Ok(Valley {
            scan,
            start,
            goal,
            period,
        })
    }
}

impl Valley {
    /// Whether `p` is open ground at `minute`
    fn is_clear(&self, p: Point, minute: usize) -> bool {
        match self.scan.get(p) {
            None | Some(&'#') => return false,
            _ if p == self.start || p == self.goal => return true,
            _ => {}
        }

        let (width, height) = (self.scan.width() as i32 - 2, self.scan.height() as i32 - 2);
        let minute = minute as i32;
        let (x, y) = (p.x - 1, p.y - 1);
        let blizzard_from = |x: i32, y: i32, blizzard: char| {
            let origin = Point::new(x.rem_euclid(width) + 1, y.rem_euclid(height) + 1);
            self.scan[origin] == blizzard
        };
        !(blizzard_from(x - minute, y, '>')
            || blizzard_from(x + minute, y, '<')
            || blizzard_from(x, y - minute, 'v')
            || blizzard_from(x, y + minute, '^'))
    }

    /// Fewest minutes to get from `from` to `to`, setting off at `departure`
    fn crossing_time(&self, from: Point, to: Point, departure: usize) -> Option<usize> {
        walk(
            (from, departure % self.period),
            |&(p, minute)| {
                let next = minute + 1;
                std::iter::once(p)
                    .chain(p.orthogonal_neighbors())
                    .filter(move |&q| self.is_clear(q, next))
                    .map(move |q| (q, next % self.period))
                    .collect::<Vec<_>>()
            },
            |&(p, _), minutes| (p == to).then_some(minutes),
        )
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let minutes = shared
            .crossing_time(shared.start, shared.goal, 0)
            .ok_or_else(|| SolveError::failed("the blizzards never let anyone through"))?;
        Ok(minutes.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// There, back for the snacks, and there again
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let legs = [
            (shared.start, shared.goal),
            (shared.goal, shared.start),
            (shared.start, shared.goal),
        ];
        let total = legs.into_iter().try_fold(0, |elapsed, (from, to)| {
            shared
                .crossing_time(from, to, elapsed)
                .map(|minutes| elapsed + minutes)
                .ok_or_else(|| SolveError::failed(format!("no way from {from} to {to}")))
        })?;
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        #.######
        #>>.<^<#
        #.<..<<#
        #>v.><>#
        #<^v^^>#
        ######.#
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.period, 12);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "18");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "54");
    }

    #[test]
    fn test_blizzards_wrap() {
        let valley = Solver::parse(indoc! {"
            #.###
            #>..#
            #...#
            ###.#
        "})
        .unwrap();
        let cell = |x, y| Point::new(x, y);
        assert!(!valley.is_clear(cell(1, 1), 0));
        assert!(!valley.is_clear(cell(3, 1), 2));
        // Back through the left wall on minute 3
        assert!(!valley.is_clear(cell(1, 1), 3));
        assert!(valley.is_clear(cell(2, 1), 3));
        assert!(valley.is_clear(cell(1, 2), 0));
    }

    #[test]
    fn test_missing_gap() {
        assert!(Solver::parse("###\n#.#\n###\n").is_err());
    }
}
