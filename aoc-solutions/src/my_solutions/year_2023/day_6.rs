use crate::utils::math::quadratic_roots;
use crate::utils::parse::{invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

pub struct Races<'a> {
    time_line: &'a str,
    distance_line: &'a str,
}

impl AocParser for Solver {
    type SharedData<'a> = Races<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = lines(input).map(|line| line.split_once(':').map_or(line, |(_, rest)| rest));
        match (lines.next(), lines.next()) {
            (Some(time_line), Some(distance_line)) => Ok(Races {
                time_line,
                distance_line,
            }),
            _ => Err(invalid("expected a time line and a distance line")),
        }
    }
}

/// Whole hold times that travel strictly further than `record`.
///
/// Holding for `h` out of `time` covers `h * (time - h)`, which is symmetric
/// around `time / 2`, so the winning holds are `first..=time - first`. The
/// lower root of `-h^2 + time*h - record` gives the first guess for `first`.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let beats = |hold: u64| u128::from(hold) * u128::from(time - hold) > u128::from(record);
    let middle = time / 2;
    if !beats(middle) {
        return 0;
    }

    let mut first = quadratic_roots(-1.0, time as f64, -(record as f64))
        .map_or(0, |(low, _)| (low.floor().max(0.0) as u64).min(middle));
    // Nudge away from float rounding at the bound
    while first > 0 && beats(first - 1) {
        first -= 1;
    }
    while !beats(first) {
        first += 1;
    }
    time - 2 * first + 1
}

fn parse_line(line: &str) -> Result<Vec<u64>, SolveError> {
    unsigned_numbers(line).map_err(|e| SolveError::failed(e.to_string()))
}

/// Reads the line as one number, ignoring the spaces between digits
fn parse_kerned(line: &str) -> Result<u64, SolveError> {
    line.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .map_err(|e| SolveError::failed(format!("{line:?}: {e}")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let times = parse_line(shared.time_line)?;
        let records = parse_line(shared.distance_line)?;
        if times.len() != records.len() {
            return Err(SolveError::failed("times and distances differ in length"));
        }
        let product: u64 = times
            .iter()
            .zip(&records)
            .map(|(&time, &record)| ways_to_win(time, record))
            .product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let time = parse_kerned(shared.time_line)?;
        let record = parse_kerned(shared.distance_line)?;
        Ok(ways_to_win(time, record).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Time:      7  15   30
        Distance:  9  40  200
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "288");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "71503");
    }

    #[test]
    fn test_exact_roots_are_excluded() {
        // Holding 10 or 20 ties the record of 200
        assert_eq!(ways_to_win(30, 200), 9);
        assert_eq!(ways_to_win(4, 4), 0);
        assert_eq!(ways_to_win(3, 100), 0);
    }

    #[test]
    fn test_zero_length_race() {
        assert_eq!(ways_to_win(0, 0), 0);
        assert_eq!(ways_to_win(1, 0), 0);
        assert_eq!(ways_to_win(2, 0), 1);

        let mut shared = Solver::parse("Time: 0 7\nDistance: 0 9\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4");
    }
}
