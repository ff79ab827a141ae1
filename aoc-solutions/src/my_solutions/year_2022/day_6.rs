use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.trim().as_bytes())
    }
}

/// Number of characters read once the last `len` were all different
fn find_marker(signal: &[u8], len: usize) -> Result<String, SolveError> {
    // Start of the current run of distinct characters
    let mut start = 0;
    let mut last_seen = [None::<usize>; 256];

    for (i, &c) in signal.iter().enumerate() {
        if let Some(previous) = last_seen[c as usize] {
            start = start.max(previous + 1);
        }
        last_seen[c as usize] = Some(i);
        if i + 1 - start == len {
            return Ok((i + 1).to_string());
        }
    }
    Err(SolveError::failed(format!("no marker of {len} distinct characters")))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 4)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_examples() {
        let cases = [
            ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", "7", "19"),
            ("bvwbjplbgvbhsrlpgdmjqwftvncz", "5", "23"),
            ("nppdvjthqldpwncqszvftbrmjlhg", "6", "23"),
            ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", "10", "29"),
            ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", "11", "26"),
        ];
        for (input, part1, part2) in cases {
            let mut shared = Solver::parse(input).unwrap();
            assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), part1);
            assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), part2);
        }
    }

    #[test]
    fn test_no_marker() {
        let mut shared = Solver::parse("aaaa").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }
}
