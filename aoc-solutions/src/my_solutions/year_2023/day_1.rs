use crate::utils::parse::lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "parsing"])]
pub struct Solver;

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(lines(input).collect())
    }
}

/// Digit starting at byte `i` of `line`; spelled-out words count when
/// `spelled` is set ("eightwo" holds both 8 and 2)
fn digit_at(line: &str, i: usize, spelled: bool) -> Option<u32> {
    let rest = &line.as_bytes()[i..];
    if let Some(d) = rest.first().and_then(|&b| (b as char).to_digit(10)) {
        return Some(d);
    }
    if !spelled {
        return None;
    }
    SPELLED_DIGITS
        .iter()
        .position(|word| rest.starts_with(word.as_bytes()))
        .map(|index| index as u32 + 1)
}

fn calibration_sum(lines: &[&str], spelled: bool) -> Result<String, SolveError> {
    let mut total = 0;
    for line in lines {
        let mut digits = (0..line.len()).filter_map(|i| digit_at(line, i, spelled));
        let first = digits
            .next()
            .ok_or_else(|| SolveError::failed(format!("no digit in {line:?}")))?;
        let last = digits.last().unwrap_or(first);
        total += first * 10 + last;
    }
    Ok(total.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(indoc! {"
            1abc2
            pqr3stu8vwx
            a1b2c3d4e5f
            treb7uchet
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "142");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(indoc! {"
            two1nine
            eightwothree
            abcone2threexyz
            xtwone3four
            4nineeightseven2
            zoneight234
            7pqrstsixteen
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "281");
        // Spelled digits are ignored in part 1
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_overlapping_words() {
        let mut shared = Solver::parse("eightwo").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "82");
    }
}
