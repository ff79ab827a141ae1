//! Input splitting and number extraction shared by the daily parsers

use aoc_solver::ParseError;
use regex::Regex;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

fn signed_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"-?\d+").unwrap())
}

fn unsigned_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\d+").unwrap())
}

fn blank_line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap())
}

fn parse_matches<T>(regex: &Regex, s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    regex
        .find_iter(s)
        .map(|m| {
            m.as_str()
                .parse()
                .map_err(|e| invalid(format!("{:?}: {e}", m.as_str())))
        })
        .collect()
}

/// Every integer in `s`, a `-` directly before digits makes it negative
///
/// ```
/// use aoc_solutions::utils::parse::numbers;
///
/// let values: Vec<i32> = numbers("Sensor at x=2, y=-18").unwrap();
/// assert_eq!(values, vec![2, -18]);
/// ```
pub fn numbers<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_matches(signed_number_regex(), s)
}

/// Every run of digits in `s`; dashes are treated as separators (`"2-4"` is
/// `[2, 4]`)
pub fn unsigned_numbers<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_matches(unsigned_number_regex(), s)
}

/// Sections separated by blank lines, surrounding whitespace trimmed
pub fn blocks(input: &str) -> Vec<&str> {
    blank_line_regex()
        .split(input.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Trimmed non-empty lines
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Exactly `N` numbers from one line
pub fn fixed_numbers<T, const N: usize>(s: &str) -> Result<[T; N], ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let values: Vec<T> = numbers(s)?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| invalid(format!("expected {N} numbers in {s:?}, found {found}")))
}

pub fn invalid(message: impl Into<String>) -> ParseError {
    ParseError::InvalidFormat(message.into())
}

pub fn missing(message: impl Into<String>) -> ParseError {
    ParseError::MissingData(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_numbers() {
        assert_eq!(numbers::<i64>("p=0,4 v=3,-3").unwrap(), vec![0, 4, 3, -3]);
        assert_eq!(unsigned_numbers::<u32>("2-4,6-8").unwrap(), vec![2, 4, 6, 8]);
        assert!(numbers::<u8>("300").is_err());
        assert!(numbers::<i32>("no digits").unwrap().is_empty());
        assert_eq!(fixed_numbers::<i32, 2>("x=1, y=2").unwrap(), [1, 2]);
        assert!(matches!(
            fixed_numbers::<i32, 3>("1 2"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_blocks_and_lines() {
        let input = indoc! {"
            1000
            2000

            3000
        "};
        assert_eq!(blocks(input), vec!["1000\n2000", "3000"]);
        assert_eq!(blocks("a\r\n\r\nb\n \nc\n"), vec!["a", "b", "c"]);
        assert_eq!(lines("  a \n\n b\n").collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
