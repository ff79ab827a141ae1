use crate::utils::parse::{lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["2024", "simulation"])]
pub struct Solver;

const ROUNDS: usize = 2000;
const PRUNE: u64 = 16_777_216;
/// Price changes lie in -9..=9, so a window of four fits in 19^4 slots
const CHANGE_RANGE: usize = 19;
const WINDOWS: usize = CHANGE_RANGE.pow(4);

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<u64, ParseError> {
                match unsigned_numbers::<u64>(line)?[..] {
                    [secret] => Ok(secret),
                    _ => Err(ParseError::InvalidFormat(format!("bad secret {line:?}"))),
                }
            })
            .collect()
    }
}

fn next_secret(mut secret: u64) -> u64 {
    secret = (secret ^ (secret << 6)) % PRUNE;
    secret = (secret ^ (secret >> 5)) % PRUNE;
    (secret ^ (secret << 11)) % PRUNE
}

fn secrets(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |&s| Some(next_secret(s)))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .filter_map(|&seed| secrets(seed).nth(ROUNDS))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Bananas per window of four price changes, summed over buyers; each
    /// buyer sells at the first occurrence of a window only
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut bananas = vec![0u32; WINDOWS];
        let mut last_buyer = vec![usize::MAX; WINDOWS];

        for (buyer, &seed) in shared.iter().enumerate() {
            let prices: Vec<u32> = secrets(seed)
                .take(ROUNDS + 1)
                .map(|s| (s % 10) as u32)
                .collect();
            let mut window = 0;
            for (i, pair) in prices.windows(2).enumerate() {
                let change = (pair[1] + 9 - pair[0]) as usize;
                window = (window * CHANGE_RANGE + change) % WINDOWS;
                if i >= 3 && last_buyer[window] != buyer {
                    last_buyer[window] = buyer;
                    bananas[window] += pair[1];
                }
            }
        }
        let best = bananas.iter().max().copied().unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_secret_sequence() {
        let first: Vec<u64> = secrets(123).skip(1).take(3).collect();
        assert_eq!(first, vec![15887950, 16495136, 527345]);
    }

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse("1\n10\n100\n2024").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "37327623");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse("1\n2\n3\n2024").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "23");
    }
}
