use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::unsigned_numbers;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["2024", "dynamic-programming"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        unsigned_numbers(input)
    }
}

fn blink(stone: u64) -> Vec<u64> {
    if stone == 0 {
        return vec![1];
    }
    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10u64.pow(digits / 2);
        vec![stone / half, stone % half]
    } else {
        vec![stone * 2024]
    }
}

/// Number of stones one stone becomes after some blinks
struct StoneCount;

impl DpProblem<(u64, u8), u64> for StoneCount {
    fn deps(&self, &(stone, blinks): &(u64, u8)) -> Vec<(u64, u8)> {
        if blinks == 0 {
            return vec![];
        }
        blink(stone).into_iter().map(|next| (next, blinks - 1)).collect()
    }

    fn compute(&self, &(_, blinks): &(u64, u8), deps: Vec<u64>) -> u64 {
        if blinks == 0 { 1 } else { deps.iter().sum() }
    }
}

fn stones_after(stones: &[u64], blinks: u8) -> u64 {
    let cache = DpCache::with_problem(HashMapBackend::new(), StoneCount);
    stones.iter().map(|&stone| cache.get(&(stone, blinks))).sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(stones_after(shared, 25).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(stones_after(shared, 75).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_example() {
        let mut shared = Solver::parse("125 17").unwrap();
        assert_eq!(stones_after(&shared, 6), 22);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "55312");
    }

    #[test]
    fn test_blink_rules() {
        assert_eq!(blink(0), vec![1]);
        assert_eq!(blink(1000), vec![10, 0]);
        assert_eq!(blink(1), vec![2024]);
        assert_eq!(stones_after(&[0, 1, 10, 99, 999], 1), 7);
    }
}
