use crate::utils::parse::{invalid, lines, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dynamic-programming"])]
pub struct Solver;

const OPERATIONAL: u8 = b'.';
const DAMAGED: u8 = b'#';

/// One condition record: spring states (`?` unknown) and the sizes of the
/// damaged groups
#[derive(Debug, Clone)]
pub struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    /// The record with its springs repeated `times` times joined by `?`, and
    /// its groups repeated as many times
    fn unfold(&self, times: usize) -> Record {
        let springs = std::iter::repeat_n(self.springs.as_slice(), times)
            .collect_vec()
            .join(&b'?');
        let groups = self.groups.repeat(times);
        Record { springs, groups }
    }

    /// Ways to fill in the unknown springs that match the groups.
    /// `ways[i][j]` counts arrangements of `springs[i..]` holding `groups[j..]`.
    fn arrangements(&self) -> u64 {
        let (n, m) = (self.springs.len(), self.groups.len());
        let mut ways = vec![vec![0u64; m + 1]; n + 2];
        ways[n][m] = 1;
        ways[n + 1][m] = 1;

        for i in (0..n).rev() {
            for j in 0..=m {
                let spring = self.springs[i];
                let mut total = 0;
                if spring != DAMAGED {
                    total += ways[i + 1][j];
                }
                if spring != OPERATIONAL && j < m {
                    let end = i + self.groups[j];
                    let fits = end <= n
                        && !self.springs[i..end].contains(&OPERATIONAL)
                        && self.springs.get(end) != Some(&DAMAGED);
                    if fits {
                        // Skips the operational spring closing the group
                        total += ways[end + 1][j + 1];
                    }
                }
                ways[i][j] = total;
            }
        }
        ways[0][0]
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(|line| -> Result<Record, ParseError> {
                let (springs, groups) = line
                    .split_once(' ')
                    .ok_or_else(|| invalid(format!("bad record {line:?}")))?;
                if !springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')) {
                    return Err(invalid(format!("bad springs {springs:?}")));
                }
                let groups = unsigned_numbers(groups)?;
                if groups.contains(&0) {
                    return Err(invalid(format!("empty damaged group in {line:?}")));
                }
                Ok(Record {
                    springs: springs.as_bytes().to_vec(),
                    groups,
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(Record::arrangements).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|record| record.unfold(5).arrangements())
            .sum();
        Ok(total.to_string())
    }
}
