use crate::utils::dp_cache::{DpCache, VecBackend};
use crate::utils::parse::{blocks, invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 19, tags = ["2024", "dynamic-programming"])]
pub struct Solver;

pub struct Onsen<'a> {
    towels: Vec<&'a str>,
    designs: Vec<&'a str>,
    /// Arrangement count per design, shared by both parts
    arrangements: Option<Vec<u64>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Onsen<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [towels, designs] = blocks(input)[..] else {
            return Err(invalid("expected towels and designs separated by a blank line"));
        };
        Ok(Onsen {
            towels: towels
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
            designs: lines(designs).collect(),
            arrangements: None,
        })
    }
}

/// Ways to build `design` from `towels`, counted per suffix of the design
fn arrangements(design: &str, towels: &[&str]) -> u64 {
    let cache = DpCache::new(
        VecBackend::new(),
        |&start: &usize| {
            towels
                .iter()
                .filter(|towel| design[start..].starts_with(**towel))
                .map(|towel| start + towel.len())
                .collect()
        },
        |&start: &usize, rest: Vec<u64>| {
            if start == design.len() {
                1
            } else {
                rest.iter().sum()
            }
        },
    );
    cache.get(&0)
}

impl Onsen<'_> {
    fn arrangements(&mut self) -> &[u64] {
        let (designs, towels) = (&self.designs, &self.towels);
        self.arrangements.get_or_insert_with(|| {
            designs
                .iter()
                .map(|design| arrangements(design, towels))
                .collect()
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let possible = shared.arrangements().iter().filter(|&&ways| ways > 0).count();
        Ok(possible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.arrangements().iter().sum::<u64>().to_string())
    }
}
