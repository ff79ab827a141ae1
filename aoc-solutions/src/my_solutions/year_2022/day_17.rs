use crate::utils::parse::invalid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["2022", "simulation", "cycle-detection"])]
pub struct Solver;

/// Rocks as row bitmasks, bottom row first; bit `x` is column `x` and every
/// rock starts two columns from the left wall
const ROCKS: [&[u8]; 5] = [
    &[0b0111100],
    &[0b0001000, 0b0011100, 0b0001000],
    &[0b0011100, 0b0010000, 0b0010000],
    &[0b0000100; 4],
    &[0b0001100; 2],
];
const LEFT_WALL: u8 = 0b0000001;
const RIGHT_WALL: u8 = 0b1000000;
/// Rows of the tower top compared when looking for a repeating state
const SKYLINE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

struct Chamber<'j> {
    jets: &'j [Jet],
    jet: usize,
    /// Settled rock, bottom row first
    rows: Vec<u8>,
}

impl<'j> Chamber<'j> {
    fn new(jets: &'j [Jet]) -> Self {
        Self {
            jets,
            jet: 0,
            rows: Vec::new(),
        }
    }

    fn collides(&self, rock: &[u8], bottom: usize) -> bool {
        rock.iter()
            .enumerate()
            .any(|(i, &row)| self.rows.get(bottom + i).is_some_and(|&settled| settled & row != 0))
    }

    fn push(&self, rock: &[u8], jet: Jet) -> Vec<u8> {
        match jet {
            Jet::Left if rock.iter().all(|&row| row & LEFT_WALL == 0) => {
                rock.iter().map(|&row| row >> 1).collect()
            }
            Jet::Right if rock.iter().all(|&row| row & RIGHT_WALL == 0) => {
                rock.iter().map(|&row| row << 1).collect()
            }
            _ => rock.to_vec(),
        }
    }

    fn drop_rock(&mut self, shape: &[u8]) {
        let mut rock = shape.to_vec();
        let mut bottom = self.rows.len() + 3;
        loop {
            let jet = self.jets[self.jet];
            self.jet = (self.jet + 1) % self.jets.len();
            let pushed = self.push(&rock, jet);
            if !self.collides(&pushed, bottom) {
                rock = pushed;
            }
            if bottom == 0 || self.collides(&rock, bottom - 1) {
                break;
            }
            bottom -= 1;
        }

        if self.rows.len() < bottom + rock.len() {
            self.rows.resize(bottom + rock.len(), 0);
        }
        for (i, row) in rock.into_iter().enumerate() {
            self.rows[bottom + i] |= row;
        }
    }

    fn skyline(&self) -> Vec<u8> {
        self.rows.iter().rev().take(SKYLINE_DEPTH).copied().collect()
    }
}

/// Tower height after `count` rocks; once the rock, jet and skyline repeat,
/// whole cycles are skipped
fn tower_height(jets: &[Jet], count: u64) -> u64 {
    let mut chamber = Chamber::new(jets);
    let mut seen: HashMap<(usize, usize, Vec<u8>), (u64, u64)> = HashMap::new();
    let mut skipped = 0;
    let mut dropped = 0;

    while dropped < count {
        let shape = (dropped % ROCKS.len() as u64) as usize;
        chamber.drop_rock(ROCKS[shape]);
        dropped += 1;

        let height = chamber.rows.len() as u64;
        if skipped == 0 && chamber.rows.len() >= SKYLINE_DEPTH {
            let state = (shape, chamber.jet, chamber.skyline());
            if let Some(&(then_dropped, then_height)) = seen.get(&state) {
                let period = dropped - then_dropped;
                let cycles = (count - dropped) / period;
                log::debug!("rock cycle of {period} found after {dropped} rocks");
                skipped = cycles * (height - then_height);
                dropped += cycles * period;
            } else {
                seen.insert(state, (dropped, height));
            }
        }
    }
    chamber.rows.len() as u64 + skipped
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Jet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets: Vec<Jet> = input
            .trim()
            .chars()
            .map(|c| match c {
                '<' => Ok(Jet::Left),
                '>' => Ok(Jet::Right),
                _ => Err(invalid(format!("unknown jet {c:?}"))),
            })
            .collect::<Result<_, _>>()?;
        if jets.is_empty() {
            return Err(invalid("no jets"));
        }
        Ok(jets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}
