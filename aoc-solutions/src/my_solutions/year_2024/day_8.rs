use crate::utils::math::gcd;
use crate::utils::matrix::Matrix;
use crate::utils::parse::invalid;
use crate::utils::point::Point;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 8, tags = ["2024", "grid", "geometry"])]
pub struct Solver;

pub struct Antennas {
    map: Matrix<char>,
    by_frequency: HashMap<char, Vec<Point>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Antennas;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Matrix::parse_chars(input).map_err(|e| invalid(e.to_string()))?;
        let by_frequency = map
            .iter()
            .filter(|(_, c)| c.is_ascii_alphanumeric())
            .map(|(p, &c)| (c, p))
            .into_group_map();
        Ok(Antennas { map, by_frequency })
    }
}

impl Antennas {
    fn antinodes(&self, resonant: bool) -> usize {
        let mut found = HashSet::new();
        for antennas in self.by_frequency.values() {
            for (&a, &b) in antennas.iter().tuple_combinations() {
                let offset = b - a;
                if resonant {
                    // Every grid point exactly in line with both antennas
                    let divisor = gcd(offset.x, offset.y).abs();
                    let step = Point::new(offset.x / divisor, offset.y / divisor);
                    for direction in [step, -step] {
                        let mut p = a;
                        while self.map.contains(p) {
                            found.insert(p);
                            p += direction;
                        }
                    }
                } else {
                    found.extend(
                        [b + offset, a - offset]
                            .into_iter()
                            .filter(|&p| self.map.contains(p)),
                    );
                }
            }
        }
        found.len()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.antinodes(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.antinodes(true).to_string())
    }
}
