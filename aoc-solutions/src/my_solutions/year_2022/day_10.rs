use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["2022", "simulation", "display"])]
pub struct Solver;

const SCREEN_WIDTH: usize = 40;

impl AocParser for Solver {
    /// Value of the X register during each cycle, cycle 1 first
    type SharedData<'a> = Vec<i32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut x = 1;
        let mut during = Vec::new();
        for line in lines(input) {
            match line.split_once(' ') {
                None if line == "noop" => during.push(x),
                Some(("addx", value)) => {
                    let value: i32 = value
                        .parse()
                        .map_err(|e| invalid(format!("addx operand {value:?}: {e}")))?;
                    during.extend([x, x]);
                    x += value;
                }
                _ => return Err(invalid(format!("unknown instruction {line:?}"))),
            }
        }
        Ok(during)
    }
}

impl PartSolver<1> for Solver {
    /// Signal strength at cycles 20, 60, 100 and onwards
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let strength: i32 = (20..=shared.len())
            .step_by(SCREEN_WIDTH)
            .map(|cycle| cycle as i32 * shared[cycle - 1])
            .sum();
        Ok(strength.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The CRT image, one line per screen row; a pixel is lit when the
    /// three-wide sprite centred on X covers it
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = shared
            .chunks(SCREEN_WIDTH)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column, &x)| if (column as i32 - x).abs() <= 1 { '#' } else { '.' })
                    .collect::<String>()
            })
            .join("\n");
        Ok(image)
    }
}
