use crate::utils::parse::{blocks, fixed_numbers, invalid, unsigned_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["2024", "simulation", "reverse-engineering"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    registers: [u64; 3],
    program: Vec<u8>,
}

impl AocParser for Solver {
    type SharedData<'a> = Computer;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [registers, program] = blocks(input)[..] else {
            return Err(invalid("expected registers and a program separated by a blank line"));
        };
        let registers = fixed_numbers::<u64, 3>(registers)?;
        let program: Vec<u8> = unsigned_numbers(program)?;
        if let Some(bad) = program.iter().find(|&&v| v > 7) {
            return Err(invalid(format!("{bad} is not a 3-bit value")));
        }
        Ok(Computer { registers, program })
    }
}

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;

/// `value / 2^power`, zero once the power shifts out every bit
fn divide(value: u64, power: u64) -> u64 {
    u32::try_from(power)
        .ok()
        .and_then(|power| value.checked_shr(power))
        .unwrap_or(0)
}

impl Computer {
    fn combo(&self, registers: &[u64; 3], operand: u8) -> Result<u64, SolveError> {
        match operand {
            0..=3 => Ok(u64::from(operand)),
            4..=6 => Ok(registers[usize::from(operand - 4)]),
            _ => Err(SolveError::failed(format!("reserved combo operand {operand}"))),
        }
    }

    /// Runs the program with register A set to `a`
    fn run(&self, a: u64) -> Result<Vec<u8>, SolveError> {
        let mut registers = self.registers;
        registers[A] = a;
        let mut output = Vec::new();
        let mut pointer = 0;

        while let Some(&[opcode, operand]) = self.program.get(pointer..pointer + 2) {
            pointer += 2;
            match opcode {
                0 => registers[A] = divide(registers[A], self.combo(&registers, operand)?),
                1 => registers[B] ^= u64::from(operand),
                2 => registers[B] = self.combo(&registers, operand)? % 8,
                3 if registers[A] != 0 => pointer = usize::from(operand),
                3 => {}
                4 => registers[B] ^= registers[C],
                5 => output.push((self.combo(&registers, operand)? % 8) as u8),
                6 => registers[B] = divide(registers[A], self.combo(&registers, operand)?),
                7 => registers[C] = divide(registers[A], self.combo(&registers, operand)?),
                _ => return Err(SolveError::failed(format!("unknown opcode {opcode}"))),
            }
        }
        Ok(output)
    }

    /// Smallest A that makes the program print itself. Each loop iteration
    /// consumes three bits of A, so the output is matched from its last value
    /// backwards while A grows three bits at a time.
    fn quine(&self, prefix: u64, matched: usize) -> Result<Option<u64>, SolveError> {
        if matched == self.program.len() {
            return Ok(Some(prefix));
        }
        let expected = &self.program[self.program.len() - matched - 1..];
        for bits in 0..8 {
            let a = prefix << 3 | bits;
            if a == 0 {
                continue;
            }
            if self.run(a)? == expected {
                if let Some(found) = self.quine(a, matched + 1)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let a = shared.registers[A];
        Ok(shared.run(a)?.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .quine(0, 0)?
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::failed("no value of A reproduces the program"))
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
            Register A: 729
            Register B: 0
            Register C: 0

            Program: 0,1,5,4,3,0
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4,6,3,5,6,3,5,2,1,0");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(indoc! {"
            Register A: 2024
            Register B: 0
            Register C: 0

            Program: 0,3,5,4,3,0
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "117440");
    }

    #[test]
    fn test_small_programs() {
        let computer = Computer {
            registers: [10, 0, 0],
            program: vec![5, 0, 5, 1, 5, 4],
        };
        assert_eq!(computer.run(10).unwrap(), vec![0, 1, 2]);

        let computer = Computer {
            registers: [0, 29, 0],
            program: vec![1, 7, 5, 5],
        };
        assert_eq!(computer.run(0).unwrap(), vec![2]);

        let reserved = Computer {
            registers: [0, 0, 0],
            program: vec![5, 7],
        };
        assert!(reserved.run(0).is_err());
    }
}
