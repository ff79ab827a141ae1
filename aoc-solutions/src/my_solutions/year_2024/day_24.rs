use crate::utils::parse::{blocks, invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["2024", "simulation", "circuit"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Xor,
}

#[derive(Debug, Clone, Copy)]
struct Gate<'a> {
    a: &'a str,
    op: Op,
    b: &'a str,
}

impl Gate<'_> {
    fn has_input(&self, wire: &str) -> bool {
        self.a == wire || self.b == wire
    }
}

/// Initial wire values and the gates, keyed by their output wire
#[derive(Clone)]
pub struct Device<'a> {
    inputs: HashMap<&'a str, bool>,
    gates: HashMap<&'a str, Gate<'a>>,
}

fn gate_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\w+) (AND|OR|XOR) (\w+) -> (\w+)$").unwrap())
}

impl AocParser for Solver {
    type SharedData<'a> = Device<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [inputs, gates] = blocks(input)[..] else {
            return Err(invalid("expected wire values and gates separated by a blank line"));
        };

        let inputs = lines(inputs)
            .map(|line| -> Result<(&'a str, bool), ParseError> {
                let (wire, value) = line
                    .split_once(": ")
                    .ok_or_else(|| invalid(format!("bad wire {line:?}")))?;
                match value {
                    "0" => Ok((wire, false)),
                    "1" => Ok((wire, true)),
                    _ => Err(invalid(format!("wire {wire} has value {value:?}"))),
                }
            })
            .collect::<Result<_, _>>()?;

        let gates = lines(gates)
            .map(|line| -> Result<(&'a str, Gate<'a>), ParseError> {
                let captures = gate_regex()
                    .captures(line)
                    .ok_or_else(|| invalid(format!("bad gate {line:?}")))?;
                let (_, [a, op, b, output]) = captures.extract();
                let op = match op {
                    "AND" => Op::And,
                    "OR" => Op::Or,
                    _ => Op::Xor,
                };
                Ok((output, Gate { a, op, b }))
            })
            .collect::<Result<_, _>>()?;

        Ok(Device { inputs, gates })
    }
}

impl<'a> Device<'a> {
    /// Value on `wire`, `None` when it depends on an unknown wire or on itself
    fn resolve(&self, wire: &'a str, values: &mut HashMap<&'a str, Option<bool>>) -> Option<bool> {
        if let Some(&value) = self.inputs.get(wire) {
            return Some(value);
        }
        if let Some(&known) = values.get(wire) {
            return known;
        }
        // Marks the wire while its inputs resolve, so a loop reads as unknown
        values.insert(wire, None);
        let gate = self.gates.get(wire)?;
        let a = self.resolve(gate.a, values)?;
        let b = self.resolve(gate.b, values)?;
        let value = match gate.op {
            Op::And => a & b,
            Op::Or => a | b,
            Op::Xor => a ^ b,
        };
        values.insert(wire, Some(value));
        Some(value)
    }

    /// Number formed by the wires starting with `prefix`, most significant
    /// bit on the highest-numbered wire
    fn number(&self, prefix: char) -> Option<u64> {
        let wires = self
            .inputs
            .keys()
            .chain(self.gates.keys())
            .filter(|wire| wire.starts_with(prefix))
            .copied()
            .sorted_unstable()
            .rev()
            .dedup()
            .collect_vec();
        let mut values = HashMap::new();
        wires.into_iter().try_fold(0u64, |number, wire| {
            Some(number << 1 | u64::from(self.resolve(wire, &mut values)?))
        })
    }

    fn find_gate(&self, a: &str, op: Op, b: Option<&str>) -> Option<&'a str> {
        self.gates
            .iter()
            .find(|(_, gate)| {
                gate.op == op
                    && match b {
                        Some(b) => gate.has_input(a) && gate.has_input(b),
                        None => gate.has_input(a),
                    }
            })
            .map(|(&output, _)| output)
    }

    fn swap_outputs(&mut self, first: &'a str, second: &'a str) {
        if let (Some(a), Some(b)) = (self.gates.remove(first), self.gates.remove(second)) {
            self.gates.insert(first, b);
            self.gates.insert(second, a);
        }
    }

    /// Checks one full-adder block, swapping outputs until it wires up as
    ///
    /// ```text
    /// x XOR y -> s    carry XOR s -> z
    /// x AND y -> u    carry AND s -> t    t OR u -> next carry
    /// ```
    ///
    /// and returns the next carry wire with every swap made
    fn repair_adder(
        &mut self,
        bit: usize,
        carry: &'a str,
    ) -> Result<(&'a str, Vec<&'a str>), SolveError> {
        let (x, y, z) = (format!("x{bit:02}"), format!("y{bit:02}"), format!("z{bit:02}"));
        let broken = || SolveError::failed(format!("adder for bit {bit} cannot be repaired"));
        let mut swapped = Vec::new();

        // Each block holds at most one crossed pair of outputs
        for _ in 0..=2 {
            let sum = self.find_gate(carry, Op::Xor, None).ok_or_else(broken)?;
            let half_sum = self.find_gate(&x, Op::Xor, Some(y.as_str())).ok_or_else(broken)?;

            if sum != z {
                let z = self.gates.get_key_value(z.as_str()).map(|(&z, _)| z).ok_or_else(broken)?;
                self.swap_outputs(sum, z);
                swapped.extend([sum, z]);
                continue;
            }

            let sum_gate = self.gates[sum];
            let expected = if sum_gate.a == carry { sum_gate.b } else { sum_gate.a };
            if half_sum != expected {
                self.swap_outputs(half_sum, expected);
                swapped.extend([half_sum, expected]);
                continue;
            }

            let carried = self.find_gate(carry, Op::And, None).ok_or_else(broken)?;
            let generated = self.find_gate(&x, Op::And, Some(y.as_str())).ok_or_else(broken)?;
            let next = self
                .find_gate(carried, Op::Or, Some(generated))
                .ok_or_else(broken)?;
            return Ok((next, swapped));
        }
        Err(broken())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let z = shared
            .number('z')
            .ok_or_else(|| SolveError::failed("z wires depend on unknown wires"))?;
        Ok(z.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The circuit is a ripple-carry adder with some gate outputs crossed
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut device = shared.clone();
        let bits = device.inputs.keys().filter(|wire| wire.starts_with('x')).count();

        let mut carry = device
            .find_gate("x00", Op::And, Some("y00"))
            .ok_or_else(|| SolveError::failed("no x00 AND y00 gate"))?;
        let mut swapped = Vec::new();
        for bit in 1..bits {
            let (next, swaps) = device.repair_adder(bit, carry)?;
            swapped.extend(swaps);
            carry = next;
        }

        Ok(swapped.into_iter().sorted_unstable().join(","))
    }
}
