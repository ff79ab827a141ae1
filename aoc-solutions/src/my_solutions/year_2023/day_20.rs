use crate::utils::math::lcm;
use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["2023", "simulation", "math"])]
pub struct Solver;

const BROADCASTER: &str = "broadcaster";

#[derive(Debug, Clone)]
enum Kind<'a> {
    Broadcaster,
    FlipFlop { on: bool },
    /// Last pulse remembered from each input, `true` for high
    Conjunction { memory: HashMap<&'a str, bool> },
}

#[derive(Debug, Clone)]
struct Module<'a> {
    kind: Kind<'a>,
    outputs: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse<'a> {
    from: &'a str,
    to: &'a str,
    high: bool,
}

#[derive(Clone)]
pub struct Machine<'a> {
    modules: HashMap<&'a str, Module<'a>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Machine<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut modules: HashMap<&'a str, Module<'a>> = HashMap::new();
        for line in lines(input) {
            let (name, outputs) = line
                .split_once(" -> ")
                .ok_or_else(|| invalid(format!("bad module {line:?}")))?;
            let (name, kind) = if let Some(name) = name.strip_prefix('%') {
                (name, Kind::FlipFlop { on: false })
            } else if let Some(name) = name.strip_prefix('&') {
                let memory = HashMap::new();
                (name, Kind::Conjunction { memory })
            } else if name == BROADCASTER {
                (name, Kind::Broadcaster)
            } else {
                return Err(invalid(format!("unknown module type {name:?}")));
            };
            let outputs = outputs.split(',').map(str::trim).collect();
            modules.insert(name, Module { kind, outputs });
        }
        if !modules.contains_key(BROADCASTER) {
            return Err(invalid("no broadcaster"));
        }

        let wires: Vec<(&str, &str)> = modules
            .iter()
            .flat_map(|(&from, module)| module.outputs.iter().map(move |&to| (from, to)))
            .collect();
        for (from, to) in wires {
            if let Some(Module {
                kind: Kind::Conjunction { memory },
                ..
            }) = modules.get_mut(to)
            {
                memory.insert(from, false);
            }
        }

        Ok(Machine { modules })
    }
}

impl<'a> Machine<'a> {
    /// Pushes the button once, handing every pulse sent to `observe` in the
    /// order they are processed
    fn push_button(&mut self, mut observe: impl FnMut(Pulse<'a>)) {
        let mut queue = VecDeque::from([Pulse {
            from: "button",
            to: BROADCASTER,
            high: false,
        }]);

        while let Some(pulse) = queue.pop_front() {
            observe(pulse);
            let Some(module) = self.modules.get_mut(pulse.to) else {
                continue;
            };
            let sent = match &mut module.kind {
                Kind::Broadcaster => pulse.high,
                Kind::FlipFlop { .. } if pulse.high => continue,
                Kind::FlipFlop { on } => {
                    *on = !*on;
                    *on
                }
                Kind::Conjunction { memory } => {
                    memory.insert(pulse.from, pulse.high);
                    !memory.values().all(|&high| high)
                }
            };
            queue.extend(module.outputs.iter().map(|&to| Pulse {
                from: pulse.to,
                to,
                high: sent,
            }));
        }
    }

    fn inputs_of(&self, name: &str) -> Vec<&'a str> {
        self.modules
            .iter()
            .filter(|(_, module)| module.outputs.contains(&name))
            .map(|(&from, _)| from)
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut machine = shared.clone();
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..1000 {
            machine.push_button(|pulse| {
                if pulse.high {
                    high += 1;
                } else {
                    low += 1;
                }
            });
        }
        Ok((low * high).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// `rx` hangs off a single conjunction whose inputs each send a high
    /// pulse on their own fixed cycle; `rx` gets a low pulse when they line up
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut machine = shared.clone();
        let [hub] = machine.inputs_of("rx")[..] else {
            return Err(SolveError::failed("rx needs exactly one input module"));
        };
        if !matches!(machine.modules[hub].kind, Kind::Conjunction { .. }) {
            return Err(SolveError::failed(format!("{hub} is not a conjunction")));
        }
        let feeders = machine.inputs_of(hub);
        let mut cycles: HashMap<&str, u64> = HashMap::new();

        // Every feeder cycles well within this many presses
        const MAX_PRESSES: u64 = 1 << 16;
        for presses in 1..=MAX_PRESSES {
            machine.push_button(|pulse| {
                if pulse.high && pulse.to == hub {
                    cycles.entry(pulse.from).or_insert(presses);
                }
            });
            if cycles.len() == feeders.len() {
                let presses = cycles.values().fold(1, |total, &cycle| lcm(total, cycle));
                return Ok(presses.to_string());
            }
        }
        Err(SolveError::failed(format!("{hub} inputs never all fired")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    #[test]
    fn test_examples() {
        let simple = indoc! {"
            broadcaster -> a, b, c
            %a -> b
            %b -> c
            %c -> inv
            &inv -> a
        "};
        let mut shared = Solver::parse(simple).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "32000000");

        let interesting = indoc! {"
            broadcaster -> a
            %a -> inv, con
            &inv -> b
            %b -> con
            &con -> output
        "};
        let mut shared = Solver::parse(interesting).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "11687500");
    }

    #[test]
    fn test_single_press() {
        let mut machine = Solver::parse("broadcaster -> a\n%a -> b\n&b -> a\n").unwrap();
        let mut pulses = Vec::new();
        machine.push_button(|pulse| pulses.push((pulse.from, pulse.to, pulse.high)));
        assert_eq!(
            pulses,
            vec![
                ("button", "broadcaster", false),
                ("broadcaster", "a", false),
                ("a", "b", true),
                ("b", "a", false),
                ("a", "b", false),
                ("b", "a", true),
            ]
        );
    }

    #[test]
    fn test_counters_line_up() {
        // x fires high every 2nd press, y every 4th
        let input = indoc! {"
            broadcaster -> a, c
            %a -> x
            &x -> hub
            %c -> d
            %d -> y
            &y -> hub
            &hub -> rx
        "};
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4");
    }
}
