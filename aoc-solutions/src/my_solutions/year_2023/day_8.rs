use crate::utils::math::lcm_of;
use crate::utils::parse::{blocks, invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph", "math"])]
pub struct Solver;

pub struct Network<'a> {
    /// 0 for left, 1 for right
    turns: Vec<usize>,
    nodes: HashMap<&'a str, [&'a str; 2]>,
}

fn node_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\w+) = \((\w+), (\w+)\)$").unwrap())
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [turns, nodes] = blocks(input)[..] else {
            return Err(invalid("expected turns and nodes separated by a blank line"));
        };
        let turns = turns
            .chars()
            .map(|c| match c {
                'L' => Ok(0),
                'R' => Ok(1),
                other => Err(invalid(format!("unknown turn {other:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nodes = lines(nodes)
            .map(|line| {
                let captures = node_regex()
                    .captures(line)
                    .ok_or_else(|| invalid(format!("bad node {line:?}")))?;
                let (_, [id, left, right]) = captures.extract();
                Ok::<_, ParseError>((id, [left, right]))
            })
            .collect::<Result<HashMap<_, _>, ParseError>>()?;

        Ok(Network { turns, nodes })
    }
}

impl Network<'_> {
    /// Steps from `start` until `is_end` accepts a node, or `None` when the
    /// walk runs longer than any cycle could
    fn steps_until(&self, start: &str, is_end: impl Fn(&str) -> bool) -> Option<u64> {
        let limit = self.turns.len() * (self.nodes.len() + 1);
        let mut node = start;
        for (step, &turn) in self.turns.iter().cycle().take(limit).enumerate() {
            node = self.nodes.get(node)?[turn];
            if is_end(node) {
                return Some(step as u64 + 1);
            }
        }
        None
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.nodes.contains_key("AAA") {
            return Err(SolveError::failed("no node AAA"));
        }
        shared
            .steps_until("AAA", |node| node == "ZZZ")
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("ZZZ is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    /// Each ghost loops back to its start right after reaching its end, so
    /// they all meet after the LCM of their path lengths
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut starts: Vec<&str> = shared
            .nodes
            .keys()
            .copied()
            .filter(|id| id.ends_with('A'))
            .collect();
        starts.sort_unstable();

        let lengths = starts
            .iter()
            .map(|start| {
                shared
                    .steps_until(start, |node| node.ends_with('Z'))
                    .ok_or_else(|| SolveError::failed(format!("{start} never reaches a Z node")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match lengths.as_slice() {
            [] => Err(SolveError::failed("no start nodes")),
            [single] => Ok(single.to_string()),
            _ => lcm_of(lengths)
                .map(|steps| steps.to_string())
                .map_err(|e| SolveError::failed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    #[test]
    fn test_part1_examples() {
        let mut shared = Solver::parse(indoc! {"
            RL

            AAA = (BBB, CCC)
            BBB = (DDD, EEE)
            CCC = (ZZZ, GGG)
            DDD = (DDD, DDD)
            EEE = (EEE, EEE)
            GGG = (GGG, GGG)
            ZZZ = (ZZZ, ZZZ)
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");

        let mut shared = Solver::parse(indoc! {"
            LLR

            AAA = (BBB, BBB)
            BBB = (AAA, ZZZ)
            ZZZ = (ZZZ, ZZZ)
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(indoc! {"
            LR

            11A = (11B, XXX)
            11B = (XXX, 11Z)
            11Z = (11B, XXX)
            22A = (22B, XXX)
            22B = (22C, 22C)
            22C = (22Z, 22Z)
            22Z = (22B, 22B)
            XXX = (XXX, XXX)
        "})
        .unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "6");
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn test_unreachable_end() {
        let mut shared = Solver::parse("L\n\nAAA = (AAA, ZZZ)\nZZZ = (ZZZ, ZZZ)").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }
}
