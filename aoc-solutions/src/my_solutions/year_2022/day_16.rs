use crate::utils::graph::Graph;
use crate::utils::parse::{invalid, lines, missing};
use crate::utils::search::bfs_distances;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::sync::OnceLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["2022", "graph", "search", "dp"])]
pub struct Solver;

/// Most valves this solver tracks in an opened-set bitmask
const MAX_USEFUL_VALVES: usize = 20;

/// The valves worth opening, compressed to pairwise travel times
pub struct Volcano {
    flows: Vec<u32>,
    /// `distances[a][b]` in minutes; index `flows.len()` is the start valve
    distances: Vec<Vec<u32>>,
}

fn valve_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^Valve (\w+) has flow rate=(\d+); tunnels? leads? to valves? (.*)$").unwrap()
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Volcano;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut tunnels: Graph<&str> = Graph::new();
        let mut useful: Vec<(&str, u32)> = Vec::new();

        for line in lines(input) {
            let captures = valve_regex()
                .captures(line)
                .ok_or_else(|| invalid(format!("bad valve {line:?}")))?;
            let (_, [name, flow, targets]) = captures.extract();
            let flow: u32 = flow
                .parse()
                .map_err(|e| invalid(format!("flow {flow:?}: {e}")))?;
            tunnels.add_node(name);
            for target in targets.split(',').map(str::trim) {
                tunnels.add_edge(name, target);
            }
            if flow > 0 {
                useful.push((name, flow));
            }
        }

        if !tunnels.contains_node(&"AA") {
            return Err(missing("no valve AA"));
        }
        if useful.len() > MAX_USEFUL_VALVES {
            return Err(invalid(format!(
                "{} valves with flow, at most {MAX_USEFUL_VALVES} supported",
                useful.len()
            )));
        }

        let mut origins: Vec<&str> = useful.iter().map(|&(name, _)| name).collect();
        origins.push("AA");
        let distances = origins
            .iter()
            .map(|&from| {
                let reached = bfs_distances(from, |valve| {
                    tunnels.neighbors(valve).copied().collect::<Vec<_>>()
                });
                // Unreachable valves get a distance no schedule can afford
                useful
                    .iter()
                    .map(|(to, _)| reached.get(to).map_or(u32::MAX / 2, |&d| d as u32))
                    .collect()
            })
            .collect();

        Ok(Volcano {
            flows: useful.into_iter().map(|(_, flow)| flow).collect(),
            distances,
        })
    }
}

impl Volcano {
    /// Best pressure released for every set of opened valves reachable
    /// within `minutes`, indexed by the set's bitmask
    fn best_per_set(&self, minutes: u32) -> Vec<u32> {
        let mut best = vec![0; 1 << self.flows.len()];
        self.explore(self.flows.len(), minutes, 0, 0, &mut best);
        best
    }

    fn explore(&self, at: usize, time_left: u32, opened: usize, released: u32, best: &mut [u32]) {
        best[opened] = best[opened].max(released);
        for (next, &flow) in self.flows.iter().enumerate() {
            let cost = self.distances[at][next] + 1;
            if opened & (1 << next) != 0 || cost >= time_left {
                continue;
            }
            let remaining = time_left - cost;
            self.explore(next, remaining, opened | (1 << next), released + flow * remaining, best);
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared.best_per_set(30);
        Ok(best.iter().max().copied().unwrap_or(0).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// You and the elephant open disjoint sets, so the answer is the best
    /// split of the valves into two
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = shared.best_per_set(26);
        let valves = shared.flows.len();

        // Best over every subset of each mask
        for bit in 0..valves {
            for mask in 0..best.len() {
                if mask & (1 << bit) != 0 {
                    best[mask] = best[mask].max(best[mask ^ (1 << bit)]);
                }
            }
        }

        let full = best.len() - 1;
        let total = (0..best.len())
            .map(|mine| best[mine] + best[full ^ mine])
            .max()
            .unwrap_or(0);
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
        Valve BB has flow rate=13; tunnels lead to valves CC, AA
        Valve CC has flow rate=2; tunnels lead to valves DD, BB
        Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
        Valve EE has flow rate=3; tunnels lead to valves FF, DD
        Valve FF has flow rate=0; tunnels lead to valves EE, GG
        Valve GG has flow rate=0; tunnels lead to valves FF, HH
        Valve HH has flow rate=22; tunnel leads to valve GG
        Valve II has flow rate=0; tunnels lead to valves AA, JJ
        Valve JJ has flow rate=21; tunnel leads to valve II
    "};

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.flows.len(), 6);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1651");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1707");
    }

    #[test]
    fn test_single_valve() {
        let input = indoc! {"
            Valve AA has flow rate=0; tunnel leads to valve BB
            Valve BB has flow rate=10; tunnel leads to valve AA
        "};
        let mut shared = Solver::parse(input).unwrap();
        // Open BB at minute 2, it runs for 28 minutes
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "280");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "240");
    }

    #[test]
    fn test_missing_start() {
        let input = "Valve BB has flow rate=10; tunnel leads to valve BB\n";
        assert!(Solver::parse(input).is_err());
    }
}
