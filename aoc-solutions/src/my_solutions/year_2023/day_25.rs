use crate::utils::graph::Graph;
use crate::utils::parse::{invalid, lines, missing};
use crate::utils::search::{bfs_distances, breadth_first_search};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["2023", "graph", "max-flow"])]
pub struct Solver;

/// Wires that have to be cut
const CUT_SIZE: usize = 3;

impl AocParser for Solver {
    type SharedData<'a> = Graph<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut wiring = Graph::new();
        for line in lines(input) {
            let (component, others) = line
                .split_once(':')
                .ok_or_else(|| invalid(format!("bad wiring {line:?}")))?;
            wiring.add_node(component);
            for other in others.split_whitespace() {
                wiring.add_edge(component, other);
            }
        }
        if wiring.node_count() < 2 {
            return Err(missing("fewer than two components"));
        }
        Ok(wiring)
    }
}

/// Size of the side holding `source` when at most `CUT_SIZE` wires separate
/// it from `sink`, found by pushing unit flows along edge-disjoint paths
fn source_side<'a>(wiring: &Graph<&'a str>, source: &'a str, sink: &'a str) -> Option<usize> {
    // Directed edges already carrying a path; sending back along one cancels it
    let mut used: HashSet<(&str, &str)> = HashSet::new();
    let residual = |used: &HashSet<(&'a str, &'a str)>, from: &'a str| {
        wiring
            .neighbors(&from)
            .copied()
            .filter(|&to| !used.contains(&(from, to)))
            .collect::<Vec<_>>()
    };

    for _ in 0..=CUT_SIZE {
        let Some(found) =
            breadth_first_search(source, |&node| residual(&used, node), |&node, _| node == sink)
        else {
            let side = bfs_distances(source, |&node| residual(&used, node));
            return Some(side.len());
        };
        for pair in found.path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !used.remove(&(to, from)) {
                used.insert((from, to));
            }
        }
    }
    None
}

impl PartSolver<1> for Solver {
    /// Some component on the far side of the cut is found by trying each one
    /// as the sink
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut components = shared.nodes().copied();
        let source = components
            .next()
            .ok_or_else(|| SolveError::failed("no components"))?;
        let total = shared.node_count();
        let side = components
            .find_map(|sink| source_side(shared, source, sink))
            .ok_or_else(|| {
                SolveError::failed(format!("no cut of {CUT_SIZE} wires splits the components"))
            })?;
        Ok((side * (total - side)).to_string())
    }
}
