use crate::utils::graph::Graph;
use crate::utils::parse::{invalid, lines};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::BTreeSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 23, tags = ["2024", "graph", "cliques"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Graph<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut network = Graph::new();
        for line in lines(input) {
            let (a, b) = line
                .split_once('-')
                .ok_or_else(|| invalid(format!("expected `a-b`, got {line:?}")))?;
            network.add_edge(a, b);
        }
        Ok(network)
    }
}

/// Bron-Kerbosch with pivoting, keeping the largest clique found
fn largest_clique<'a>(
    network: &Graph<&'a str>,
    clique: &mut Vec<&'a str>,
    mut candidates: BTreeSet<&'a str>,
    mut excluded: BTreeSet<&'a str>,
    best: &mut Vec<&'a str>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        if clique.len() > best.len() {
            best.clone_from(clique);
        }
        return;
    }
    let pivot = candidates
        .iter()
        .chain(&excluded)
        .copied()
        .max_by_key(|node| network.degree(node));
    let skipped: BTreeSet<&str> = pivot
        .map(|pivot| network.neighbors(&pivot).copied().collect())
        .unwrap_or_default();

    let to_visit: Vec<&str> = candidates.difference(&skipped).copied().collect();
    for node in to_visit {
        let neighbors: BTreeSet<&str> = network.neighbors(&node).copied().collect();
        clique.push(node);
        largest_clique(
            network,
            clique,
            candidates.intersection(&neighbors).copied().collect(),
            excluded.intersection(&neighbors).copied().collect(),
            best,
        );
        clique.pop();
        candidates.remove(node);
        excluded.insert(node);
    }
}

impl PartSolver<1> for Solver {
    /// Triangles with at least one computer starting with `t`
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut triangles = 0;
        for &a in shared.nodes() {
            let later: Vec<&str> = shared
                .neighbors(&a)
                .copied()
                .filter(|&b| b > a)
                .sorted_unstable()
                .collect();
            triangles += later
                .iter()
                .tuple_combinations()
                .filter(|&(b, c)| shared.has_edge(b, c))
                .filter(|&(b, c)| [a, *b, *c].iter().any(|name| name.starts_with('t')))
                .count();
        }
        Ok(triangles.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Password of the LAN party: the largest clique, sorted and comma joined
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = Vec::new();
        largest_clique(
            shared,
            &mut Vec::new(),
            shared.nodes().copied().collect(),
            BTreeSet::new(),
            &mut best,
        );
        best.sort_unstable();
        Ok(best.join(","))
    }
}
