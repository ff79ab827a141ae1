//! Generic graph search over implicit graphs
//!
//! Nodes are any `Clone + Eq + Hash` value and edges come from a successor
//! closure, so the same routines serve grids, graphs and puzzle state spaces.

use crate::utils::priority_queue::PriorityQueue;
use num::Zero;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::ops::Add;

/// A reached goal: the node, what it cost, and the path from the start to it
/// (both ends included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<N, C> {
    pub node: N,
    pub cost: C,
    pub path: Vec<N>,
}

fn reconstruct_path<N: Clone + Eq + Hash>(parents: &HashMap<N, N>, end: &N) -> Vec<N> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(parent) = parents.get(current) {
        path.push(parent.clone());
        current = parent;
    }
    path.reverse();
    path
}

/// Breadth-first traversal that stops at the first node for which `visit`
/// returns `Some`. `visit` also sees the BFS distance of each node.
pub fn walk<N, S, I, V, R>(start: N, mut successors: S, mut visit: V) -> Option<R>
where
    N: Clone + Eq + Hash,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
    V: FnMut(&N, usize) -> Option<R>,
{
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([(start, 0)]);

    while let Some((node, distance)) = queue.pop_front() {
        if let Some(result) = visit(&node, distance) {
            return Some(result);
        }
        for next in successors(&node) {
            if seen.insert(next.clone()) {
                queue.push_back((next, distance + 1));
            }
        }
    }
    None
}

/// Shortest (fewest edges) path to the first node accepted by `is_goal`
pub fn breadth_first_search<N, S, I, G>(
    start: N,
    mut successors: S,
    mut is_goal: G,
) -> Option<SearchResult<N, usize>>
where
    N: Clone + Eq + Hash,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
    G: FnMut(&N, usize) -> bool,
{
    let mut parents: HashMap<N, N> = HashMap::new();
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([(start, 0)]);

    while let Some((node, distance)) = queue.pop_front() {
        if is_goal(&node, distance) {
            let path = reconstruct_path(&parents, &node);
            return Some(SearchResult {
                node,
                cost: distance,
                path,
            });
        }
        for next in successors(&node) {
            if seen.insert(next.clone()) {
                parents.insert(next.clone(), node.clone());
                queue.push_back((next, distance + 1));
            }
        }
    }
    None
}

/// BFS distance to every node reachable from `start`
pub fn bfs_distances<N, S, I>(start: N, mut successors: S) -> HashMap<N, usize>
where
    N: Clone + Eq + Hash,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    let mut distances = HashMap::from([(start.clone(), 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let distance = distances[&node];
        for next in successors(&node) {
            if !distances.contains_key(&next) {
                distances.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}

/// Cheapest path to the first node accepted by `is_goal`.
///
/// Edge costs must be non-negative.
pub fn dijkstra<N, C, S, I, G>(start: N, successors: S, is_goal: G) -> Option<SearchResult<N, C>>
where
    N: Clone + Eq + Hash,
    C: Copy + Ord + Add<Output = C> + Zero,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    G: FnMut(&N) -> bool,
{
    a_star(start, successors, |_| C::zero(), is_goal)
}

/// Cheapest cost from any of `starts` to every reachable node
pub fn dijkstra_all<N, C, S, I>(starts: impl IntoIterator<Item = N>, mut successors: S) -> HashMap<N, C>
where
    N: Clone + Eq + Hash,
    C: Copy + Ord + Add<Output = C> + Zero,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    let mut best: HashMap<N, C> = HashMap::new();
    let mut open = PriorityQueue::new();
    for start in starts {
        best.insert(start.clone(), C::zero());
        open.push(start, C::zero());
    }

    while let Some((node, cost)) = open.pop() {
        if best.get(&node).is_some_and(|&known| cost > known) {
            continue;
        }
        for (next, step) in successors(&node) {
            let next_cost = cost + step;
            if best.get(&next).is_none_or(|&known| next_cost < known) {
                best.insert(next.clone(), next_cost);
                open.push(next, next_cost);
            }
        }
    }
    log::debug!("dijkstra settled {} nodes", best.len());
    best
}

/// A* search towards the first node accepted by `is_goal`.
///
/// `heuristic` must never overestimate the remaining cost. A node is only
/// re-queued when a strictly cheaper route to it is found.
pub fn a_star<N, C, S, I, H, G>(
    start: N,
    mut successors: S,
    mut heuristic: H,
    mut is_goal: G,
) -> Option<SearchResult<N, C>>
where
    N: Clone + Eq + Hash,
    C: Copy + Ord + Add<Output = C> + Zero,
    S: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    H: FnMut(&N) -> C,
    G: FnMut(&N) -> bool,
{
    let mut best: HashMap<N, C> = HashMap::from([(start.clone(), C::zero())]);
    let mut parents: HashMap<N, N> = HashMap::new();
    let mut open = PriorityQueue::new();
    let estimate = heuristic(&start);
    open.push((start, C::zero()), estimate);
    let mut expanded = 0usize;

    while let Some(((node, cost), _)) = open.pop() {
        // Stale entry, a cheaper route was queued later
        if best.get(&node).is_some_and(|&known| cost > known) {
            continue;
        }
        if is_goal(&node) {
            let path = reconstruct_path(&parents, &node);
            log::debug!("a* reached goal after expanding {expanded} nodes, path of {}", path.len());
            return Some(SearchResult { node, cost, path });
        }
        expanded += 1;
        for (next, step) in successors(&node) {
            let next_cost = cost + step;
            if best.get(&next).is_none_or(|&known| next_cost < known) {
                best.insert(next.clone(), next_cost);
                parents.insert(next.clone(), node.clone());
                let estimate = next_cost + heuristic(&next);
                open.push((next, next_cost), estimate);
            }
        }
    }
    log::debug!("a* exhausted {expanded} nodes without reaching a goal");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::point::Point;
    use proptest::prelude::*;

    fn open_grid(size: i32) -> impl FnMut(&Point) -> Vec<Point> {
        move |p: &Point| {
            p.orthogonal_neighbors()
                .into_iter()
                .filter(|n| (0..size).contains(&n.x) && (0..size).contains(&n.y))
                .collect()
        }
    }

    fn weighted(
        mut successors: impl FnMut(&Point) -> Vec<Point>,
    ) -> impl FnMut(&Point) -> Vec<(Point, u32)> {
        move |p: &Point| successors(p).into_iter().map(|n| (n, 1)).collect()
    }

    #[test]
    fn test_walk_returns_first_visit_hit() {
        let found = walk(Point::new(0, 0), open_grid(5), |p, distance| {
            (p.x == 3).then_some(distance)
        });
        assert_eq!(found, Some(3));
        assert_eq!(walk(Point::new(0, 0), open_grid(5), |_, _| None::<()>), None);
    }

    #[test]
    fn test_bfs_path_includes_both_ends() {
        let result =
            breadth_first_search(Point::new(0, 0), open_grid(3), |p, _| *p == Point::new(2, 2))
                .unwrap();
        assert_eq!(result.cost, 4);
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.path.first(), Some(&Point::new(0, 0)));
        assert_eq!(result.path.last(), Some(&Point::new(2, 2)));
        assert!(result.path.windows(2).all(|w| w[0].manhattan_distance(w[1]) == 1));
    }

    #[test]
    fn test_bfs_checks_start_first() {
        let result = breadth_first_search(1u32, |n| [n + 1], |n, _| *n == 1).unwrap();
        assert_eq!(result.cost, 0);
        assert_eq!(result.path, vec![1]);
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_longer_route() {
        // a -> c costs 10 directly, 3 through b
        let edges = |n: &char| match n {
            'a' => vec![('c', 10u32), ('b', 1)],
            'b' => vec![('c', 2)],
            _ => vec![],
        };
        let result = dijkstra('a', edges, |n| *n == 'c').unwrap();
        assert_eq!(result.cost, 3);
        assert_eq!(result.path, vec!['a', 'b', 'c']);
        assert_eq!(dijkstra('c', edges, |n| *n == 'a'), None);
    }

    #[test]
    fn test_dijkstra_all_multi_source() {
        let costs = dijkstra_all([0i32, 10], |n: &i32| {
            [(n - 1, 1u32), (n + 1, 1)]
                .into_iter()
                .filter(|(m, _)| (0..=10).contains(m))
                .collect::<Vec<_>>()
        });
        assert_eq!(costs.len(), 11);
        assert_eq!(costs[&5], 5);
        assert_eq!(costs[&8], 2);
    }

    #[test]
    fn test_a_star_with_walls() {
        // Wall on x == 1 except at y == 4
        let successors = |p: &Point| {
            p.orthogonal_neighbors()
                .into_iter()
                .filter(|n| (0..5).contains(&n.x) && (0..5).contains(&n.y))
                .filter(|n| n.x != 1 || n.y == 4)
                .map(|n| (n, 1u32))
                .collect::<Vec<_>>()
        };
        let goal = Point::new(2, 0);
        let result = a_star(
            Point::new(0, 0),
            successors,
            |p| p.manhattan_distance(goal) as u32,
            |p| *p == goal,
        )
        .unwrap();
        assert_eq!(result.cost, 10);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// **Feature: search, Property 1: BFS distance equals Manhattan distance on an open grid**
        #[test]
        fn prop_bfs_distance_is_manhattan(x in 0i32..8, y in 0i32..8) {
            let target = Point::new(x, y);
            let distances = bfs_distances(Point::new(0, 0), open_grid(8));
            prop_assert_eq!(distances.len(), 64);
            prop_assert_eq!(distances[&target], target.manhattan_distance(Point::new(0, 0)) as usize);
        }

        /// **Feature: search, Property 2: A* and Dijkstra agree with BFS on unit costs**
        #[test]
        fn prop_weighted_searches_agree_with_bfs(
            walls in prop::collection::hash_set((0i32..6, 0i32..6), 0..12),
            gx in 0i32..6,
            gy in 0i32..6,
        ) {
            let start = Point::new(0, 0);
            let goal = Point::new(gx, gy);
            let blocked = |p: &Point| *p != start && *p != goal && walls.contains(&(p.x, p.y));
            let grid = |p: &Point| {
                open_grid(6)(p).into_iter().filter(|n| !blocked(n)).collect::<Vec<_>>()
            };

            let bfs = breadth_first_search(start, grid, |p, _| *p == goal).map(|r| r.cost as u32);
            let dijkstra = dijkstra(start, weighted(grid), |p| *p == goal).map(|r| r.cost);
            let a_star = a_star(
                start,
                weighted(grid),
                |p| p.manhattan_distance(goal) as u32,
                |p| *p == goal,
            )
            .map(|r| r.cost);

            prop_assert_eq!(bfs, dijkstra);
            prop_assert_eq!(bfs, a_star);
        }
    }
}
