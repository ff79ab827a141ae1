//! Explicit graphs keyed by arbitrary node values
//!
//! Nodes are stored in insertion order and addressed internally by index;
//! [`Graph`] and [`DirectedGraph`] are thin wrappers over
//! [`WeightedDirectedGraph`].

use crate::utils::search::{self, SearchResult};
use num::Zero;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Add;

/// Directed graph with a weight on every edge
#[derive(Debug, Clone)]
pub struct WeightedDirectedGraph<N, W> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    edges: Vec<Vec<(usize, W)>>,
}

impl<N: Clone + Eq + Hash, W> WeightedDirectedGraph<N, W> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Index of `node`, inserting it first when it is new
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.edges.push(Vec::new());
        i
    }

    pub fn node_index(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Adds `from -> to`, creating missing nodes; an existing edge gets the
    /// new weight
    pub fn add_edge(&mut self, from: N, to: N, weight: W) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        let out = &mut self.edges[from];
        match out.iter_mut().find(|(target, _)| *target == to) {
            Some(edge) => edge.1 = weight,
            None => out.push((to, weight)),
        }
    }

    pub fn has_edge(&self, from: &N, to: &N) -> bool {
        self.edge_position(from, to).is_some()
    }

    fn edge_position(&self, from: &N, to: &N) -> Option<(usize, usize)> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        let position = self.edges[from].iter().position(|(target, _)| *target == to)?;
        Some((from, position))
    }

    pub fn edge_weight(&self, from: &N, to: &N) -> Option<&W> {
        let (from, position) = self.edge_position(from, to)?;
        Some(&self.edges[from][position].1)
    }

    pub fn remove_edge(&mut self, from: &N, to: &N) -> Option<W> {
        let (from, position) = self.edge_position(from, to)?;
        Some(self.edges[from].remove(position).1)
    }

    /// Targets of the edges leaving `node`; empty for unknown nodes
    pub fn neighbors<'g>(&'g self, node: &N) -> impl Iterator<Item = &'g N> + use<'g, N, W> {
        self.neighbors_with_weights(node).map(|(target, _)| target)
    }

    pub fn neighbors_with_weights<'g>(
        &'g self,
        node: &N,
    ) -> impl Iterator<Item = (&'g N, &'g W)> + use<'g, N, W> {
        self.node_index(node)
            .map(|i| self.edges[i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|(target, weight)| (&self.nodes[*target], weight))
    }

    /// Outgoing `(target index, weight)` pairs of the node at `index`
    pub fn edges_from(&self, index: usize) -> &[(usize, W)] {
        self.edges.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    fn resolve<C>(&self, result: SearchResult<usize, C>) -> SearchResult<N, C> {
        SearchResult {
            node: self.nodes[result.node].clone(),
            cost: result.cost,
            path: result.path.into_iter().map(|i| self.nodes[i].clone()).collect(),
        }
    }
}

impl<N, W> WeightedDirectedGraph<N, W>
where
    N: Clone + Eq + Hash,
    W: Copy + Ord + Add<Output = W> + Zero,
{
    /// Cheapest total weight from `from` to `to`
    pub fn dijkstra(&self, from: &N, to: &N) -> Option<W> {
        self.shortest_path(from, to).map(|result| result.cost)
    }

    pub fn shortest_path(&self, from: &N, to: &N) -> Option<SearchResult<N, W>> {
        self.a_star(from, to, |_| W::zero())
    }

    /// A* with a caller supplied lower bound on the remaining weight
    pub fn a_star(
        &self,
        from: &N,
        to: &N,
        mut heuristic: impl FnMut(&N) -> W,
    ) -> Option<SearchResult<N, W>> {
        let start = self.node_index(from)?;
        let goal = self.node_index(to)?;
        let result = search::a_star(
            start,
            |&i| self.edges[i].iter().copied(),
            |&i| heuristic(&self.nodes[i]),
            |&i| i == goal,
        )?;
        Some(self.resolve(result))
    }
}

impl<N: Clone + Eq + Hash, W> Default for WeightedDirectedGraph<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Directed graph without weights
#[derive(Debug, Clone)]
pub struct DirectedGraph<N> {
    inner: WeightedDirectedGraph<N, ()>,
}

impl<N: Clone + Eq + Hash> DirectedGraph<N> {
    pub fn new() -> Self {
        Self {
            inner: WeightedDirectedGraph::new(),
        }
    }

    pub fn add_node(&mut self, node: N) -> usize {
        self.inner.add_node(node)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.inner.contains_node(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.inner.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn add_edge(&mut self, from: N, to: N) {
        self.inner.add_edge(from, to, ());
    }

    pub fn has_edge(&self, from: &N, to: &N) -> bool {
        self.inner.has_edge(from, to)
    }

    /// True when the edge existed
    pub fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        self.inner.remove_edge(from, to).is_some()
    }

    pub fn neighbors<'g>(&'g self, node: &N) -> impl Iterator<Item = &'g N> + use<'g, N> {
        self.inner.neighbors(node)
    }

    /// Fewest-edges path from `from` to the first node accepted by `is_goal`
    pub fn breadth_first_search(
        &self,
        from: &N,
        mut is_goal: impl FnMut(&N, usize) -> bool,
    ) -> Option<SearchResult<N, usize>> {
        let start = self.inner.node_index(from)?;
        let result = search::breadth_first_search(
            start,
            |&i| self.inner.edges_from(i).iter().map(|(target, _)| *target),
            |&i, distance| is_goal(&self.inner.nodes[i], distance),
        )?;
        Some(self.inner.resolve(result))
    }

    pub fn shortest_distance(&self, from: &N, to: &N) -> Option<usize> {
        self.breadth_first_search(from, |node, _| node == to)
            .map(|result| result.cost)
    }
}

impl<N: Clone + Eq + Hash> Default for DirectedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Undirected graph; every edge is stored in both directions
#[derive(Debug, Clone)]
pub struct Graph<N> {
    inner: DirectedGraph<N>,
}

impl<N: Clone + Eq + Hash> Graph<N> {
    pub fn new() -> Self {
        Self {
            inner: DirectedGraph::new(),
        }
    }

    pub fn add_node(&mut self, node: N) -> usize {
        self.inner.add_node(node)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.inner.contains_node(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.inner.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of undirected edges; a self-loop is stored once and counts once
    pub fn edge_count(&self) -> usize {
        let loops = self
            .inner
            .nodes()
            .filter(|node| self.inner.has_edge(node, node))
            .count();
        (self.inner.edge_count() + loops) / 2
    }

    pub fn add_edge(&mut self, a: N, b: N) {
        self.inner.add_edge(a.clone(), b.clone());
        self.inner.add_edge(b, a);
    }

    pub fn has_edge(&self, a: &N, b: &N) -> bool {
        self.inner.has_edge(a, b)
    }

    pub fn remove_edge(&mut self, a: &N, b: &N) -> bool {
        let removed = self.inner.remove_edge(a, b);
        self.inner.remove_edge(b, a) || removed
    }

    pub fn neighbors<'g>(&'g self, node: &N) -> impl Iterator<Item = &'g N> + use<'g, N> {
        self.inner.neighbors(node)
    }

    pub fn degree(&self, node: &N) -> usize {
        self.neighbors(node).count()
    }

    pub fn shortest_distance(&self, a: &N, b: &N) -> Option<usize> {
        self.inner.shortest_distance(a, b)
    }

    /// Node sets of the connected components, in order of each component's
    /// first inserted node
    pub fn connected_components(&self) -> Vec<Vec<N>> {
        let graph = &self.inner.inner;
        let mut assigned: HashSet<usize> = HashSet::new();
        let mut components = Vec::new();

        for start in 0..graph.node_count() {
            if assigned.contains(&start) {
                continue;
            }
            let reached = search::bfs_distances(start, |&i| {
                graph.edges_from(i).iter().map(|(target, _)| *target)
            });
            let mut members: Vec<usize> = reached.into_keys().collect();
            members.sort_unstable();
            assigned.extend(members.iter().copied());
            components.push(members.into_iter().map(|i| graph.nodes[i].clone()).collect());
        }
        components
    }
}

impl<N: Clone + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road_map() -> WeightedDirectedGraph<&'static str, u32> {
        let mut graph = WeightedDirectedGraph::new();
        graph.add_edge("london", "dublin", 464);
        graph.add_edge("london", "belfast", 518);
        graph.add_edge("dublin", "belfast", 141);
        graph.add_edge("belfast", "york", 300);
        graph
    }

    #[test]
    fn test_weighted_edges() {
        let mut graph = road_map();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.add_node("london"), 0);
        assert_eq!(graph.edge_weight(&"london", &"dublin"), Some(&464));
        assert!(!graph.has_edge(&"dublin", &"london"));

        graph.add_edge("london", "dublin", 400);
        assert_eq!(graph.edge_weight(&"london", &"dublin"), Some(&400));
        assert_eq!(graph.edge_count(), 4);

        assert_eq!(
            graph.neighbors(&"london").copied().collect::<Vec<_>>(),
            vec!["dublin", "belfast"]
        );
        assert_eq!(graph.remove_edge(&"london", &"dublin"), Some(400));
        assert_eq!(graph.remove_edge(&"london", &"dublin"), None);
        assert_eq!(graph.neighbors(&"nowhere").count(), 0);
    }

    #[test]
    fn test_weighted_shortest_path() {
        let graph = road_map();
        assert_eq!(graph.dijkstra(&"london", &"belfast"), Some(518));
        let path = graph.shortest_path(&"london", &"york").unwrap();
        assert_eq!(path.cost, 818);
        assert_eq!(path.path, vec!["london", "belfast", "york"]);
        assert_eq!(graph.dijkstra(&"york", &"london"), None);
        assert_eq!(graph.dijkstra(&"london", &"paris"), None);
        assert_eq!(
            graph.a_star(&"london", &"york", |_| 0).map(|r| r.cost),
            Some(818)
        );
    }

    #[test]
    fn test_directed_graph_bfs() {
        let mut graph = DirectedGraph::new();
        for (from, to) in [(1, 2), (2, 3), (3, 4), (1, 4)] {
            graph.add_edge(from, to);
        }
        assert_eq!(graph.shortest_distance(&1, &4), Some(1));
        assert_eq!(graph.shortest_distance(&4, &1), None);
        assert!(graph.remove_edge(&1, &4));
        assert!(!graph.remove_edge(&1, &4));
        let result = graph.breadth_first_search(&1, |n, _| *n == 4).unwrap();
        assert_eq!(result.path, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_undirected_graph() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("x", "y");
        graph.add_node("lonely");

        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_edge(&"c", &"b"));
        assert_eq!(graph.degree(&"b"), 2);
        assert_eq!(graph.shortest_distance(&"c", &"a"), Some(2));
        assert_eq!(
            graph.connected_components(),
            vec![vec!["a", "b", "c"], vec!["x", "y"], vec!["lonely"]]
        );

        assert!(graph.remove_edge(&"b", &"a"));
        assert!(!graph.has_edge(&"a", &"b"));
        assert_eq!(graph.connected_components().len(), 4);
    }

    #[test]
    fn test_undirected_self_loop() {
        let mut graph = Graph::new();
        graph.add_edge("a", "a");
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(&"a", &"a"));
        assert_eq!(graph.degree(&"a"), 1);

        graph.add_edge("a", "b");
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.remove_edge(&"a", &"a"));
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.has_edge(&"a", &"a"));
    }
}
