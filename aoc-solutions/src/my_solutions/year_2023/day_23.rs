use crate::utils::graph::WeightedDirectedGraph;
use crate::utils::matrix::Matrix;
use crate::utils::parse::{invalid, missing};
use crate::utils::point::{Direction, Point};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["2023", "grid", "graph"])]
pub struct Solver;

pub struct Trails {
    map: Matrix<char>,
    start: Point,
    end: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Matrix::parse_with(input, |c| match c {
            '#' | '.' | '^' | '>' | 'v' | '<' => Ok(c),
            _ => Err("expected a path, forest or slope"),
        })
        .map_err(|e| invalid(e.to_string()))?;

        let open_in_row = |y: usize| {
            map.row(y)
                .and_then(|row| row.iter().position(|&c| c == '.'))
                .map(|x| Point::new(x as i32, y as i32))
        };
        let start = open_in_row(0).ok_or_else(|| missing("no opening in the top row"))?;
        let end = open_in_row(map.height() - 1)
            .ok_or_else(|| missing("no opening in the bottom row"))?;

        Ok(Trails { map, start, end })
    }
}

impl Trails {
    fn is_open(&self, p: Point) -> bool {
        self.map.get(p).is_some_and(|&c| c != '#')
    }

    /// Directions a hiker may leave `p` in
    fn exits(&self, p: Point, slippery: bool) -> Vec<Direction> {
        match self.map.get(p) {
            Some(&slope) if slippery && slope != '.' => Direction::try_from(slope)
                .map(|direction| vec![direction])
                .unwrap_or_default(),
            _ => Direction::ALL.to_vec(),
        }
    }

    fn is_junction(&self, p: Point) -> bool {
        p == self.start
            || p == self.end
            || p.orthogonal_neighbors()
                .into_iter()
                .filter(|&n| self.is_open(n))
                .count()
                > 2
    }

    /// Follows the corridor leaving `from` towards `direction`, returning the
    /// junction it ends at and its length
    fn follow(&self, from: Point, direction: Direction, slippery: bool) -> Option<(Point, usize)> {
        let mut previous = from;
        let mut current = from.neighbor(direction);
        let mut steps = 1;
        loop {
            if !self.is_open(current) {
                return None;
            }
            if self.is_junction(current) {
                return Some((current, steps));
            }
            let next = self
                .exits(current, slippery)
                .into_iter()
                .map(|d| current.neighbor(d))
                .find(|&n| n != previous && self.is_open(n))?;
            previous = current;
            current = next;
            steps += 1;
        }
    }

    /// Junctions joined by corridor lengths
    fn junction_graph(&self, slippery: bool) -> WeightedDirectedGraph<Point, usize> {
        let mut graph = WeightedDirectedGraph::new();
        for junction in self.map.filter_points(|p, &c| c != '#' && self.is_junction(p)) {
            graph.add_node(junction);
            for direction in self.exits(junction, slippery) {
                if let Some((to, steps)) = self.follow(junction, direction, slippery) {
                    graph.add_edge(junction, to, steps);
                }
            }
        }
        graph
    }

    fn longest_hike(&self, slippery: bool) -> Option<usize> {
        let graph = self.junction_graph(slippery);
        let start = graph.node_index(&self.start)?;
        let end = graph.node_index(&self.end)?;
        let mut visited = vec![false; graph.node_count()];
        longest_path(&graph, start, end, &mut visited)
    }
}

/// Exhaustive DFS over simple paths
fn longest_path(
    graph: &WeightedDirectedGraph<Point, usize>,
    from: usize,
    to: usize,
    visited: &mut [bool],
) -> Option<usize> {
    if from == to {
        return Some(0);
    }
    visited[from] = true;
    let mut best = None;
    for &(next, steps) in graph.edges_from(from) {
        if visited[next] {
            continue;
        }
        if let Some(rest) = longest_path(graph, next, to, visited) {
            best = best.max(Some(steps + rest));
        }
    }
    visited[from] = false;
    best
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .longest_hike(true)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no hike reaches the end"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .longest_hike(false)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no hike reaches the end"))
    }
}
