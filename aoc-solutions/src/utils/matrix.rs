//! Dense row-major grid addressed by [`Point`]
//!
//! `(0, 0)` is the top-left cell, `x` is the column and `y` the row. Search
//! helpers move orthogonally and ask a `can_move(from, &from_cell, to,
//! &to_cell)` predicate whether a step is allowed.

use crate::utils::point::Point;
use crate::utils::search::{self, SearchResult};
use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Index, IndexMut};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("matrix has no cells")]
    Empty,
    #[error("invalid cell {cell:?} at {point}: {reason}")]
    InvalidCell {
        point: Point,
        cell: char,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Builds each cell from its point, in row-major order
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Point) -> T) -> Self {
        let cells = (0..width * height)
            .map(|index| f(point_at(width, index)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Rejects an empty row list and rows of differing lengths
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let width = rows.first().map(Vec::len).ok_or(MatrixError::Empty)?;
        if width == 0 {
            return Err(MatrixError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(MatrixError::Ragged {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses one row per non-empty line, converting each character with `f`
    pub fn parse_with<E: fmt::Display>(
        input: &str,
        mut f: impl FnMut(char) -> Result<T, E>,
    ) -> Result<Self, MatrixError> {
        let rows = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, cell)| {
                        f(cell).map_err(|e| MatrixError::InvalidCell {
                            point: Point::new(x as i32, y as i32),
                            cell,
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    fn index_of(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(p.y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.index_of(p).is_some()
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index_of(p).map(|i| &mut self.cells[i])
    }

    /// Stores `value` and returns the previous cell, or `None` without writing
    /// when `p` is outside the matrix
    pub fn set(&mut self, p: Point, value: T) -> Option<T> {
        self.get_mut(p).map(|cell| std::mem::replace(cell, value))
    }

    pub fn swap(&mut self, a: Point, b: Point) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn column(&self, x: usize) -> impl Iterator<Item = &T> {
        let len = if x < self.width { self.height } else { 0 };
        self.cells.iter().skip(x).step_by(self.width.max(1)).take(len)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Every point in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width;
        (0..self.cells.len()).map(move |index| point_at(width, index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Point, &T) -> U) -> Matrix<U> {
        Matrix {
            width: self.width,
            height: self.height,
            cells: self.iter().map(|(p, cell)| f(p, cell)).collect(),
        }
    }

    /// Applies `f` to each column, left to right
    pub fn map_columns<U>(&self, mut f: impl FnMut(usize, &[&T]) -> U) -> Vec<U> {
        (0..self.width)
            .map(|x| {
                let column: Vec<&T> = self.column(x).collect();
                f(x, &column)
            })
            .collect()
    }

    pub fn fold<A>(&self, init: A, mut f: impl FnMut(A, Point, &T) -> A) -> A {
        self.iter().fold(init, |acc, (p, cell)| f(acc, p, cell))
    }

    pub fn filter_points(&self, mut predicate: impl FnMut(Point, &T) -> bool) -> Vec<Point> {
        self.iter()
            .filter(|&(p, cell)| predicate(p, cell))
            .map(|(p, _)| p)
            .collect()
    }

    pub fn find_point(&self, mut predicate: impl FnMut(Point, &T) -> bool) -> Option<Point> {
        self.iter()
            .find(|&(p, cell)| predicate(p, cell))
            .map(|(p, _)| p)
    }

    /// First point holding `value`, in row-major order
    pub fn position(&self, value: &T) -> Option<Point>
    where
        T: PartialEq,
    {
        self.find_point(|_, cell| cell == value)
    }

    pub fn count(&self, mut predicate: impl FnMut(Point, &T) -> bool) -> usize {
        self.iter().filter(|&(p, cell)| predicate(p, cell)).count()
    }

    pub fn sum<S>(&self) -> S
    where
        S: for<'a> Sum<&'a T>,
    {
        self.cells.iter().sum()
    }

    /// In-bounds orthogonal neighbors (up, right, down, left)
    pub fn orthogonal_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.orthogonal_neighbors()
            .into_iter()
            .filter(|&n| self.contains(n))
    }

    /// In-bounds neighbors including diagonals
    pub fn all_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.all_neighbors().into_iter().filter(|&n| self.contains(n))
    }

    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        Matrix::from_fn(self.height, self.width, |p| {
            self[Point::new(p.y, p.x)].clone()
        })
    }

    /// Quarter turn clockwise; the bottom-left cell becomes the top-left one
    pub fn rotate_clockwise(&self) -> Self
    where
        T: Clone,
    {
        let last_row = self.height as i32 - 1;
        Matrix::from_fn(self.height, self.width, |p| {
            self[Point::new(p.y, last_row - p.x)].clone()
        })
    }

    fn moves<F>(&self, from: Point, can_move: &mut F) -> Vec<Point>
    where
        F: FnMut(Point, &T, Point, &T) -> bool,
    {
        let from_cell = &self[from];
        self.orthogonal_neighbors(from)
            .filter(|&to| can_move(from, from_cell, to, &self[to]))
            .collect()
    }

    /// Breadth-first walk from `start`, returning the first `Some` that
    /// `visit(point, &cell, distance)` produces
    pub fn walk<R>(
        &self,
        start: Point,
        mut can_move: impl FnMut(Point, &T, Point, &T) -> bool,
        mut visit: impl FnMut(Point, &T, usize) -> Option<R>,
    ) -> Option<R> {
        if !self.contains(start) {
            return None;
        }
        search::walk(
            start,
            |&p| self.moves(p, &mut can_move),
            |&p, distance| visit(p, &self[p], distance),
        )
    }

    pub fn breadth_first_search(
        &self,
        start: Point,
        mut can_move: impl FnMut(Point, &T, Point, &T) -> bool,
        mut is_goal: impl FnMut(Point, &T, usize) -> bool,
    ) -> Option<SearchResult<Point, usize>> {
        if !self.contains(start) {
            return None;
        }
        search::breadth_first_search(
            start,
            |&p| self.moves(p, &mut can_move),
            |&p, distance| is_goal(p, &self[p], distance),
        )
    }

    /// BFS distance from `start` to every reachable point
    pub fn distances_from(
        &self,
        start: Point,
        mut can_move: impl FnMut(Point, &T, Point, &T) -> bool,
    ) -> HashMap<Point, usize> {
        if !self.contains(start) {
            return HashMap::new();
        }
        search::bfs_distances(start, |&p| self.moves(p, &mut can_move))
    }

    /// A* towards `goal` with the Manhattan distance as heuristic.
    /// `cost` returns `None` for a blocked step.
    pub fn a_star(
        &self,
        start: Point,
        goal: Point,
        mut cost: impl FnMut(Point, &T, Point, &T) -> Option<u64>,
    ) -> Option<SearchResult<Point, u64>> {
        if !self.contains(start) || !self.contains(goal) {
            return None;
        }
        search::a_star(
            start,
            |&from| {
                let from_cell = &self[from];
                self.orthogonal_neighbors(from)
                    .filter_map(|to| cost(from, from_cell, to, &self[to]).map(|c| (to, c)))
                    .collect::<Vec<_>>()
            },
            |p| p.manhattan_distance(goal) as u64,
            |p| *p == goal,
        )
    }

    /// Number of steps on the shortest path, `None` when `goal` is unreachable
    pub fn shortest_distance(
        &self,
        start: Point,
        goal: Point,
        mut can_move: impl FnMut(Point, &T, Point, &T) -> bool,
    ) -> Option<usize> {
        self.a_star(start, goal, |from, from_cell, to, to_cell| {
            can_move(from, from_cell, to, to_cell).then_some(1)
        })
        .map(|result| result.cost as usize)
    }
}

impl Matrix<char> {
    pub fn parse_chars(input: &str) -> Result<Self, MatrixError> {
        Self::parse_with(input, Ok::<char, std::convert::Infallible>)
    }
}

impl Matrix<u8> {
    /// One byte per cell, for ASCII grids
    pub fn parse_bytes(input: &str) -> Result<Self, MatrixError> {
        Self::parse_with(input, |c| {
            u8::try_from(c).map_err(|_| "not a single byte character")
        })
    }

    /// Cells are decimal digit values (`'7'` becomes `7`)
    pub fn parse_digits(input: &str) -> Result<Self, MatrixError> {
        Self::parse_with(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or("not a decimal digit")
        })
    }
}

fn point_at(width: usize, index: usize) -> Point {
    Point::new((index % width) as i32, (index / width) as i32)
}

impl<T> Index<Point> for Matrix<T> {
    type Output = T;

    /// Panics when `p` is outside the matrix, like slice indexing
    fn index(&self, p: Point) -> &T {
        match self.index_of(p) {
            Some(i) => &self.cells[i],
            None => panic!("point {p} outside {}x{} matrix", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Point> for Matrix<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        match self.index_of(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("point {p} outside {}x{} matrix", self.width, self.height),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    const MAZE: &str = indoc! {"
        S.#.
        .##.
        ...E
    "};

    fn maze() -> Matrix<char> {
        Matrix::parse_chars(MAZE).unwrap()
    }

    fn open(_: Point, _: &char, _: Point, to: &char) -> bool {
        *to != '#'
    }

    #[test]
    fn test_parse_and_access() {
        let m = maze();
        assert_eq!((m.width(), m.height()), (4, 3));
        assert_eq!(m[Point::new(3, 2)], 'E');
        assert_eq!(m.get(Point::new(4, 0)), None);
        assert_eq!(m.get(Point::new(-1, 0)), None);
        assert_eq!(m.position(&'E'), Some(Point::new(3, 2)));
        assert_eq!(m.row(1), Some(&['.', '#', '#', '.'][..]));
        assert_eq!(m.column(2).collect::<String>(), "##.");
        assert_eq!(m.count(|_, c| *c == '#'), 3);
        assert_eq!(m.to_string(), MAZE.trim_end());
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert_eq!(
            Matrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(Matrix::<u8>::from_rows(vec![]), Err(MatrixError::Empty));
        assert!(matches!(
            Matrix::parse_digits("12\n3x"),
            Err(MatrixError::InvalidCell { cell: 'x', .. })
        ));
    }

    #[test]
    fn test_set_out_of_bounds_does_not_write() {
        let mut m = Matrix::new(2, 2, 0u8);
        assert_eq!(m.set(Point::new(1, 1), 5), Some(0));
        assert_eq!(m.set(Point::new(2, 1), 7), None);
        assert_eq!(m.sum::<u8>(), 5);
    }

    #[test]
    fn test_point_wise_operations() {
        let m = Matrix::parse_digits("12\n34").unwrap();
        let doubled = m.map(|_, v| v * 2);
        assert_eq!(doubled.cells(), &[2, 4, 6, 8]);
        assert_eq!(m.fold(0u32, |acc, p, v| acc + (p.x as u32) * u32::from(*v)), 6);
        assert_eq!(m.filter_points(|_, v| v % 2 == 0), vec![Point::new(1, 0), Point::new(1, 1)]);
        assert_eq!(
            m.map_columns(|_, column| column.iter().map(|v| u32::from(**v)).sum::<u32>()),
            vec![4, 6]
        );
        assert_eq!(m.orthogonal_neighbors(Point::new(0, 0)).count(), 2);
        assert_eq!(m.all_neighbors(Point::new(0, 0)).count(), 3);
    }

    #[test]
    fn test_rotate_and_transpose() {
        let m = Matrix::parse_chars("ab\ncd\nef").unwrap();
        assert_eq!(m.rotate_clockwise().to_string(), "eca\nfdb");
        assert_eq!(m.transpose().to_string(), "ace\nbdf");
    }

    #[test]
    fn test_searches() {
        let m = maze();
        let start = Point::new(0, 0);
        let goal = Point::new(3, 2);

        assert_eq!(m.shortest_distance(start, goal, open), Some(5));
        let bfs = m
            .breadth_first_search(start, open, |_, c, _| *c == 'E')
            .unwrap();
        assert_eq!(bfs.cost, 5);
        assert_eq!(bfs.path.len(), 6);

        let distances = m.distances_from(start, open);
        assert_eq!(distances.len(), 9);
        assert_eq!(distances[&Point::new(3, 0)], 7);

        let first_in_last_column = m.walk(start, open, |p, _, d| (p.x == 3).then_some(d));
        assert_eq!(first_in_last_column, Some(5));

        assert_eq!(m.shortest_distance(start, goal, |_, _, _, to| *to == '.'), None);
        assert_eq!(m.shortest_distance(Point::new(9, 9), goal, open), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// **Feature: matrix, Property 1: Four clockwise turns and two transposes are the identity**
        #[test]
        fn prop_rotation_and_transpose_cycles(
            width in 1usize..6,
            height in 1usize..6,
            seed in any::<u32>(),
        ) {
            let m = Matrix::from_fn(width, height, |p| seed.wrapping_mul(31).wrapping_add((p.x * 7 + p.y) as u32));
            let turned = m.rotate_clockwise().rotate_clockwise().rotate_clockwise().rotate_clockwise();
            prop_assert_eq!(&turned, &m);
            prop_assert_eq!(&m.transpose().transpose(), &m);
        }

        /// **Feature: matrix, Property 2: Shortest distance on an open grid is the Manhattan distance**
        #[test]
        fn prop_open_grid_distance(x in 0i32..7, y in 0i32..5) {
            let m = Matrix::new(7, 5, '.');
            let goal = Point::new(x, y);
            let distance = m.shortest_distance(Point::new(0, 0), goal, open);
            prop_assert_eq!(distance, Some((x + y) as usize));
        }
    }
}
