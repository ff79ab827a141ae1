//! Helpers shared by the daily solutions

pub mod dp_cache;
pub mod graph;
pub mod math;
pub mod matrix;
pub mod parse;
pub mod point;
pub mod priority_queue;
pub mod search;

pub use graph::{DirectedGraph, Graph, WeightedDirectedGraph};
pub use matrix::{Matrix, MatrixError};
pub use point::{DiagonalDirection, Direction, Point, Point2D, Point3D};
pub use priority_queue::PriorityQueue;
pub use search::SearchResult;
