//! Memoization for recursions whose subproblems form a DAG
//!
//! A [`DpProblem`] names the subproblems an index depends on and combines
//! their values; [`DpCache`] resolves dependencies lazily and computes each
//! index at most once, storing results in a [`Backend`]:
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index
//!
//! # Warning: Cycle Behavior
//!
//! There is no cycle detection. A cyclic dependency graph recurses until the
//! stack overflows, so dependencies MUST form a DAG.
//!
//! # Example: trait-based
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&10), 55);
//! ```
//!
//! # Example: closure-based
//!
//! Closures can borrow puzzle data, which keeps one-off recursions short:
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, HashMapBackend};
//!
//! let coins = [1u32, 2, 5];
//! // Ways to pay `amount` using coins from index `first` onwards
//! let cache = DpCache::new(
//!     HashMapBackend::new(),
//!     |&(amount, first): &(u32, usize)| {
//!         if amount == 0 || first == coins.len() {
//!             return vec![];
//!         }
//!         let mut deps = vec![(amount, first + 1)];
//!         if coins[first] <= amount {
//!             deps.push((amount - coins[first], first));
//!         }
//!         deps
//!     },
//!     |&(amount, _): &(u32, usize), deps: Vec<u64>| {
//!         if amount == 0 { 1 } else { deps.iter().sum() }
//!     },
//! );
//! assert_eq!(cache.get(&(5, 0)), 4);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};
