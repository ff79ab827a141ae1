//! Advent of Code puzzle solutions with automatic registration
//!
//! [`utils`] holds the shared toolbox (points, grids, graphs, search, number
//! theory). Solutions live in `my_solutions::year_YYYY::day_N`; each one
//! derives `AutoRegisterSolver`, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find it.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
