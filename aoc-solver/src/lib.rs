//! Advent of Code solver framework
//!
//! Each day is a type that parses its input once into shared data and then
//! answers one or more parts from it. Solvers are collected in a year/day
//! registry, usually through static plugin registration.
//!
//! # Overview
//!
//! - [`AocParser`] turns the raw input into `SharedData`
//! - [`PartSolver<N>`] answers part `N` from `&mut SharedData`
//! - [`Solver`] ties the parts together (normally via `#[derive(AocSolver)]`)
//! - [`SolverInstance`] / [`DynSolver`] hold one parsed input and time each call
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`] map year/day to factories
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Sonar;
//!
//! impl AocParser for Sonar {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sonar {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Sonar {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Sonar>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry
//!     .create_solver(2021, 1, "199\n200\n208\n210\n200\n207\n240\n269\n260\n263")
//!     .unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "7");
//! assert_eq!(solver.solve(2).unwrap().answer, "5");
//! ```
//!
//! # Plugin Registration
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so that
//! [`SolverRegistryBuilder::register_all_plugins`] finds the solver without
//! any manual wiring:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2023, day = 1, tags = ["2023", "parsing"])]
//! pub struct Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code AutoRegisterSolver expands to
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
