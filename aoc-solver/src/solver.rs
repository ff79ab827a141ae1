//! Solver traits: parsing, per-part solving and part dispatch

use crate::error::{ParseError, SolveError};

/// Parses puzzle input into the data shared by every part of a day
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Calories;
///
/// impl AocParser for Calories {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split("\n\n")
///             .map(|elf| {
///                 elf.lines()
///                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
///                     .sum()
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Calories::parse("1\n2\n\n4").unwrap(), vec![3, 4]);
/// ```
pub trait AocParser {
    /// Parsed input plus any intermediate results the parts want to share.
    ///
    /// The lifetime lets the data borrow from the input (`&'a str` slices)
    /// when no owned transformation is needed.
    type SharedData<'a>;

    /// Parse the raw input.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part; `#[derive(AocSolver)]` wires the impls into [`Solver`].
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut data = Depths::parse("1\n3\n2\n5").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut data).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part.
    ///
    /// # Arguments
    /// * `shared` - Parsed input; parts may cache results in it for later parts
    ///
    /// # Returns
    /// * `Ok(String)` - The answer
    /// * `Err(SolveError)` - The input has no answer for this part
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete solver for one day.
///
/// Usually derived with `#[derive(AocSolver)]`, which dispatches `solve_part`
/// to the matching [`PartSolver`] impl. Manual implementations look like this:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Floors;
///
/// impl AocParser for Floors {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Floors {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let steps = shared.chars().map(|c| if c == '(' { 1 } else { -1 });
///         match part {
///             1 => Ok(steps.sum::<i32>().to_string()),
///             2 => steps
///                 .scan(0, |floor, step| {
///                     *floor += step;
///                     Some(*floor)
///                 })
///                 .position(|floor| floor < 0)
///                 .map(|i| (i + 1).to_string())
///                 .ok_or_else(|| SolveError::failed("never reaches the basement")),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut data = Floors::parse("()())").unwrap();
/// assert_eq!(Floors::solve_part(&mut data, 1).unwrap(), "-1");
/// assert_eq!(Floors::solve_part(&mut data, 2).unwrap(), "5");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this day has
    const PARTS: u8;

    /// Solve one part
    ///
    /// # Arguments
    /// * `shared` - Parsed input and cached intermediate results
    /// * `part` - The part number, starting at 1
    ///
    /// # Returns
    /// * `Ok(String)` - The answer
    /// * `Err(SolveError::PartNotImplemented)` - No implementation for `part`
    /// * `Err(SolveError::SolveFailed)` - The input has no answer
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked dispatch on top of [`Solver`]
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`] but rejects parts outside `1..=PARTS`
    /// with [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
